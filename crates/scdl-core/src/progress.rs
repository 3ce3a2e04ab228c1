//! Per-chunk progress reporting.
//!
//! Observers are called synchronously, exactly once per received chunk, in
//! arrival order, before the chunk is written to disk.

use std::io::{self, Write};

use crate::{Error, Result};

/// Progress snapshot handed to a [`ProgressObserver`] for one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkProgress<'a> {
    /// Declared length divided by itself, times 100. Always `100.0`.
    ///
    /// Part of the callback contract; callers relying on it only ever saw 100.
    pub total_percent: f64,
    /// Bytes received so far relative to `Content-Length`, truncated toward zero.
    pub current_percent: u64,
    /// Raw bytes of this chunk.
    pub chunk: &'a [u8],
}

impl<'a> ChunkProgress<'a> {
    /// Compute progress after `received` bytes (this chunk included).
    ///
    /// Fails with [`Error::Division`] when the length is missing or zero.
    pub fn compute(content_length: Option<u64>, received: u64, chunk: &'a [u8]) -> Result<Self> {
        let length = content_length.filter(|&n| n > 0).ok_or(Error::Division)?;
        Ok(Self {
            total_percent: fraction(length, length) * 100.0,
            current_percent: (fraction(received, length) * 100.0) as u64,
            chunk,
        })
    }
}

fn fraction(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64
}

/// Receives one [`ChunkProgress`] per chunk.
pub trait ProgressObserver {
    fn on_chunk(&mut self, progress: &ChunkProgress<'_>);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ChunkProgress<'_>),
{
    fn on_chunk(&mut self, progress: &ChunkProgress<'_>) {
        self(progress)
    }
}

/// Pin a closure to the observer signature so it can be passed as `&mut dyn ProgressObserver`.
pub fn observer_fn<F>(f: F) -> F
where
    F: FnMut(&ChunkProgress<'_>),
{
    f
}

const MAX_WIDTH: u64 = 100;

/// Console observer: redraws the current line as `=====>` with one `=` per percent.
pub struct ConsoleProgressBar<W: Write> {
    out: W,
    fill: char,
    tip: char,
}

impl ConsoleProgressBar<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgressBar<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fill: '=',
            tip: '>',
        }
    }

    pub fn with_chars(mut self, fill: char, tip: char) -> Self {
        self.fill = fill;
        self.tip = tip;
        self
    }

    /// Clear the line and draw `position` fill characters followed by the tip.
    ///
    /// A body longer than its `Content-Length` reports more than 100 percent;
    /// the bar stops at 100.
    pub fn draw(&mut self, position: u64) -> io::Result<()> {
        let width = position.min(MAX_WIDTH) as usize;
        let bar: String = std::iter::repeat(self.fill).take(width).collect();
        write!(self.out, "\r\x1b[0K{}{}", bar, self.tip)?;
        self.out.flush()
    }

    /// Move to a fresh line once the transfer is over.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressObserver for ConsoleProgressBar<W> {
    fn on_chunk(&mut self, progress: &ChunkProgress<'_>) {
        // Display only; a broken terminal must not abort the download.
        let _ = self.draw(progress.current_percent);
    }
}
