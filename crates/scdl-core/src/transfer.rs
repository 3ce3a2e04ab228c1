//! Streaming GET of a resolved media URL into a destination file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use url::Url;

use crate::progress::{ChunkProgress, ProgressObserver};
use crate::transport::Transport;
use crate::Result;

/// Outcome of one streamed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    /// HTTP status of the media response. Reported, never checked.
    pub status: u32,
    pub bytes_written: u64,
    pub chunks: u64,
}

/// Stream `url` into `path`, chunk by chunk, in arrival order.
///
/// The file is created (truncating) when the first chunk arrives, or after
/// the response completes if the body was empty, and closed before return.
/// When `observer` is set, each chunk is reported before it is written; a
/// missing `Content-Length` then aborts with [`crate::Error::Division`].
pub fn stream_to_file<T>(
    transport: &T,
    url: &Url,
    path: &Path,
    mut observer: Option<&mut dyn ProgressObserver>,
) -> Result<TransferSummary>
where
    T: Transport + ?Sized,
{
    let mut file: Option<File> = None;
    let mut received: u64 = 0;
    let mut chunks: u64 = 0;

    let head = transport.get_streaming(url, &mut |head, chunk| {
        if file.is_none() {
            file = Some(File::create(path)?);
        }
        received += chunk.len() as u64;
        chunks += 1;
        if let Some(observer) = observer.as_deref_mut() {
            let progress = ChunkProgress::compute(head.content_length, received, chunk)?;
            observer.on_chunk(&progress);
        }
        if let Some(out) = file.as_mut() {
            out.write_all(chunk)?;
        }
        Ok(())
    })?;

    match file {
        Some(mut f) => f.flush()?,
        None => {
            File::create(path)?;
        }
    }

    tracing::info!(
        "wrote {} bytes in {} chunks to {} (HTTP {})",
        received,
        chunks,
        path.display(),
        head.status
    );

    Ok(TransferSummary {
        status: head.status,
        bytes_written: received,
        chunks,
    })
}
