//! libcurl-backed transport (blocking easy handle).

use std::cell::RefCell;
use std::str;

use url::Url;

use super::parse::apply_header_line;
use super::{ChunkSink, ResponseHead, Transport};
use crate::{Error, Result};

/// Blocking transport built on a fresh `curl::easy::Easy` per request.
///
/// Redirects are never followed and no timeouts are set beyond libcurl's defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlTransport {
    buffer_size: Option<usize>,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive buffer size hint; bounds the size of the chunks handed to the sink.
    pub fn with_buffer_size(mut self, size: Option<usize>) -> Self {
        self.buffer_size = size;
        self
    }

    fn easy(&self, url: &Url) -> Result<curl::easy::Easy> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(false)?;
        if let Some(sz) = self.buffer_size {
            easy.buffer_size(sz)?;
        }
        Ok(easy)
    }
}

impl Transport for CurlTransport {
    fn get_head(&self, url: &Url) -> Result<ResponseHead> {
        let mut easy = self.easy(url)?;
        let mut head = ResponseHead::default();

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    apply_header_line(&mut head, s);
                }
                true
            })?;
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()?;
        }

        head.status = easy.response_code()?;
        tracing::debug!("GET {} -> HTTP {}", url, head.status);
        Ok(head)
    }

    fn get_streaming(&self, url: &Url, sink: &mut ChunkSink<'_>) -> Result<ResponseHead> {
        let mut easy = self.easy(url)?;
        let head = RefCell::new(ResponseHead::default());
        let sink_error: RefCell<Option<Error>> = RefCell::new(None);

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    apply_header_line(&mut head.borrow_mut(), s);
                }
                true
            })?;
            transfer.write_function(|data| match sink(&head.borrow(), data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    sink_error.borrow_mut().replace(e);
                    Ok(0) // abort transfer
                }
            })?;
            if let Err(e) = transfer.perform() {
                if e.is_write_error() {
                    if let Some(err) = sink_error.borrow_mut().take() {
                        return Err(err);
                    }
                }
                return Err(Error::Transport(e));
            }
        }

        let mut head = head.into_inner();
        head.status = easy.response_code()?;
        tracing::debug!("GET {} -> HTTP {} (streamed)", url, head.status);
        Ok(head)
    }
}
