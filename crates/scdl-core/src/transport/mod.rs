//! HTTP transport seam.
//!
//! The resolver and the transferer only talk to the network through
//! [`Transport`]. [`CurlTransport`] is the production implementation (libcurl
//! easy handle, blocking); tests plug in recording fakes.

mod easy;
mod parse;

pub use easy::CurlTransport;

use url::Url;

use crate::Result;

/// Status line and the headers this crate cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// HTTP status code (0 if the status line was unparseable).
    pub status: u32,
    /// `Location` header, verbatim.
    pub location: Option<String>,
    /// `Content-Length` header, if present and numeric.
    pub content_length: Option<u64>,
}

/// Callback receiving each body chunk together with the head of the response it belongs to.
///
/// Returning an error aborts the transfer; the transport must hand that exact
/// error back to its caller.
pub type ChunkSink<'a> = dyn FnMut(&ResponseHead, &[u8]) -> Result<()> + 'a;

/// Blocking HTTP GET, one request per call, never retried.
pub trait Transport {
    /// GET `url` without following redirects and discard the body.
    fn get_head(&self, url: &Url) -> Result<ResponseHead>;

    /// GET `url` and pass every body chunk to `sink` in arrival order.
    ///
    /// The response status is reported but not judged.
    fn get_streaming(&self, url: &Url, sink: &mut ChunkSink<'_>) -> Result<ResponseHead>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_head(&self, url: &Url) -> Result<ResponseHead> {
        (**self).get_head(url)
    }

    fn get_streaming(&self, url: &Url, sink: &mut ChunkSink<'_>) -> Result<ResponseHead> {
        (**self).get_streaming(url, sink)
    }
}
