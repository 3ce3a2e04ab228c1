//! Turning an API reference into a direct, time-limited media URL.
//!
//! The API answers an authenticated GET on the reference's path with a 302
//! whose `Location` is the media URL. Anything else means "not resolved".

use std::fmt;

use url::Url;

use crate::transport::Transport;
use crate::Result;

/// API host every reference is sent to; the reference's own host is ignored.
pub const DEFAULT_API_BASE: &str = "https://api.soundcloud.com";

/// Query parameter carrying the credential.
pub const CREDENTIAL_PARAM: &str = "client_id";

/// Direct media URL taken verbatim from a 302 `Location` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl(String);

impl ResolvedUrl {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn parse(&self) -> Result<Url> {
        Ok(Url::parse(&self.0)?)
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one resolve request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedUrl),
    /// The API answered something other than 302 with a `Location`.
    Unresolved { status: u32 },
}

impl Resolution {
    pub fn resolved(&self) -> Option<&ResolvedUrl> {
        match self {
            Resolution::Resolved(url) => Some(url),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn into_resolved(self) -> Option<ResolvedUrl> {
        match self {
            Resolution::Resolved(url) => Some(url),
            Resolution::Unresolved { .. } => None,
        }
    }
}

/// Build the API request: `api_base` host, the reference's path and query,
/// plus `client_id=<credential>`.
pub fn api_request_url(api_base: &Url, reference: &Url, credential: &str) -> Url {
    let mut url = api_base.clone();
    url.set_path(reference.path());
    url.set_query(reference.query());
    url.query_pairs_mut()
        .append_pair(CREDENTIAL_PARAM, credential);
    url
}

/// Parse `reference`, issue one GET without following redirects, and read the redirect target.
pub fn resolve<T>(transport: &T, api_base: &str, reference: &str, credential: &str) -> Result<Resolution>
where
    T: Transport + ?Sized,
{
    let reference = Url::parse(reference)?;
    let api_base = Url::parse(api_base)?;
    let request = api_request_url(&api_base, &reference, credential);

    tracing::debug!("resolving {}{}", request.host_str().unwrap_or(""), request.path());
    let head = transport.get_head(&request)?;

    match (head.status, head.location) {
        (302, Some(location)) => {
            tracing::debug!("resolved {} -> {}", reference, location);
            Ok(Resolution::Resolved(ResolvedUrl(location)))
        }
        (status, _) => {
            tracing::debug!("{} not resolved (HTTP {})", reference, status);
            Ok(Resolution::Unresolved { status })
        }
    }
}
