//! Stateless client: credential, storage mode and transport.
//!
//! [`Client::fetch`] only accepts a [`ResolvedUrl`], so "load before resolve"
//! cannot be written against this type. [`crate::session::Session`] layers the
//! stateful resolve/load/cleanup flow on top.

use std::path::PathBuf;

use crate::progress::ProgressObserver;
use crate::resolver::{self, Resolution, ResolvedUrl, DEFAULT_API_BASE};
use crate::storage::{self, StorageMode};
use crate::transfer;
use crate::transport::{CurlTransport, Transport};
use crate::Result;

#[derive(Debug)]
pub struct Client<T = CurlTransport> {
    credential: String,
    storage: StorageMode,
    api_base: String,
    transport: T,
}

impl Client<CurlTransport> {
    pub fn new(credential: impl Into<String>, storage: StorageMode) -> Self {
        Self::with_transport(credential, storage, CurlTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(credential: impl Into<String>, storage: StorageMode, transport: T) -> Self {
        Self {
            credential: credential.into(),
            storage,
            api_base: DEFAULT_API_BASE.to_string(),
            transport,
        }
    }

    /// Send resolve requests to another API host (scheme, host and port are used).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn storage(&self) -> &StorageMode {
        &self.storage
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolve(&self, reference: &str) -> Result<Resolution> {
        resolver::resolve(&self.transport, &self.api_base, reference, &self.credential)
    }

    /// Download `resolved` into this client's storage and return the file path.
    ///
    /// `name` defaults to a random hex id and is ignored in ephemeral mode.
    /// An existing persistent file is returned as-is without any request.
    pub fn fetch(
        &self,
        resolved: &ResolvedUrl,
        name: Option<&str>,
        observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<PathBuf> {
        let url = resolved.parse()?;
        let name = name.map(str::to_owned).unwrap_or_else(storage::random_name);
        let destination = self.storage.destination(&name)?;

        if destination.cached {
            tracing::debug!("{} already present, skipping download", destination.path.display());
            return Ok(destination.keep()?);
        }

        // On error `destination` is dropped here, which deletes an ephemeral file.
        transfer::stream_to_file(&self.transport, &url, &destination.path, observer)?;
        Ok(destination.keep()?)
    }
}
