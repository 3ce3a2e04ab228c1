//! Stateful resolve -> load -> cleanup flow for one credential.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::client::Client;
use crate::progress::{ConsoleProgressBar, ProgressObserver};
use crate::resolver::{Resolution, ResolvedUrl};
use crate::storage::StorageMode;
use crate::transport::{CurlTransport, Transport};
use crate::{Error, Result};

/// Resolution state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unresolved,
    Resolved(ResolvedUrl),
}

/// Options for [`Session::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Draw a console progress bar on stdout.
    pub display_progress: bool,
    pub file_name: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            display_progress: true,
            file_name: "unknown".to_string(),
        }
    }
}

/// One client plus the URL it last resolved and the file it last loaded.
///
/// A failed resolve keeps the previously resolved URL. A second load replaces
/// the tracked file without deleting the first one.
#[derive(Debug)]
pub struct Session<T = CurlTransport> {
    client: Client<T>,
    state: SessionState,
    downloaded: Option<PathBuf>,
}

impl Session<CurlTransport> {
    pub fn new(credential: impl Into<String>, storage: StorageMode) -> Self {
        Self::from_client(Client::new(credential, storage))
    }
}

impl<T: Transport> Session<T> {
    pub fn from_client(client: Client<T>) -> Self {
        Self {
            client,
            state: SessionState::Unresolved,
            downloaded: None,
        }
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn resolved_url(&self) -> Option<&ResolvedUrl> {
        match &self.state {
            SessionState::Resolved(url) => Some(url),
            SessionState::Unresolved => None,
        }
    }

    pub fn downloaded_path(&self) -> Option<&Path> {
        self.downloaded.as_deref()
    }

    /// Resolve `reference` and remember the result.
    ///
    /// Returns `Ok(None)` when the API did not redirect; that is not an error
    /// but a later [`Session::load`] will fail unless an earlier resolve succeeded.
    pub fn resolve(&mut self, reference: &str) -> Result<Option<&ResolvedUrl>> {
        match self.client.resolve(reference)? {
            Resolution::Resolved(url) => {
                self.state = SessionState::Resolved(url);
                Ok(self.resolved_url())
            }
            Resolution::Unresolved { .. } => Ok(None),
        }
    }

    /// Download the resolved URL and track the resulting path.
    pub fn load(
        &mut self,
        name: Option<&str>,
        observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<PathBuf> {
        let resolved = match &self.state {
            SessionState::Resolved(url) => url,
            SessionState::Unresolved => return Err(Error::Unresolved),
        };
        let path = self.client.fetch(resolved, name, observer)?;
        self.downloaded = Some(path.clone());
        Ok(path)
    }

    /// Resolve then load, drawing a console progress bar on stdout if requested.
    pub fn download(&mut self, reference: &str, opts: &DownloadOptions) -> Result<PathBuf> {
        let name = Some(opts.file_name.as_str());
        if opts.display_progress {
            self.download_with_bar(reference, name, &mut ConsoleProgressBar::stdout())
        } else {
            self.download_with(reference, name, None)
        }
    }

    /// Resolve then load into `bar`, ending its line whether or not the load succeeded.
    pub fn download_with_bar<W: Write>(
        &mut self,
        reference: &str,
        name: Option<&str>,
        bar: &mut ConsoleProgressBar<W>,
    ) -> Result<PathBuf> {
        let result = self.download_with(reference, name, Some(&mut *bar));
        if let Err(err) = bar.finish() {
            tracing::warn!("could not finish progress line: {}", err);
        }
        result
    }

    /// Resolve then load with a caller-supplied observer.
    pub fn download_with(
        &mut self,
        reference: &str,
        name: Option<&str>,
        observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<PathBuf> {
        self.resolve(reference)?;
        self.load(name, observer)
    }

    /// Delete the last loaded file if the storage mode calls for it.
    ///
    /// Ephemeral files are always deleted; persistent ones only with `force`.
    /// The tracked path is kept, so deleting twice surfaces `NotFound`.
    pub fn end_stream(&self, force: bool) -> Result<()> {
        let path = self.downloaded.as_deref().ok_or(Error::NothingToClean)?;
        if self.client.storage().removes_on_cleanup(force) {
            fs::remove_file(path)?;
            tracing::info!("removed {}", path.display());
        } else {
            tracing::debug!("keeping {}", path.display());
        }
        Ok(())
    }
}
