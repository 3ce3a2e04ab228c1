//! Destination files and their lifecycle.
//!
//! A session either persists downloads under a directory (`<dir>/<name>.mp3`,
//! reused on later loads) or writes each one to a fresh temporary file that
//! cleanup always deletes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

/// Suffix of every downloaded file.
pub const FILE_EXTENSION: &str = "mp3";

/// Prefix of ephemeral temp files, so stray ones are recognisable in `/tmp`.
const TEMP_PREFIX: &str = "scdl";

/// Where a session puts its downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// Keep downloads in this directory; an existing file is a cache hit.
    Persistent(PathBuf),
    /// One unique temp file per download, removed by cleanup regardless of `force`.
    Ephemeral,
}

/// Resolved destination for one load.
///
/// An ephemeral destination owns its temp file until [`Destination::keep`];
/// dropping it first (a failed transfer) deletes the file.
#[derive(Debug)]
pub struct Destination {
    pub path: PathBuf,
    /// True if a file was already present at `path` before this load.
    pub cached: bool,
    temp: Option<TempPath>,
}

impl Destination {
    /// Release the file to the caller and return its path.
    pub fn keep(self) -> io::Result<PathBuf> {
        if let Some(temp) = self.temp {
            temp.keep().map_err(|e| e.error)?;
        }
        Ok(self.path)
    }
}

impl StorageMode {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => StorageMode::Persistent(dir),
            None => StorageMode::Ephemeral,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        match self {
            StorageMode::Persistent(dir) => Some(dir),
            StorageMode::Ephemeral => None,
        }
    }

    /// Compute the destination for `name`.
    ///
    /// Persistent: creates the directory (one level only) when missing and
    /// reports whether `<dir>/<name>.mp3` already exists. The check is not
    /// atomic with the later create; two sessions may both decide to download.
    /// Ephemeral: creates a new empty temp file and ignores `name`; it is
    /// removed again unless the destination is kept.
    pub fn destination(&self, name: &str) -> io::Result<Destination> {
        match self {
            StorageMode::Persistent(dir) => {
                if !dir.is_dir() {
                    fs::create_dir(dir)?;
                    tracing::debug!("created storage directory {}", dir.display());
                }
                let path = dir.join(format!("{}.{}", name, FILE_EXTENSION));
                let cached = path.exists();
                Ok(Destination {
                    path,
                    cached,
                    temp: None,
                })
            }
            StorageMode::Ephemeral => {
                let temp = tempfile::Builder::new()
                    .prefix(TEMP_PREFIX)
                    .suffix(&format!(".{}", FILE_EXTENSION))
                    .tempfile()?
                    .into_temp_path();
                Ok(Destination {
                    path: temp.to_path_buf(),
                    cached: false,
                    temp: Some(temp),
                })
            }
        }
    }

    /// Whether cleanup deletes the tracked file.
    pub fn removes_on_cleanup(&self, force: bool) -> bool {
        match self {
            StorageMode::Persistent(_) => force,
            StorageMode::Ephemeral => true,
        }
    }
}

/// Random default file name: 16 random bytes, hex-encoded.
pub fn random_name() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}
