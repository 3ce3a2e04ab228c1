//! Log setup for the `scdl` binary.
//!
//! Records go to `$XDG_STATE_HOME/scdl/scdl.log` when that file can be opened,
//! otherwise to stderr. `SCDL_LOG` overrides the filter (`EnvFilter` syntax).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "scdl.log";

/// Environment variable holding a filter directive.
pub const FILTER_ENV: &str = "SCDL_LOG";

/// Library chatter stays at warn; our own crates log request targets and cache hits.
const DEFAULT_FILTER: &str = "warn,scdl=debug,scdl_core=debug";

/// Where the installed subscriber writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open (append) the log file inside `dir`, creating `dir` as needed.
fn open_log_file_in(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn open_log_file() -> Result<(PathBuf, File)> {
    let dirs = xdg::BaseDirectories::with_prefix("scdl")?;
    let path = dirs
        .place_state_file(LOG_FILE)
        .context("cannot create scdl state directory")?;
    let dir = path.parent().unwrap_or(Path::new("."));
    open_log_file_in(dir).with_context(|| format!("cannot open {}", path.display()))
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Install the global subscriber.
///
/// Falls back to stderr when the log file is unusable; fails only if a
/// subscriber is already installed.
pub fn init() -> Result<LogTarget> {
    match open_log_file() {
        Ok((path, file)) => {
            install(Mutex::new(file))?;
            tracing::debug!("logging to {}", path.display());
            Ok(LogTarget::File(path))
        }
        Err(err) => {
            install(io::stderr)?;
            tracing::warn!("file logging unavailable: {:#}", err);
            Ok(LogTarget::Stderr)
        }
    }
}
