//! `scdl download <reference>` – resolve, stream to disk, optionally clean up.

use anyhow::{Context, Result};
use scdl_core::{DownloadOptions, Session, Transport};

/// Run resolve + load and print the resulting path.
/// `cleanup` is `Some(force)` when the file should go through `end_stream` afterwards.
pub fn run_download<T: Transport>(
    session: &mut Session<T>,
    reference: &str,
    name: Option<String>,
    display_progress: bool,
    cleanup: Option<bool>,
) -> Result<()> {
    let defaults = DownloadOptions::default();
    let opts = DownloadOptions {
        display_progress,
        file_name: name.unwrap_or(defaults.file_name),
    };
    let path = session
        .download(reference, &opts)
        .with_context(|| format!("download {}", reference))?;
    println!("{}", path.display());

    if let Some(force) = cleanup {
        session.end_stream(force).context("cleanup")?;
        tracing::info!("cleanup done for {} (force={})", path.display(), force);
    }
    Ok(())
}
