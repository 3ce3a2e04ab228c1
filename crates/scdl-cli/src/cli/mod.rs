//! CLI for scdl.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scdl_core::config::{self, ScdlConfig};
use scdl_core::{Client, CurlTransport, Session, StorageMode};
use std::path::PathBuf;

use commands::{run_download, run_resolve};

/// Top-level CLI for scdl.
#[derive(Debug, Parser)]
#[command(name = "scdl")]
#[command(about = "scdl: resolve SoundCloud API references and download the audio", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the direct media URL an API reference redirects to.
    Resolve {
        /// API reference URL, e.g. https://api.soundcloud.com/tracks/42/stream.
        reference: String,
        /// API client id (overrides `client_id` in config.toml).
        #[arg(long, value_name = "ID")]
        client_id: Option<String>,
    },

    /// Resolve a reference and download the audio.
    Download {
        /// API reference URL.
        reference: String,
        /// File name without extension (default "unknown"; ignored without a directory).
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
        /// Keep downloads in this directory instead of a temp file.
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// API client id (overrides `client_id` in config.toml).
        #[arg(long, value_name = "ID")]
        client_id: Option<String>,
        /// Do not draw the progress bar.
        #[arg(long)]
        no_progress: bool,
        /// Delete the downloaded file afterwards (temp files only, unless --force).
        #[arg(long)]
        clean: bool,
        /// With --clean, also delete files kept in --dir.
        #[arg(long, requires = "clean")]
        force: bool,
    },
}

/// Build a session from config plus command-line overrides.
pub(crate) fn build_session(
    cfg: &ScdlConfig,
    client_id: Option<String>,
    dir: Option<PathBuf>,
) -> Result<Session<CurlTransport>> {
    let client_id = client_id
        .or_else(|| cfg.client_id.clone())
        .context("no client id: pass --client-id or set client_id in config.toml")?;
    let storage = match dir {
        Some(dir) => StorageMode::Persistent(dir),
        None => cfg.storage_mode(),
    };
    let transport = CurlTransport::new().with_buffer_size(cfg.buffer_size);
    let client = Client::with_transport(client_id, storage, transport)
        .with_api_base(cfg.api_base.clone());
    Ok(Session::from_client(client))
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                reference,
                client_id,
            } => {
                let mut session = build_session(&cfg, client_id, None)?;
                run_resolve(&mut session, &reference)?;
            }
            CliCommand::Download {
                reference,
                name,
                dir,
                client_id,
                no_progress,
                clean,
                force,
            } => {
                let mut session = build_session(&cfg, client_id, dir)?;
                let cleanup = clean.then_some(force);
                run_download(&mut session, &reference, name, !no_progress, cleanup)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
