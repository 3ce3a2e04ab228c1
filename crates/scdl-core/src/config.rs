use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::resolver::DEFAULT_API_BASE;
use crate::storage::StorageMode;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Global configuration loaded from `~/.config/scdl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScdlConfig {
    /// API credential sent as `client_id`. Can be overridden on the command line.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Directory for persistent downloads. None = temp files deleted on cleanup.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    /// Scheme, host and port that references are resolved against.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Optional curl receive buffer size in bytes (None = libcurl default).
    #[serde(default)]
    pub buffer_size: Option<usize>,
}

impl Default for ScdlConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            storage_dir: None,
            api_base: default_api_base(),
            buffer_size: None,
        }
    }
}

impl ScdlConfig {
    pub fn storage_mode(&self) -> StorageMode {
        StorageMode::from_dir(self.storage_dir.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("scdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ScdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ScdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
