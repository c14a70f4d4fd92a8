use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::DEFAULT_CHUNK_SIZE;

/// Console output format for verification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
}

/// What relative paths in a manifest are relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathBase {
    /// The current working directory.
    #[default]
    Cwd,
    /// The directory containing the manifest file.
    Manifest,
}

/// Global configuration loaded from `~/.config/fic/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FicConfig {
    /// Read chunk size in bytes when hashing.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// "text" (default) or "jsonl".
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Exit nonzero when any entry fails. Off by default: per-file failures only show in the output.
    #[serde(default)]
    pub fail_on_mismatch: bool,
    /// "cwd" (default) or "manifest".
    #[serde(default)]
    pub path_base: PathBase,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for FicConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_format: OutputFormat::Text,
            fail_on_mismatch: false,
            path_base: PathBase::Cwd,
        }
    }
}

impl FicConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than 0");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fic")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<FicConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FicConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FicConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FicConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
