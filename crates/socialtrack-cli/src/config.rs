//! Configuration file management for strack.
//!
//! Provides a TOML-based config file at `~/.config/socialtrack/config.toml`
//! and a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use socialtrack_store::MonthStore;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub storage: StorageSection,
    pub export: ExportSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSection {
    /// Directory holding the month snapshot file.
    pub data_dir: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSection {
    /// Directory report artifacts are written into.
    pub output_dir: String,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the strack config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/socialtrack` or
/// `~/.config/socialtrack`. We intentionally ignore the platform-specific
/// `dirs::config_dir()` (which returns `~/Library/Application Support` on
/// macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("socialtrack");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("socialtrack")
}

/// Return the path to the strack config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct StrackConfig {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl StrackConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Data dir: `cli_data_dir` > `STRACK_DATA_DIR` env >
    ///   `config_file.storage.data_dir` > [`MonthStore::default_data_dir`]
    /// - Export dir: `STRACK_EXPORT_DIR` env > `config_file.export.output_dir`
    ///   > current directory
    pub fn resolve(cli_data_dir: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let data_dir = if let Some(dir) = cli_data_dir {
            PathBuf::from(dir)
        } else if let Ok(dir) = std::env::var("STRACK_DATA_DIR") {
            PathBuf::from(dir)
        } else if let Some(ref cfg) = file_config {
            PathBuf::from(&cfg.storage.data_dir)
        } else {
            MonthStore::default_data_dir()
        };

        let export_dir = if let Ok(dir) = std::env::var("STRACK_EXPORT_DIR") {
            PathBuf::from(dir)
        } else if let Some(ref cfg) = file_config {
            PathBuf::from(&cfg.export.output_dir)
        } else {
            PathBuf::from(".")
        };

        Ok(Self {
            data_dir,
            export_dir,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
