use crate::rule::RenameMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-folder settings directory
pub const CONFIG_DIR: &str = ".batch-rename";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "summary", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to list nested folders by default
    #[serde(default)]
    pub recursive: bool,

    /// Default rename mode
    #[serde(default)]
    pub mode: RenameMode,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Whether to issue renames in parallel by default
    #[serde(default)]
    pub parallel: bool,

    /// Append an apply journal to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            recursive: false,
            mode: RenameMode::default(),
            use_color: None,
            parallel: false,
            log_file: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

impl Config {
    /// Load config from .batch-rename/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
