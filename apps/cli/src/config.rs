//! Configuration file for the CLI.
//!
//! Resolved in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `~/.config/llmapi/config.toml` (global default)
//! 3. built-in defaults

use anyhow::{Context, Result, bail};
use client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config directory name under platform config dir.
pub const CONFIG_DIR: &str = "llmapi";
/// Config file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Default config template written by `llmapi init`.
pub const DEFAULT_CONFIG: &str = r#"[client]
host_name = "http://localhost:8000"
request_timeout = 600.0
streaming = false
verbose = false

[client.params]
n_predict = 300
temp = 0.2
"#;

/// Top-level CLI configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.client.validate()?;
        Ok(config)
    }

    /// Resolve the configuration following the priority chain.
    pub fn resolve(flag: Option<&Path>) -> Result<Self> {
        if let Some(path) = flag {
            return Self::load(path);
        }

        let global = global_config_path();
        if global.exists() {
            return Self::load(&global);
        }

        tracing::debug!("no config at {}, using defaults", global.display());
        Ok(Self::default())
    }

    /// Write the default template to `path`. Refuses to overwrite.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("failed to write default config to {}", path.display()))?;
        tracing::info!("generated default config at {}", path.display());
        Ok(())
    }
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}
