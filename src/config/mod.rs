//! Configuration management for relmatch
//!
//! Config lives at `~/.config/relmatch/config.toml` unless `--config` or
//! `RELMATCH_CONFIG` names another file. A missing file means defaults.

pub mod schema;

pub use schema::Config;

use crate::error::{RelmatchError, RelmatchResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Loads and saves the relmatch config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn default_config_path() -> PathBuf {
        base_dir(dirs::config_dir()).join("config.toml")
    }

    /// Directory for state written at runtime (the audit log)
    pub fn state_dir() -> PathBuf {
        base_dir(dirs::state_dir().or_else(dirs::data_local_dir))
    }

    pub fn audit_log_path() -> PathBuf {
        Self::state_dir().join("audit.log")
    }

    /// Read the config file, or defaults when there is none
    pub async fn load(&self) -> RelmatchResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.config_path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(RelmatchError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| RelmatchError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write `config`, creating the parent directory if needed
    pub async fn save(&self, config: &Config) -> RelmatchResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RelmatchError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        fs::write(&self.config_path, toml::to_string_pretty(config)?)
            .await
            .map_err(|e| {
                RelmatchError::io(format!("writing config to {}", self.config_path.display()), e)
            })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn base_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|| PathBuf::from(".")).join("relmatch")
}
