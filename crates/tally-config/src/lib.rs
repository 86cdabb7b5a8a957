//! Configuration for the tally balance dashboard.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional in the file; a missing file means the built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tally_core::{ColorTheme, DEFAULT_TICK_PERIOD, ParticleConfig};
use thiserror::Error;
use tracing::debug;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Balance to count up to, as written in the page's data attribute.
    pub balance: Option<String>,
    /// Milliseconds between animation ticks.
    pub tick_period_ms: u64,
    pub color_theme: ColorTheme,
    /// Whether the particle background is drawn.
    pub particles_enabled: bool,
    /// Passed unchanged to the particle background.
    pub particles: ParticleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            balance: None,
            tick_period_ms: DEFAULT_TICK_PERIOD.as_millis() as u64,
            color_theme: ColorTheme::default(),
            particles_enabled: true,
            particles: ParticleConfig::default(),
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tally").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults when the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
