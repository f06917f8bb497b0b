//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Platform config file (`config.toml` in the project config directory)
//! 3. A file passed with `--config`
//! 4. Environment variables prefixed with `DUPSWEEP_`
//! 5. Command-line flags (applied by the caller)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DeleteConfig;
use crate::scanner::{WalkerConfig, DEFAULT_PROGRESS_INTERVAL};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPSWEEP_";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A file given explicitly does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or had the wrong types.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// `progress_interval` was zero.
    #[error("progress_interval must be at least 1")]
    ZeroProgressInterval,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files between two progress events during a scan.
    pub progress_interval: usize,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// Move deleted duplicates to the system trash instead of unlinking.
    pub use_trash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            follow_symlinks: false,
            use_trash: false,
        }
    }
}

impl Config {
    /// Load from all layers, including the platform config file.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` does not exist or any layer is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path(), explicit)
    }

    /// Load with a caller-chosen platform file.
    ///
    /// A missing platform file is ignored; a missing explicit file is not.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` does not exist or any layer is invalid.
    pub fn load_from(
        platform: Option<PathBuf>,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = platform {
            log::debug!("Config layer (platform): {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            log::debug!("Config layer (explicit): {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        if config.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(config)
    }

    /// The default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupsweep", "dupsweep")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.follow_symlinks, self.progress_interval)
    }

    /// Deletion settings derived from this configuration.
    #[must_use]
    pub fn delete_config(&self) -> DeleteConfig {
        DeleteConfig {
            use_trash: self.use_trash,
        }
    }

    /// Render as TOML, e.g. as a starting point for a config file.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
