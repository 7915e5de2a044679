//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] by reading a `FocusConfig` from a JSON file.
//! The path comes from the `FOCUSLINK_CONFIG` environment variable in the
//! host binary.  A missing file means "use defaults"; a file that exists
//! but cannot be read or parsed is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::FocusConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FOCUSLINK_CONFIG";

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Path from [`CONFIG_ENV`], or no file at all.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<FocusConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("JsonConfigFile: no config file set, using defaults");
            return Ok(FocusConfig::default());
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "JsonConfigFile: {} not found, using defaults",
                    path.display()
                );
                return Ok(FocusConfig::default());
            }
            Err(e) => {
                warn!("JsonConfigFile: cannot read {}: {}", path.display(), e);
                return Err(ConfigError::IoError);
            }
        };

        let config: FocusConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("JsonConfigFile: {} is not valid config: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;

        info!("JsonConfigFile: loaded {}", path.display());
        Ok(config)
    }
}
