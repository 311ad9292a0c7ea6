//! Configuration loading.
//!
//! [`ConfigLoader`] locates, parses, validates and path-resolves a [`CoreConfig`].
//!
//! ```rust,ignore
//! use lumen_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("Logging level: {}", config.logging.level),
//!     Err(e) => {
//!         lumen_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```
//!
//! `load()` reads `config.toml` from the app config directory and falls back to
//! defaults when the file does not exist. After parsing, log level and format are
//! normalized, the relative log file path is resolved against the app state
//! directory, and the preferences store path is resolved against the app config
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs::ensure_dir_exists;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

/// File name of the main configuration inside the app config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// File name of the preferences store when no explicit path is configured.
pub const DEFAULT_STORE_FILE_NAME: &str = "preferences.json";

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config.toml` from the app config directory.
    ///
    /// # Errors
    /// - [`ConfigError::DirectoryUnavailable`] if the config directory cannot be determined.
    /// - [`ConfigError::ReadError`] for read failures other than "not found".
    /// - [`ConfigError::ParseError`] / [`ConfigError::ValidationError`] for bad content.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let config_path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&config_path)
    }

    /// Loads the configuration from an explicit file. A missing or empty file
    /// yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration at {:?}; using defaults.", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                config
            }
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }));
            }
        };
        Self::resolve_paths(&mut config)?;
        Ok(config)
    }

    /// Parses and validates TOML content without touching the filesystem.
    pub fn parse(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Normalizes the log level and format and checks the preference settings.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => config.logging.level = level_lower,
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => config.logging.format = format_lower,
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if config.preferences.event_capacity == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "preferences.event_capacity must be greater than zero.".to_string(),
            )));
        }
        Ok(())
    }

    /// Makes the log file and preferences store paths absolute and creates the
    /// log file's parent directory.
    fn resolve_paths(config: &mut CoreConfig) -> Result<(), CoreError> {
        if let Some(log_path) = &config.logging.file_path {
            let absolute = if log_path.is_absolute() {
                log_path.clone()
            } else {
                get_app_state_dir()?.join(log_path)
            };
            if let Some(parent) = absolute.parent() {
                ensure_dir_exists(parent)?;
            }
            config.logging.file_path = Some(absolute);
        }

        config.preferences.store_path = Some(Self::store_path(config)?);
        Ok(())
    }

    /// The absolute preferences store path of `config`.
    ///
    /// Relative paths resolve under the app config directory, whether or not the
    /// configuration went through [`ConfigLoader::load_from_path`].
    pub fn store_path(config: &CoreConfig) -> Result<PathBuf, CoreError> {
        match &config.preferences.store_path {
            Some(path) if path.is_absolute() => Ok(path.clone()),
            Some(path) => Ok(get_app_config_dir()?.join(path)),
            None => Ok(get_app_config_dir()?.join(DEFAULT_STORE_FILE_NAME)),
        }
    }
}
