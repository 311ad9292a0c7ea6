//! Platform directory resolution for Lumen.
//!
//! Relies on `directories-next`. All functions yield
//! [`CoreError::Config(ConfigError::DirectoryUnavailable)`] when the directory
//! cannot be determined (e.g., no HOME directory).
//!
//! - [`get_app_config_dir()`]: e.g. `~/.config/lumen` on Linux.
//! - [`get_app_state_dir()`]: e.g. `~/.local/state/Lumen/Lumen` on Linux.

use std::path::PathBuf;

use directories_next::{BaseDirs, ProjectDirs};

use crate::error::{ConfigError, CoreError};

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "Lumen";
const APPLICATION: &str = "Lumen";

/// Returns the base directory for user state files (`$XDG_STATE_HOME`).
///
/// `directories-next` has no state directory, so Linux follows XDG by hand and
/// every other platform falls back to the local data directory.
pub fn get_state_base_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}

/// Returns Lumen's configuration directory. `config.toml` and the default
/// preferences store live here.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}

/// Returns Lumen's state directory, used for relative log file paths.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    get_state_base_dir().map(|base| base.join(ORGANIZATION).join(APPLICATION))
}
