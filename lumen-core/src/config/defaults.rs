//! Default configuration values.
//!
//! Referenced by `serde`'s `default` attribute on the configuration structs.

use std::path::PathBuf;

use super::types::{LoggingConfig, PreferencesConfig};

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_preferences_config() -> PreferencesConfig {
    PreferencesConfig {
        store_path: default_store_path(),
        dark_mode_default: default_dark_mode(),
        event_capacity: default_event_capacity(),
    }
}

/// No explicit store: the preferences file lives in the app config dir.
pub(crate) fn default_store_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_dark_mode() -> bool {
    true
}

pub(crate) fn default_event_capacity() -> usize {
    32
}
