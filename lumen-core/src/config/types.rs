//! Configuration data structures.
//!
//! - [`CoreConfig`]: the root configuration structure.
//! - [`LoggingConfig`]: settings for the logging subsystem.
//! - [`PreferencesConfig`]: where user preferences are stored and how they default.
//!
//! Missing fields take their values from [`super::defaults`]; unknown fields are
//! rejected via `#[serde(deny_unknown_fields)]`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use lumen_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/lumen.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/lumen.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the app state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Where user preferences are persisted and the defaults that are not fixed in code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesConfig {
    /// Path of the JSON preferences file. Relative paths are resolved against the
    /// app config directory; `None` means `<config dir>/preferences.json`.
    #[serde(default = "defaults::default_store_path")]
    pub store_path: Option<PathBuf>,
    /// Theme used when no dark-mode preference has been stored yet.
    #[serde(default = "defaults::default_dark_mode")]
    pub dark_mode_default: bool,
    /// Capacity of the preference-change broadcast channel.
    #[serde(default = "defaults::default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        defaults::default_preferences_config()
    }
}

/// Root configuration structure.
///
/// ```
/// use lumen_core::config::CoreConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [preferences]
/// dark_mode_default = false
/// "#;
/// let config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.logging.format, "text");
/// assert!(!config.preferences.dark_mode_default);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_preferences_config")]
    pub preferences: PreferencesConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logging_config_default_values() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file_path, None);
        assert_eq!(config.format, "text");
    }

    #[test]
    fn test_preferences_config_default_values() {
        let config = PreferencesConfig::default();
        assert_eq!(config.store_path, None);
        assert!(config.dark_mode_default);
        assert_eq!(config.event_capacity, 32);
    }

    #[test]
    fn test_core_config_deserialize_empty() {
        let config: CoreConfig = toml::from_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn test_core_config_deserialize_partial_preferences() {
        let config: CoreConfig = toml::from_str(
            r#"
            [preferences]
            store_path = "/tmp/prefs.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.preferences.store_path, Some(PathBuf::from("/tmp/prefs.json")));
        assert!(config.preferences.dark_mode_default);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_logging_config_deserialize_unknown_field() {
        let result = toml::from_str::<LoggingConfig>(
            r#"
            level = "info"
            unknown_field = "value"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_core_config_deserialize_unknown_section() {
        let result = toml::from_str::<CoreConfig>("[compositor]\nvsync = true\n");
        assert!(result.is_err());
    }
}
