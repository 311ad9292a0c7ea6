//! Configuration management for Lumen.
//!
//! - [`types`]: the schema ([`CoreConfig`], [`LoggingConfig`], [`PreferencesConfig`]).
//! - [`defaults`]: default values used by `serde` for missing fields.
//! - [`loader`]: [`ConfigLoader`], which reads, validates and resolves paths.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "text"
//! file_path = "lumen.log"
//!
//! [preferences]
//! store_path = "preferences.json"
//! dark_mode_default = true
//! event_capacity = 32
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, PreferencesConfig};
