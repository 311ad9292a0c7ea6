//! # Lumen Core Library (`lumen-core`)
//!
//! `lumen-core` is the foundational layer shared by the Lumen developer tools.
//! It owns the ambient concerns every other crate leans on:
//!
//! - **Error Handling**: a unified [`CoreError`] with the more specific
//!   [`ConfigError`] and [`LoggingError`].
//! - **Configuration**: TOML-based [`CoreConfig`] loading with defaults and
//!   validation through [`ConfigLoader`].
//! - **Logging**: `tracing` setup with console and rolling-file output, and a
//!   [`LogLevelHandle`] to change the active level while the tool is running.
//! - **Utilities**: platform directory resolution and small filesystem helpers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lumen_core::config::ConfigLoader;
//! use lumen_core::logging::init_logging;
//! use lumen_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     let level_handle = init_logging(&config.logging)?;
//!
//!     tracing::info!("Lumen core initialized.");
//!     // Hand `level_handle` to whatever needs to flip verbose logging.
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use config::{ConfigLoader, CoreConfig, LoggingConfig, PreferencesConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging, LogLevelHandle};
pub use utils::ensure_dir_exists;
