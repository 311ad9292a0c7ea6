use std::path::PathBuf;

use lumen_core::CoreError;
use thiserror::Error;

/// Failures reported by a [`crate::storage::PreferenceStorage`] backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on preferences store {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preferences store content is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Storage error during '{operation}' of key '{key}': {source}")]
    Storage {
        operation: &'static str,
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Underlying Core Error: {0}")]
    Core(#[from] CoreError),

    #[error("Preferences controller has already been disposed")]
    Disposed,
}

impl PreferencesError {
    pub fn storage_read(key: &str, source: StorageError) -> Self {
        PreferencesError::Storage { operation: "read", key: key.to_string(), source }
    }
}
