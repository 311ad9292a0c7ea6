//! The key-value store preferences are persisted in.
//!
//! Every value is a string: booleans are written as `"true"`/`"false"`, numbers in
//! decimal, enumerations by name. A missing key is `Ok(None)`, never an error.

use async_trait::async_trait;

use crate::error::StorageError;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::InMemoryStorage;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceStorage: Send + Sync {
    /// Reads the stored string for `key`, or `None` if nothing was ever written.
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set_value(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
