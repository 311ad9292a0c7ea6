//! Conversions between preference values and their stored strings.

use tracing::warn;

use crate::error::{PreferencesError, StorageError};
use crate::storage::PreferenceStorage;

/// A value that can round-trip through the string-only preference store.
pub trait StoredValue: Sized {
    fn to_stored(&self) -> String;
    /// `None` when `raw` is not a valid encoding of `Self`.
    fn from_stored(raw: &str) -> Option<Self>;
}

impl StoredValue for bool {
    fn to_stored(&self) -> String {
        self.to_string()
    }

    fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl StoredValue for usize {
    fn to_stored(&self) -> String {
        self.to_string()
    }

    fn from_stored(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl StoredValue for String {
    fn to_stored(&self) -> String {
        self.clone()
    }

    fn from_stored(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Interprets a stored boolean relative to its default.
///
/// With `defaults_to == true` anything but an explicit `"false"` reads as `true`;
/// with `defaults_to == false` only an explicit `"true"` reads as `true`.
pub fn parse_bool(raw: Option<&str>, defaults_to: bool) -> bool {
    if defaults_to {
        raw != Some("false")
    } else {
        raw == Some("true")
    }
}

/// Reads `key` and interprets it with [`parse_bool`].
pub async fn bool_value_from_storage(
    storage: &dyn PreferenceStorage,
    key: &str,
    defaults_to: bool,
) -> Result<bool, PreferencesError> {
    let raw = read(storage, key).await?;
    Ok(parse_bool(raw.as_deref(), defaults_to))
}

/// Reads `key` as a `T`, falling back to `default` when it is absent or unparsable.
pub async fn value_from_storage<T: StoredValue>(
    storage: &dyn PreferenceStorage,
    key: &str,
    default: T,
) -> Result<T, PreferencesError> {
    match read(storage, key).await? {
        None => Ok(default),
        Some(raw) => match T::from_stored(&raw) {
            Some(value) => Ok(value),
            None => {
                warn!("Ignoring unparsable stored value '{}' for preference '{}'.", raw, key);
                Ok(default)
            }
        },
    }
}

async fn read(storage: &dyn PreferenceStorage, key: &str) -> Result<Option<String>, PreferencesError> {
    storage
        .get_value(key)
        .await
        .map_err(|e: StorageError| PreferencesError::storage_read(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStorage, MockPreferenceStorage};

    #[test]
    fn test_parse_bool_default_true() {
        assert!(parse_bool(None, true));
        assert!(parse_bool(Some("true"), true));
        assert!(parse_bool(Some("garbage"), true));
        assert!(!parse_bool(Some("false"), true));
    }

    #[test]
    fn test_parse_bool_default_false() {
        assert!(!parse_bool(None, false));
        assert!(!parse_bool(Some("garbage"), false));
        assert!(!parse_bool(Some("false"), false));
        assert!(parse_bool(Some("true"), false));
    }

    #[test]
    fn test_usize_from_stored() {
        assert_eq!(usize::from_stored("3000"), Some(3000));
        assert_eq!(usize::from_stored(" 42 "), Some(42));
        assert_eq!(usize::from_stored("-1"), None);
        assert_eq!(usize::from_stored("lots"), None);
    }

    #[tokio::test]
    async fn test_value_from_storage_falls_back_on_garbage() {
        let storage = InMemoryStorage::with_values([("logging.retentionLimit", "many")]);
        let value = value_from_storage(&storage, "logging.retentionLimit", 3000usize).await.unwrap();
        assert_eq!(value, 3000);
    }

    #[tokio::test]
    async fn test_read_failure_is_propagated() {
        let mut storage = MockPreferenceStorage::new();
        storage
            .expect_get_value()
            .returning(|_| Err(StorageError::Backend("unavailable".to_string())));

        let result = bool_value_from_storage(&storage, "ui.vmDeveloperMode", false).await;
        match result {
            Err(PreferencesError::Storage { operation, key, .. }) => {
                assert_eq!(operation, "read");
                assert_eq!(key, "ui.vmDeveloperMode");
            }
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }
}
