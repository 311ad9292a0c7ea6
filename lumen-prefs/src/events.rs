use serde::{Deserialize, Serialize};

/// Broadcast whenever a preference change is queued for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceChangedEvent {
    pub key: String,
    /// The value as it is written to storage.
    pub value: String,
}

impl PreferenceChangedEvent {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}
