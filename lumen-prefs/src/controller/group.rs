use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};
use crate::storage::PreferenceStorage;
use crate::values::{bool_value_from_storage, value_from_storage, StoredValue};
use crate::write_back::WriteBack;

/// A set of related preferences loaded and persisted together.
#[async_trait]
pub trait PreferenceGroup: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Loads every preference of the group and starts persisting changes.
    async fn init(&self) -> Result<(), PreferencesError>;

    /// Detaches the group's persistence listeners.
    fn dispose(&self);
}

/// Shared plumbing handed to every preference group.
#[derive(Clone)]
pub struct GroupContext {
    storage: Arc<dyn PreferenceStorage>,
    write_back: Arc<WriteBack>,
}

impl GroupContext {
    pub fn new(storage: Arc<dyn PreferenceStorage>, write_back: Arc<WriteBack>) -> Self {
        Self { storage, write_back }
    }

    fn storage(&self) -> &dyn PreferenceStorage {
        self.storage.as_ref()
    }

    pub async fn load_bool(&self, key: &str, defaults_to: bool) -> Result<bool, PreferencesError> {
        let value = bool_value_from_storage(self.storage(), key, defaults_to).await?;
        debug!("Loaded preference '{}' = {}.", key, value);
        Ok(value)
    }

    pub async fn load<T: StoredValue>(&self, key: &str, default: T) -> Result<T, PreferencesError> {
        value_from_storage(self.storage(), key, default).await
    }

    /// Writes `observable` back to `key` every time it changes, until `registry`
    /// cancels its listeners.
    ///
    /// The current value is written, not the notified one, so a listener that
    /// sets the observable again while being notified cannot leave a stale value
    /// as the last write.
    pub fn persist_on_change<T>(&self, registry: &ListenerRegistry, observable: &Observable<T>, key: &'static str)
    where
        T: StoredValue + Clone + PartialEq + Send + Sync + 'static,
    {
        let write_back = Arc::clone(&self.write_back);
        let current = observable.downgrade();
        registry.listen(observable, move |_: &T| {
            if let Some(current) = current.upgrade() {
                write_back.enqueue(key, current.get().to_stored());
            }
        });
    }

    /// Loads a boolean into `observable` and persists later changes.
    pub async fn bind_bool(
        &self,
        registry: &ListenerRegistry,
        observable: &Observable<bool>,
        key: &'static str,
        defaults_to: bool,
    ) -> Result<(), PreferencesError> {
        observable.set(self.load_bool(key, defaults_to).await?);
        self.persist_on_change(registry, observable, key);
        Ok(())
    }

    /// Loads a value into `observable` and persists later changes.
    pub async fn bind<T>(
        &self,
        registry: &ListenerRegistry,
        observable: &Observable<T>,
        key: &'static str,
        default: T,
    ) -> Result<(), PreferencesError>
    where
        T: StoredValue + Clone + PartialEq + Send + Sync + 'static,
    {
        observable.set(self.load(key, default).await?);
        self.persist_on_change(registry, observable, key);
        Ok(())
    }
}
