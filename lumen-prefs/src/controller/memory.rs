use async_trait::async_trait;

use super::group::{GroupContext, PreferenceGroup};
use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};

pub const ANDROID_COLLECTION_KEY: &str = "memory.androidCollectionEnabled";
pub const SHOW_CHART_KEY: &str = "memory.showChart";
pub const REF_LIMIT_KEY: &str = "memory.refLimit";

/// Maximum number of references retrieved when exploring retaining paths.
pub const DEFAULT_REF_LIMIT: usize = 100_000;

pub struct MemoryPreferences {
    context: GroupContext,
    listeners: ListenerRegistry,
    android_collection_enabled: Observable<bool>,
    show_chart: Observable<bool>,
    ref_limit: Observable<usize>,
}

impl MemoryPreferences {
    pub fn new(context: GroupContext) -> Self {
        Self {
            context,
            listeners: ListenerRegistry::new(),
            android_collection_enabled: Observable::new(false),
            show_chart: Observable::new(true),
            ref_limit: Observable::new(DEFAULT_REF_LIMIT),
        }
    }

    pub fn android_collection_enabled(&self) -> &Observable<bool> {
        &self.android_collection_enabled
    }

    pub fn show_chart(&self) -> &Observable<bool> {
        &self.show_chart
    }

    pub fn ref_limit(&self) -> &Observable<usize> {
        &self.ref_limit
    }

    pub fn set_android_collection_enabled(&self, enabled: bool) {
        self.android_collection_enabled.set(enabled);
    }

    pub fn set_show_chart(&self, show: bool) {
        self.show_chart.set(show);
    }

    pub fn set_ref_limit(&self, limit: usize) {
        self.ref_limit.set(limit);
    }
}

#[async_trait]
impl PreferenceGroup for MemoryPreferences {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn init(&self) -> Result<(), PreferencesError> {
        self.context
            .bind_bool(&self.listeners, &self.android_collection_enabled, ANDROID_COLLECTION_KEY, false)
            .await?;
        self.context
            .bind_bool(&self.listeners, &self.show_chart, SHOW_CHART_KEY, true)
            .await?;
        self.context
            .bind(&self.listeners, &self.ref_limit, REF_LIMIT_KEY, DEFAULT_REF_LIMIT)
            .await
    }

    fn dispose(&self) {
        self.listeners.cancel_listeners();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{InMemoryStorage, PreferenceStorage};
    use crate::write_back::WriteBack;

    fn memory_group(storage: Arc<InMemoryStorage>) -> (MemoryPreferences, Arc<WriteBack>) {
        let write_back = Arc::new(WriteBack::new(storage.clone(), 8));
        write_back.start();
        let group = MemoryPreferences::new(GroupContext::new(storage, write_back.clone()));
        (group, write_back)
    }

    #[tokio::test]
    async fn test_value_reset_by_a_listener_is_what_gets_stored() {
        let storage = Arc::new(InMemoryStorage::new());
        let (group, write_back) = memory_group(storage.clone());
        let chart = group.show_chart().clone();
        group.show_chart().add_listener(move |shown: &bool| {
            if !*shown {
                chart.set(true);
            }
        });
        group.init().await.unwrap();

        group.set_show_chart(false);
        write_back.flush().await;

        assert!(group.show_chart().get());
        assert_eq!(storage.get_value(SHOW_CHART_KEY).await.unwrap().as_deref(), Some("true"));
        group.dispose();
        write_back.shutdown().await;
    }

    #[tokio::test]
    async fn test_ref_limit_is_loaded_and_persisted() {
        let storage = Arc::new(InMemoryStorage::with_values([(REF_LIMIT_KEY, "2048")]));
        let (group, write_back) = memory_group(storage.clone());
        group.init().await.unwrap();
        assert_eq!(group.ref_limit().get(), 2048);

        group.set_ref_limit(64);
        write_back.flush().await;
        assert_eq!(storage.get_value(REF_LIMIT_KEY).await.unwrap().as_deref(), Some("64"));
        group.dispose();
        write_back.shutdown().await;
    }
}
