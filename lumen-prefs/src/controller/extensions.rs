use async_trait::async_trait;

use super::group::{GroupContext, PreferenceGroup};
use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};

pub const SHOW_ONLY_ENABLED_KEY: &str = "extensions.showOnlyEnabledExtensions";

pub struct ExtensionsPreferences {
    context: GroupContext,
    listeners: ListenerRegistry,
    show_only_enabled: Observable<bool>,
}

impl ExtensionsPreferences {
    pub fn new(context: GroupContext) -> Self {
        Self {
            context,
            listeners: ListenerRegistry::new(),
            show_only_enabled: Observable::new(false),
        }
    }

    pub fn show_only_enabled(&self) -> &Observable<bool> {
        &self.show_only_enabled
    }

    pub fn toggle_show_only_enabled(&self, enabled: Option<bool>) {
        if let Some(enabled) = enabled {
            self.show_only_enabled.set(enabled);
        }
    }
}

#[async_trait]
impl PreferenceGroup for ExtensionsPreferences {
    fn name(&self) -> &'static str {
        "extensions"
    }

    async fn init(&self) -> Result<(), PreferencesError> {
        self.context
            .bind_bool(&self.listeners, &self.show_only_enabled, SHOW_ONLY_ENABLED_KEY, false)
            .await
    }

    fn dispose(&self) {
        self.listeners.cancel_listeners();
    }
}
