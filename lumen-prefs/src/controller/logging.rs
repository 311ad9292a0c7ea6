use async_trait::async_trait;

use super::group::{GroupContext, PreferenceGroup};
use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};

pub const RETENTION_LIMIT_KEY: &str = "logging.retentionLimit";

/// Number of log entries kept by the logging view.
pub const DEFAULT_RETENTION_LIMIT: usize = 3000;

pub struct LoggingPreferences {
    context: GroupContext,
    listeners: ListenerRegistry,
    retention_limit: Observable<usize>,
}

impl LoggingPreferences {
    pub fn new(context: GroupContext) -> Self {
        Self {
            context,
            listeners: ListenerRegistry::new(),
            retention_limit: Observable::new(DEFAULT_RETENTION_LIMIT),
        }
    }

    pub fn retention_limit(&self) -> &Observable<usize> {
        &self.retention_limit
    }

    pub fn set_retention_limit(&self, limit: usize) {
        self.retention_limit.set(limit);
    }
}

#[async_trait]
impl PreferenceGroup for LoggingPreferences {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn init(&self) -> Result<(), PreferencesError> {
        self.context
            .bind(&self.listeners, &self.retention_limit, RETENTION_LIMIT_KEY, DEFAULT_RETENTION_LIMIT)
            .await
    }

    fn dispose(&self) {
        self.listeners.cancel_listeners();
    }
}
