//! Ports for the services the preferences layer notifies but does not own.
//!
//! Each port has a no-op implementation so embedders only wire what they have.

use std::sync::Arc;

use lumen_core::LogLevelHandle;
use tracing::level_filters::LevelFilter;
use tracing::warn;

/// Level applied while verbose logging is enabled.
pub const VERBOSE_LOG_LEVEL: LevelFilter = LevelFilter::TRACE;
/// Level applied while verbose logging is disabled.
pub const BASIC_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Screen name used for startup impressions.
pub const MAIN_SCREEN: &str = "main";

/// Analytics item describing the theme the session started with.
pub fn starting_theme(dark_mode: bool) -> String {
    format!("startingTheme-darkMode-{}", dark_mode)
}

/// Fire-and-forget usage analytics.
#[cfg_attr(test, mockall::automock)]
pub trait Analytics: Send + Sync {
    fn impression(&self, screen: &str, item: &str);
}

/// Sets the process-wide log level.
#[cfg_attr(test, mockall::automock)]
pub trait LogLevelSink: Send + Sync {
    fn set_level(&self, level: LevelFilter);
}

/// Enables or disables private RPCs on the VM service connection.
#[cfg_attr(test, mockall::automock)]
pub trait PrivateRpcToggle: Send + Sync {
    fn set_private_rpcs_enabled(&self, enabled: bool);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn impression(&self, _screen: &str, _item: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogLevel;

impl LogLevelSink for NoopLogLevel {
    fn set_level(&self, _level: LevelFilter) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPrivateRpcs;

impl PrivateRpcToggle for NoopPrivateRpcs {
    fn set_private_rpcs_enabled(&self, _enabled: bool) {}
}

impl LogLevelSink for LogLevelHandle {
    fn set_level(&self, level: LevelFilter) {
        if let Err(e) = LogLevelHandle::set_level(self, level) {
            warn!("Failed to switch log level to {}: {}", level, e);
        }
    }
}

/// The collaborators handed to a [`crate::PreferencesController`].
#[derive(Clone)]
pub struct Collaborators {
    pub analytics: Arc<dyn Analytics>,
    pub log_level: Arc<dyn LogLevelSink>,
    pub private_rpcs: Arc<dyn PrivateRpcToggle>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            analytics: Arc::new(NoopAnalytics),
            log_level: Arc::new(NoopLogLevel),
            private_rpcs: Arc::new(NoopPrivateRpcs),
        }
    }
}

impl Collaborators {
    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_log_level(mut self, log_level: Arc<dyn LogLevelSink>) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_private_rpcs(mut self, private_rpcs: Arc<dyn PrivateRpcToggle>) -> Self {
        self.private_rpcs = private_rpcs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_theme_item() {
        assert_eq!(starting_theme(true), "startingTheme-darkMode-true");
        assert_eq!(starting_theme(false), "startingTheme-darkMode-false");
    }

    #[test]
    fn test_builder_replaces_ports() {
        let mut analytics = MockAnalytics::new();
        analytics
            .expect_impression()
            .withf(|screen, item| screen == MAIN_SCREEN && item == "x")
            .times(1)
            .return_const(());

        let collaborators = Collaborators::default().with_analytics(Arc::new(analytics));
        collaborators.analytics.impression(MAIN_SCREEN, "x");
    }
}
