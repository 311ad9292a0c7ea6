//! The top-level preferences aggregator and its feature-area groups.

pub mod extensions;
pub mod group;
pub mod inspector;
pub mod logging;
pub mod memory;
pub mod performance;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lumen_core::{ConfigLoader, CoreConfig, PreferencesConfig};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::collaborators::{starting_theme, Collaborators, BASIC_LOG_LEVEL, MAIN_SCREEN, VERBOSE_LOG_LEVEL};
use crate::error::PreferencesError;
use crate::events::PreferenceChangedEvent;
use crate::observable::{ListenerRegistry, Observable};
use crate::storage::{JsonFileStorage, PreferenceStorage};
use crate::write_back::WriteBack;

pub use extensions::ExtensionsPreferences;
pub use group::{GroupContext, PreferenceGroup};
pub use inspector::{DetailsViewType, InspectorPreferences};
pub use logging::LoggingPreferences;
pub use memory::MemoryPreferences;
pub use performance::PerformancePreferences;

pub const DARK_MODE_KEY: &str = "ui.darkMode";
pub const VM_DEVELOPER_MODE_KEY: &str = "ui.vmDeveloperMode";
pub const VERBOSE_LOGGING_KEY: &str = "verboseLogging";

/// Construction-time knobs for [`PreferencesController`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesOptions {
    /// Theme used when no dark-mode preference has been stored yet.
    pub dark_mode_default: bool,
    /// Buffer size of the change broadcast channel.
    pub event_capacity: usize,
}

impl Default for PreferencesOptions {
    fn default() -> Self {
        Self { dark_mode_default: true, event_capacity: 32 }
    }
}

impl From<&PreferencesConfig> for PreferencesOptions {
    fn from(config: &PreferencesConfig) -> Self {
        Self { dark_mode_default: config.dark_mode_default, event_capacity: config.event_capacity }
    }
}

/// Loads, exposes and persists the application's user preferences.
///
/// Construction is cheap and synchronous; values hold their defaults until
/// [`init`](Self::init) has read the store. After `init`, every change to one of
/// the observables is written back to storage in the background.
pub struct PreferencesController {
    storage: Arc<dyn PreferenceStorage>,
    collaborators: Collaborators,
    options: PreferencesOptions,
    write_back: Arc<WriteBack>,
    listeners: ListenerRegistry,
    dark_mode_theme: Observable<bool>,
    vm_developer_mode: Observable<bool>,
    verbose_logging: Observable<bool>,
    inspector: InspectorPreferences,
    memory: MemoryPreferences,
    logging: LoggingPreferences,
    performance: PerformancePreferences,
    extensions: ExtensionsPreferences,
    initialized: Mutex<bool>,
    impression_sent: AtomicBool,
}

impl PreferencesController {
    pub fn new(
        storage: Arc<dyn PreferenceStorage>,
        collaborators: Collaborators,
        options: PreferencesOptions,
    ) -> Self {
        let write_back = Arc::new(WriteBack::new(Arc::clone(&storage), options.event_capacity));
        let context = GroupContext::new(Arc::clone(&storage), Arc::clone(&write_back));
        Self {
            dark_mode_theme: Observable::new(options.dark_mode_default),
            vm_developer_mode: Observable::new(false),
            verbose_logging: Observable::new(false),
            inspector: InspectorPreferences::new(context.clone()),
            memory: MemoryPreferences::new(context.clone()),
            logging: LoggingPreferences::new(context.clone()),
            performance: PerformancePreferences::new(context.clone()),
            extensions: ExtensionsPreferences::new(context),
            storage,
            collaborators,
            options,
            write_back,
            listeners: ListenerRegistry::new(),
            initialized: Mutex::new(false),
            impression_sent: AtomicBool::new(false),
        }
    }

    /// Builds a controller backed by the JSON store named in `config`.
    pub fn from_config(config: &CoreConfig, collaborators: Collaborators) -> Result<Self, PreferencesError> {
        let path = ConfigLoader::store_path(config)?;
        info!("Using preference store at {:?}.", path);
        Ok(Self::new(
            Arc::new(JsonFileStorage::new(path)),
            collaborators,
            PreferencesOptions::from(&config.preferences),
        ))
    }

    /// Reads every preference from storage and starts persisting changes.
    ///
    /// Calling `init` again after it succeeded does nothing. A controller that has
    /// been disposed cannot be initialized again.
    pub async fn init(&self) -> Result<(), PreferencesError> {
        let mut initialized = self.initialized.lock().await;
        if self.write_back.is_closed() {
            return Err(PreferencesError::Disposed);
        }
        if *initialized {
            debug!("Preferences already initialized.");
            return Ok(());
        }

        self.write_back.start();
        if let Err(e) = self.load_all().await {
            self.cancel_all_listeners();
            return Err(e);
        }

        *initialized = true;
        info!("Preferences initialized.");
        Ok(())
    }

    async fn load_all(&self) -> Result<(), PreferencesError> {
        let context = GroupContext::new(Arc::clone(&self.storage), Arc::clone(&self.write_back));

        let stored_theme = self
            .storage
            .get_value(DARK_MODE_KEY)
            .await
            .map_err(|e| PreferencesError::storage_read(DARK_MODE_KEY, e))?;
        let dark_mode = match stored_theme {
            None => self.options.dark_mode_default,
            Some(raw) => raw == "true",
        };
        let vm_developer_mode = context.load_bool(VM_DEVELOPER_MODE_KEY, false).await?;
        let verbose_logging = context.load_bool(VERBOSE_LOGGING_KEY, false).await?;

        // Once per controller, even when a failed init is retried.
        if !self.impression_sent.swap(true, Ordering::SeqCst) {
            self.collaborators
                .analytics
                .impression(MAIN_SCREEN, &starting_theme(dark_mode));
        }
        self.toggle_dark_mode_theme(Some(dark_mode));
        context.persist_on_change(&self.listeners, &self.dark_mode_theme, DARK_MODE_KEY);
        self.toggle_vm_developer_mode(Some(vm_developer_mode));
        context.persist_on_change(&self.listeners, &self.vm_developer_mode, VM_DEVELOPER_MODE_KEY);
        self.toggle_verbose_logging(Some(verbose_logging));
        context.persist_on_change(&self.listeners, &self.verbose_logging, VERBOSE_LOGGING_KEY);

        for group in self.groups() {
            group.init().await?;
            debug!("Initialized '{}' preferences.", group.name());
        }
        Ok(())
    }

    fn groups(&self) -> [&dyn PreferenceGroup; 5] {
        [&self.inspector, &self.memory, &self.logging, &self.performance, &self.extensions]
    }

    fn cancel_all_listeners(&self) {
        self.listeners.cancel_listeners();
        for group in self.groups() {
            group.dispose();
        }
    }

    /// Detaches every listener, then waits for queued writes to land.
    pub async fn dispose(&self) {
        self.cancel_all_listeners();
        self.write_back.shutdown().await;
        info!("Preferences disposed.");
    }

    /// Resolves once every change made so far has been handed to storage.
    pub async fn flush(&self) {
        self.write_back.flush().await;
    }

    pub fn toggle_dark_mode_theme(&self, use_dark_mode: Option<bool>) {
        if let Some(use_dark_mode) = use_dark_mode {
            self.dark_mode_theme.set(use_dark_mode);
        }
    }

    pub fn toggle_vm_developer_mode(&self, enable: Option<bool>) {
        if let Some(enable) = enable {
            self.vm_developer_mode.set(enable);
            self.collaborators.private_rpcs.set_private_rpcs_enabled(enable);
        }
    }

    pub fn toggle_verbose_logging(&self, enable: Option<bool>) {
        if let Some(enable) = enable {
            self.verbose_logging.set(enable);
            let level = if enable { VERBOSE_LOG_LEVEL } else { BASIC_LOG_LEVEL };
            self.collaborators.log_level.set_level(level);
        }
    }

    pub fn dark_mode_theme(&self) -> &Observable<bool> {
        &self.dark_mode_theme
    }

    pub fn vm_developer_mode(&self) -> &Observable<bool> {
        &self.vm_developer_mode
    }

    pub fn verbose_logging(&self) -> &Observable<bool> {
        &self.verbose_logging
    }

    pub fn inspector(&self) -> &InspectorPreferences {
        &self.inspector
    }

    pub fn memory(&self) -> &MemoryPreferences {
        &self.memory
    }

    pub fn logging(&self) -> &LoggingPreferences {
        &self.logging
    }

    pub fn performance(&self) -> &PerformancePreferences {
        &self.performance
    }

    pub fn extensions(&self) -> &ExtensionsPreferences {
        &self.extensions
    }

    /// Receives a [`PreferenceChangedEvent`] for every change queued for storage.
    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChangedEvent> {
        self.write_back.subscribe()
    }
}
