//! # Lumen Preferences (`lumen-prefs`)
//!
//! Loads the user's preferences from an asynchronous key-value store, exposes
//! them as [`Observable`] values and writes every change back.
//!
//! The entry point is [`PreferencesController`]. It owns the application-wide
//! flags (theme, VM developer mode, verbose logging) and one
//! [`PreferenceGroup`] per feature area. Side effects that leave this crate go
//! through the ports in [`collaborators`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lumen_prefs::{Collaborators, InMemoryStorage, PreferencesController, PreferencesOptions};
//!
//! let prefs = PreferencesController::new(
//!     Arc::new(InMemoryStorage::new()),
//!     Collaborators::default(),
//!     PreferencesOptions::default(),
//! );
//! prefs.init().await?;
//! prefs.toggle_dark_mode_theme(Some(false));
//! prefs.dispose().await;
//! ```

pub mod collaborators;
pub mod controller;
pub mod error;
pub mod events;
pub mod observable;
pub mod storage;
pub mod values;
pub mod write_back;

pub use collaborators::{Analytics, Collaborators, LogLevelSink, PrivateRpcToggle};
pub use controller::{
    DetailsViewType, ExtensionsPreferences, InspectorPreferences, LoggingPreferences, MemoryPreferences,
    PerformancePreferences, PreferenceGroup, PreferencesController, PreferencesOptions,
};
pub use error::{PreferencesError, StorageError};
pub use events::PreferenceChangedEvent;
pub use observable::{ListenerId, ListenerRegistry, Observable, WeakObservable};
pub use storage::{InMemoryStorage, JsonFileStorage, PreferenceStorage};
