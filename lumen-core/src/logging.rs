//! Logging for Lumen tools, built on the `tracing` ecosystem.
//!
//! [`init_logging`] installs a console layer and an optional daily-rolling file
//! layer behind a reloadable level filter, and returns a [`LogLevelHandle`] that
//! changes the active level at runtime (used by the verbose-logging preference).

use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

type LevelLayer = reload::Layer<LevelFilter, Registry>;
type BaseSubscriber = Layered<LevelLayer, Registry>;
type BoxedLayer = Box<dyn Layer<BaseSubscriber> + Send + Sync + 'static>;

/// Keeps the non-blocking file writer alive so buffered lines get flushed.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal `stderr` logger driven by `RUST_LOG` (default "info").
///
/// Meant for tests and for early startup before configuration is available.
/// Errors (e.g. a global subscriber already being set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Cloneable handle on the active global log level.
#[derive(Clone, Debug)]
pub struct LogLevelHandle {
    inner: reload::Handle<LevelFilter, Registry>,
}

impl LogLevelHandle {
    /// Replaces the active level.
    pub fn set_level(&self, level: LevelFilter) -> Result<(), LoggingError> {
        self.inner
            .reload(level)
            .map_err(|e| LoggingError::FilterError(e.to_string()))
    }

    /// The level currently in effect, or `None` once the subscriber is gone.
    pub fn current_level(&self) -> Option<LevelFilter> {
        self.inner.clone_current()
    }
}

/// Parses a configuration level string ("trace" .. "error", case-insensitive).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        invalid => Err(LoggingError::InitializationFailure(format!(
            "Invalid log level in config: {}",
            invalid
        ))),
    }
}

fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("lumen.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer = match format.to_lowercase().as_str() {
        "json" => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
        _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
    };
    Ok((layer, guard))
}

fn create_stdout_layer(format: &str) -> BoxedLayer {
    match format.to_lowercase().as_str() {
        "json" => fmt::layer().json().with_writer(stdout).with_ansi(false).boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .boxed(),
    }
}

/// Assembles the subscriber described by `config` without installing it.
fn build_subscriber(
    config: &LoggingConfig,
) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, LogLevelHandle, Option<WorkerGuard>), CoreError> {
    let level = parse_level(&config.level)?;
    let (level_layer, reload_handle) = reload::Layer::new(level);

    let mut layers: Vec<BoxedLayer> = vec![create_stdout_layer(&config.format)];
    let mut file_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        layers.push(file_layer);
        file_guard = Some(guard);
    }

    let subscriber = Registry::default().with(level_layer).with(layers);
    Ok((subscriber, LogLevelHandle { inner: reload_handle }, file_guard))
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns [`LoggingError::InitializationFailure`] for an invalid level or when a
/// global subscriber is already installed, and filesystem errors when the log
/// directory cannot be created.
pub fn init_logging(config: &LoggingConfig) -> Result<LogLevelHandle, CoreError> {
    let (subscriber, handle, file_guard) = build_subscriber(config)?;

    subscriber.try_init().map_err(|e| {
        LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        ))
    })?;

    match LOG_WORKER_GUARD.lock() {
        Ok(mut slot) => *slot = file_guard,
        Err(e) => eprintln!("[ERROR] Failed to store log worker guard: {}. Log flushing may be affected.", e),
    }
    Ok(handle)
}
