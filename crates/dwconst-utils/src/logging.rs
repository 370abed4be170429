//! # Logging Utilities
//!
//! Logging infrastructure for the dwconst tools using `tracing`.
//!
//! This module provides structured logging with support for:
//! - Pretty (development) and JSON (machine-readable) output
//! - Environment variable configuration
//! - Log level filtering
//! - Console output, optionally mirrored into a file
//! - File-only output for runs whose stdout is the product (table dumps)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dwconst_utils::init_logging;
//!
//! // Reads RUST_LOG / DWCONST_LOG_FORMAT / DWCONST_LOG_FILE
//! init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Level filter (e.g. `RUST_LOG=debug`, `RUST_LOG=dwconst_core=trace`)
//! - `DWCONST_LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
//! - `DWCONST_LOG_FILE`: Optional path; logs are mirrored into exactly that file
//!   (no date suffix, no rotation) as well as to stderr
//!
//! Console logs go to stderr so decoded output on stdout stays pipeable.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    Error,
    Warn,
    /// Default
    Info,
    Debug,
    /// Most verbose; includes every unknown-code decode
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(format!(
                "{s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            ))),
        }
    }
}

/// Keeps the background file writer alive.
///
/// Dropping it flushes and stops file logging, so hold it until exit.
#[derive(Default)]
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// Reads:
/// - `RUST_LOG`: Level filter (default `info`)
/// - `DWCONST_LOG_FORMAT`: `json` or `pretty` (default `pretty`)
/// - `DWCONST_LOG_FILE`: Optional path to mirror logs into
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed or
/// `DWCONST_LOG_FORMAT` holds an unknown value.
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    init_console(env_format()?, None)
}

/// Initialize logging with explicit level and format
///
/// `level` replaces whatever `RUST_LOG` says.
///
/// ## Example
///
/// ```rust,no_run
/// use dwconst_utils::{init_logging_with_level, LogFormat, LogLevel};
///
/// let _guard = init_logging_with_level(LogLevel::Debug, LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_console(format, Some(level.into()))
}

/// Initialize file-only logging (nothing on stdout/stderr)
///
/// The file lives at `~/.dwconst/YYYY-MM-DD-dwconst.log`, falling back to
/// `/tmp/YYYY-MM-DD-dwconst.log` when `HOME` is unset. Returns the path.
/// `DWCONST_LOG_FORMAT` picks pretty or JSON lines, as on the console.
///
/// ## Errors
///
/// Returns an error if the log directory cannot be created,
/// `DWCONST_LOG_FORMAT` holds an unknown value, or a global subscriber is
/// already installed.
pub fn init_logging_to_file(level: Option<LogLevel>) -> Result<(PathBuf, LoggingGuard), LoggingError>
{
    let format = env_format()?;
    let log_file = default_log_file()?;
    let (layer, guard) = file_layer(&log_file, format, build_filter(level.map(Into::into)));

    Registry::default()
        .with(layer)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok((log_file, LoggingGuard { _file: Some(guard) }))
}

/// Dated log file path under `~/.dwconst` (or `/tmp`).
fn default_log_file() -> Result<PathBuf, LoggingError>
{
    let today = Utc::now().format("%Y-%m-%d");
    let name = format!("{today}-dwconst.log");

    if let Ok(home) = env::var("HOME") {
        let dir = PathBuf::from(home).join(".dwconst");
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join(name))
    } else {
        Ok(PathBuf::from("/tmp").join(name))
    }
}

fn env_format() -> Result<LogFormat, LoggingError>
{
    parse_format(env::var("DWCONST_LOG_FORMAT").ok().as_deref())
}

/// Unset means the default format.
fn parse_format(value: Option<&str>) -> Result<LogFormat, LoggingError>
{
    value.map_or(Ok(LogFormat::default()), str::parse)
}

/// Filter priority: explicit level, then `RUST_LOG`, then INFO.
fn build_filter(explicit: Option<Level>) -> EnvFilter
{
    if let Some(level) = explicit {
        return EnvFilter::new(level.to_string());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

fn init_console(format: LogFormat, explicit: Option<Level>) -> Result<LoggingGuard, LoggingError>
{
    let console_layer = match format {
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_writer(io::stderr)
            .with_filter(build_filter(explicit))
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .with_filter(build_filter(explicit))
            .boxed(),
    };

    let (mirror, guard) = match env::var("DWCONST_LOG_FILE") {
        Ok(path) => {
            let (layer, guard) = file_layer(Path::new(&path), format, build_filter(explicit));
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    Registry::default()
        .with(console_layer)
        .with(mirror)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(LoggingGuard { _file: guard })
}

/// Non-blocking layer writing to exactly `path`, in `format`.
fn file_layer<S>(path: &Path, format: LogFormat, filter: EnvFilter) -> (Box<dyn Layer<S> + Send + Sync>, WorkerGuard)
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let (writer, guard) = tracing_appender::non_blocking(file_appender(path));

    let layer = match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false) // No ANSI in files
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };

    (layer, guard)
}

/// Appender that never rotates, so the file name is used as given.
fn file_appender(path: &Path) -> tracing_appender::rolling::RollingFileAppender
{
    tracing_appender::rolling::never(
        path.parent().unwrap_or(Path::new(".")),
        path.file_name().unwrap_or_default(),
    )
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// A global subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
