//! Error types for floatpanel.
//!
//! The interaction engine itself has no fatal errors: corrupt storage falls
//! back to defaults and stale frames are dropped. Errors only exist at the
//! edges of the crate (storage backends, config, logging, trace input) and
//! compose into [`AppError`] via `From` so the binary can use `?` throughout.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the `floatpanel` binary
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing init failures
//!   - [`TraceError`] - Pointer trace input failures
//!   - `std::io::Error` - Reading the trace or writing the report
//! - [`StoreError`] - Storage backend failures (never surfaced past the store)

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes of the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The pointer trace could not be read.
    ///
    /// Individual malformed lines are not fatal; they are reported and
    /// skipped. Only failures to open the input end up here.
    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),

    /// Terminal or pipe I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a key-value storage backend.
///
/// [`LayoutSettingsStore`](crate::store::LayoutSettingsStore) logs these and
/// degrades: a failed read is "no record", a failed write is dropped.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layout record could not be encoded.
    #[error("Failed to encode layout record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage key cannot name a file inside the storage directory.
    #[error("Invalid storage key {key:?}: must be a plain file name")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}

/// Errors while reading a pointer trace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The trace file does not exist.
    #[error("Trace file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A line is not a valid trace event.
    #[error("Invalid trace event at line {line}: {message}")]
    InvalidEvent {
        /// 1-based line number in the trace.
        line: usize,
        /// Deserializer message.
        message: String,
    },
}
