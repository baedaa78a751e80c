//! Tracing subscriber initialization.
//!
//! Replay reports own stdout, so diagnostics go to a plain-text file
//! (`~/.local/state/floatpanel/floatpanel.log` unless configured).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the file subscriber could not be installed.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory we tried to create.
        path: PathBuf,
        /// Cause reported by the filesystem.
        #[source]
        source: std::io::Error,
    },

    /// The log path ends in `/`, `..` or a non-UTF-8 name.
    #[error("Log path {0:?} does not name a file")]
    InvalidPath(PathBuf),

    /// The log path has no parent component.
    #[error("Log path {0:?} has no containing directory")]
    NoParentDirectory(PathBuf),

    /// Another global subscriber was installed first.
    #[error("A global tracing subscriber is already installed")]
    SubscriberAlreadySet,
}

/// Route `tracing` output for the whole process to `log_path`.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Missing parent
/// directories are created. A bare file name logs into the working
/// directory.
///
/// # Errors
///
/// See [`LoggingError`]. Only the first successful call installs a
/// subscriber; later calls return [`LoggingError::SubscriberAlreadySet`].
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    // "panel.log" has parent ""
    let directory = if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    };

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
