//! File logging for Harbor Weather CLI
//!
//! The dashboard owns the terminal, so log output goes to a file: by default
//! `harborwx.log` in the XDG cache directory (`~/.cache/harborwx/` on Linux).

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Log file name inside the cache directory
const LOG_FILE_NAME: &str = "harborwx.log";

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LogError {
    /// No home directory to derive a default log location from
    #[error("Could not determine a log directory; pass --log-file")]
    NoLogDir,

    /// The log file or its directory could not be created
    #[error("Could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Default log location in the XDG cache directory
///
/// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "harborwx")?;
    Some(project_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File, LogError> {
    let open_err = |source| LogError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(open_err)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

/// Filter from `RUST_LOG` when set and valid, otherwise `default_level`
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global file subscriber.
///
/// # Returns
/// * `Ok(PathBuf)` - Where the log is being written
/// * `Err(LogError)` - If no log location could be opened
pub fn init(log_file: Option<&Path>, default_level: &str) -> Result<PathBuf, LogError> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or(LogError::NoLogDir)?,
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)?;

    Ok(path)
}
