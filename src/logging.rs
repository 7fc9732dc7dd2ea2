//! File logging. The terminal belongs to the UI, so tracing output goes to
//! `<state_dir>/taskdeck/taskdeck.log` instead of stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR_NAME;
use crate::error::LoggingError;

const LOG_FILE_NAME: &str = "taskdeck.log";

pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join(APP_DIR_NAME))
}

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str) -> Result<PathBuf, LoggingError> {
    let dir = log_dir().ok_or(LoggingError::NoLogDir)?;
    init_in(&dir, level)
}

pub fn init_in(dir: &Path, level: &str) -> Result<PathBuf, LoggingError> {
    let path = dir.join(LOG_FILE_NAME);
    let io_err = |source| LoggingError::Io {
        path: path.display().to_string(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_err)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError::Subscriber(err.to_string()))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        "logging started"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_into_given_directory_once() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");

        let path = init_in(&nested, "debug").unwrap();
        assert_eq!(path, nested.join(LOG_FILE_NAME));
        assert!(path.exists());

        let again = init_in(&nested, "debug");
        assert!(matches!(again, Err(LoggingError::Subscriber(_))));
    }
}
