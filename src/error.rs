use thiserror::Error;

use crate::calendar::{AccessScope, PlatformError};

/// Failure during the permission grant flow for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("{scope} access request failed: {source}")]
    Platform {
        scope: AccessScope,
        #[source]
        source: PlatformError,
    },
    #[error("{scope} access request timed out after {secs}s")]
    TimedOut { scope: AccessScope, secs: u64 },
}

impl AuthorizationError {
    pub fn scope(&self) -> AccessScope {
        match self {
            AuthorizationError::Platform { scope, .. } => *scope,
            AuthorizationError::TimedOut { scope, .. } => *scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("reminder query failed: {0}")]
    Platform(#[from] PlatformError),
    #[error("could not resolve local midnight for {0}")]
    InvalidDay(chrono::NaiveDate),
}

/// A completion change the platform store refused to commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not save reminder `{reminder_id}`: {source}")]
pub struct StoreWriteError {
    pub reminder_id: String,
    #[source]
    pub source: PlatformError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("no writable state directory for the log file")]
    NoLogDir,
    #[error("failed to open log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}
