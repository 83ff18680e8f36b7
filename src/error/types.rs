//! Error types
//!
//! Defines domain-specific error types for each module of the file server.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Path resolution errors: the client supplied a malformed or out-of-scope
/// virtual path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Invalid path, path must start with '/': {0}")]
    MissingRoot(String),

    #[error("Invalid path, path exceeds scope of '/': {0}")]
    ExceedsScope(String),

    #[error("Invalid path, path cannot exceed scope of root '/': {0}")]
    EscapesRoot(String),

    #[error("Invalid path, path is too long or contains control characters")]
    Malformed,

    #[error("Invalid path, segment {0:?} contains a forbidden character")]
    InvalidSegment(String),
}

/// Storage module errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error reports a missing or wrong-kind location.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DirectoryNotFound(_) | Self::FileNotFound(_))
    }
}

/// General file server error that encompasses all error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Missing required query parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error.to_string())
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(error: tokio::task::JoinError) -> Self {
        ServerError::Task(error.to_string())
    }
}
