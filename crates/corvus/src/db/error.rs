//! Error types for the database helpers.

use thiserror::Error;

use crate::docker::client::DockerError;

/// Database operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error (connection, query, etc.)
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// IO error (file system operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Credentials file could not be parsed
    #[error("Malformed credentials file ({reason}): '{path}'")]
    BadCredentials { path: String, reason: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Docker-side failure while driving a container backup
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    /// Backup script inside the container exited non-zero
    #[error("Backup failed in container '{container}' (exit {exit_code}): {stderr}")]
    BackupFailed {
        container: String,
        exit_code: i64,
        stderr: String,
    },
}

impl DbError {
    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
