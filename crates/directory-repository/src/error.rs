//! Errors reported by durable stores.

use directory_core::ContextError;
use thiserror::Error;

/// Failure of a durable store operation.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// No record matches the lookup key.
    #[error("record not found")]
    NotFound,

    /// The backend rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),

    /// The request ended before the backend answered.
    #[error("store call interrupted: {0}")]
    Interrupted(#[from] ContextError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Database(other.to_string()),
        }
    }
}
