//! Cache trait for user records.

use async_trait::async_trait;
use directory_core::{ContextError, Interface, RequestContext, User};
use thiserror::Error;

/// Outcome of a cache operation that did not produce a value.
///
/// `Miss` and `Unavailable` are expected conditions; everything else is a
/// fault the caller logs before falling back to the durable store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No entry for the key.
    #[error("cache miss")]
    Miss,

    /// The cache backend was never initialized.
    #[error("cache not initialized")]
    Unavailable,

    /// The backend failed the call.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A cached value could not be encoded or decoded.
    #[error("cache serialization error: {0}")]
    Serialization(String),

    /// The request ended before the backend answered.
    #[error("cache call interrupted: {0}")]
    Interrupted(#[from] ContextError),
}

impl CacheError {
    /// Returns true for a miss or an uninitialized cache.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Miss | Self::Unavailable)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Best-effort user cache keyed by email.
#[async_trait]
pub trait UserCache: Interface + Send + Sync {
    /// Returns the cached user for `email`.
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, CacheError>;

    /// Stores `user` under `email`.
    async fn set(&self, ctx: &RequestContext, email: &str, user: &User) -> Result<(), CacheError>;
}
