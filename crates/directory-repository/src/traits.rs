//! Store trait definitions.

use crate::StoreError;
use async_trait::async_trait;
use directory_core::{Interface, RequestContext, User};

/// Source of truth for user records, keyed by email.
///
/// Implementations must give up as soon as `ctx` is cancelled or expires,
/// reporting [`StoreError::Interrupted`].
#[async_trait]
pub trait UserStore: Interface + Send + Sync {
    /// Inserts a user. No uniqueness check is made on the email.
    async fn put(&self, ctx: &RequestContext, user: &User) -> Result<(), StoreError>;

    /// Finds the user whose email matches `email` exactly.
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, StoreError>;
}
