//! User service trait definition.

use async_trait::async_trait;
use directory_core::{DirectoryResult, Interface, RequestContext, User};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Fills in defaults, sanitizes and validates `user`, then persists it.
    ///
    /// Returns the record as stored.
    async fn create_user(&self, ctx: &RequestContext, user: User) -> DirectoryResult<User>;

    /// Looks a user up by email, reading through the cache.
    async fn read_by_email(&self, ctx: &RequestContext, email: &str) -> DirectoryResult<User>;
}
