//! Cache-aside user service.

use crate::cache::{CacheError, UserCache};
use crate::user_service::UserService;
use async_trait::async_trait;
use directory_core::{
    apply_defaults, sanitize, validate, validate_lookup_email, DirectoryError, DirectoryResult,
    RequestContext, User,
};
use directory_repository::{StoreError, UserStore};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// User service over a durable store with a best-effort cache.
///
/// Writes go to the store only. Reads try the cache, fall back to the
/// store, and backfill the cache on the way out. Cache failures never fail
/// a read.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    store: Arc<dyn UserStore>,
    #[shaku(inject)]
    cache: Arc<dyn UserCache>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn UserCache>) -> Self {
        Self { store, cache }
    }

    async fn backfill(&self, ctx: &RequestContext, email: &str, user: &User) {
        match self.cache.set(ctx, email, user).await {
            Ok(()) => debug!(email, "Backfilled cache"),
            Err(CacheError::Unavailable) => debug!(email, "Cache not initialized, skipping backfill"),
            Err(e) => error!(email, error = %e, "Failed to backfill cache"),
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, ctx: &RequestContext, mut user: User) -> DirectoryResult<User> {
        apply_defaults(&mut user);
        sanitize(&mut user);

        if let Err(e) = validate(&user) {
            warn!(email = %user.email, error = %e, "Rejected user record");
            return Err(e.into());
        }

        if let Err(e) = self.store.put(ctx, &user).await {
            error!(email = %user.email, error = %e, "Failed to persist user");
            return Err(DirectoryError::write_failure(e.to_string()));
        }

        info!(email = %user.email, "User created");
        Ok(user)
    }

    async fn read_by_email(&self, ctx: &RequestContext, email: &str) -> DirectoryResult<User> {
        let email = match validate_lookup_email(email) {
            Ok(email) => email,
            Err(e) => {
                warn!(error = %e, "Rejected lookup email");
                return Err(e.into());
            }
        };
        let email = email.as_str();

        match self.cache.get_by_email(ctx, email).await {
            Ok(user) => {
                debug!(email, "Served user from cache");
                return Ok(user);
            }
            Err(e) if e.is_absent() => debug!(email, reason = %e, "Reading through to store"),
            Err(CacheError::Interrupted(e)) => {
                warn!(email, error = %e, "Lookup interrupted during cache read");
                return Err(DirectoryError::read_failure(e.to_string()));
            }
            Err(e) => error!(email, error = %e, "Cache read failed, reading through to store"),
        }

        let user = match self.store.get_by_email(ctx, email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                info!(email, "User not found");
                return Err(DirectoryError::UserNotFound);
            }
            Err(e @ StoreError::Interrupted(_)) => {
                warn!(email, error = %e, "Lookup interrupted during store read");
                return Err(DirectoryError::read_failure(e.to_string()));
            }
            Err(e) => {
                error!(email, error = %e, "Failed to read user");
                return Err(DirectoryError::read_failure(e.to_string()));
            }
        };

        // A cancelled request stops here, even though the store answered.
        if let Err(e) = ctx.check() {
            warn!(email, error = %e, "Lookup interrupted before cache backfill");
            return Err(DirectoryError::read_failure(e.to_string()));
        }

        self.backfill(ctx, email, &user).await;
        Ok(user)
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
