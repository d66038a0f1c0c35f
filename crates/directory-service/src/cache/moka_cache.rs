//! In-process user cache backed by moka.

use super::{cache_keys, CacheError, UserCache};
use async_trait::async_trait;
use directory_config::CacheConfig;
use directory_core::{HealthCheck, HealthStatus, RequestContext, User};
use moka::sync::Cache;
use shaku::Component;
use std::time::Duration;
use tracing::debug;

/// TTL and capacity bounded cache local to one process.
#[derive(Component, Clone)]
#[shaku(interface = UserCache)]
pub struct MokaUserCache {
    cache: Cache<String, User>,
}

impl MokaUserCache {
    /// Create a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Create a cache from the cache section of the configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl(), config.max_capacity)
    }

    /// Returns the underlying cache handle.
    #[must_use]
    pub fn inner(&self) -> &Cache<String, User> {
        &self.cache
    }
}

#[async_trait]
impl UserCache for MokaUserCache {
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, CacheError> {
        ctx.check()?;
        let key = cache_keys::user_by_email(email);
        match self.cache.get(&key) {
            Some(user) => {
                debug!("Cache hit for key '{}'", key);
                Ok(user)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set(&self, ctx: &RequestContext, email: &str, user: &User) -> Result<(), CacheError> {
        ctx.check()?;
        self.cache.insert(cache_keys::user_by_email(email), user.clone());
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for MokaUserCache {
    fn name(&self) -> &str {
        "memory-cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

impl std::fmt::Debug for MokaUserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaUserCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
