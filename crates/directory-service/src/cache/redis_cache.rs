//! Redis-based user cache.

use super::{cache_keys, CacheError, UserCache};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, Runtime};
use directory_config::CacheConfig;
use directory_core::{HealthCheck, HealthStatus, RequestContext, User};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached users (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Redis-based user cache.
///
/// Built without a pool (see [`RedisUserCache::disabled`]) every call
/// answers [`CacheError::Unavailable`].
#[derive(Component)]
#[shaku(interface = UserCache)]
pub struct RedisUserCache {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    /// TTL applied to every entry.
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl RedisUserCache {
    /// Create a new Redis user cache.
    #[must_use]
    pub fn new(pool: Arc<Pool>, ttl: Duration) -> Self {
        Self {
            pool: Some(pool),
            ttl,
        }
    }

    /// Create a cache that was never initialized.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            ttl: DEFAULT_TTL,
        }
    }

    /// Build a pool from the cache section of the configuration.
    ///
    /// No connection is made until the first call or [`ping`](Self::ping).
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let pool = deadpool_redis::Config::from_url(&config.url)
            .builder()
            .map_err(|e| CacheError::Backend(format!("Invalid Redis configuration: {}", e)))?
            .max_size(config.pool_size)
            .wait_timeout(Some(config.connect_timeout()))
            .create_timeout(Some(config.connect_timeout()))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| CacheError::Backend(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self::new(Arc::new(pool), config.ttl()))
    }

    /// Check if the cache has a backend.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    /// Returns the pool, if any.
    #[must_use]
    pub fn pool(&self) -> Option<Arc<Pool>> {
        self.pool.clone()
    }

    /// Returns the entry TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Round-trips a `PING` to the backend.
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("Ping failed: {}", e)))?;
        info!("Redis cache reachable");
        Ok(())
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> Result<deadpool_redis::Connection, CacheError> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CacheError::Backend(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CacheError::Unavailable),
        }
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, CacheError> {
        let key = cache_keys::user_by_email(email);

        let mut conn = ctx.run(self.get_conn()).await??;
        let value: Option<String> = ctx
            .run(conn.get(&key))
            .await?
            .map_err(|e| CacheError::Backend(format!("Failed to get key '{}': {}", key, e)))?;

        match value {
            Some(json) => {
                debug!("Cache hit for key '{}'", key);
                Ok(serde_json::from_str(&json)?)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set(&self, ctx: &RequestContext, email: &str, user: &User) -> Result<(), CacheError> {
        let key = cache_keys::user_by_email(email);
        let json = serde_json::to_string(user)?;
        let ttl_secs = self.ttl.as_secs().max(1);

        let mut conn = ctx.run(self.get_conn()).await??;
        ctx.run(conn.set_ex::<_, _, ()>(&key, json, ttl_secs))
            .await?
            .map_err(|e| CacheError::Backend(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisUserCache {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            // Reads fall back to the durable store, so the service stays up.
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

impl std::fmt::Debug for RedisUserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisUserCache")
            .field("enabled", &self.is_enabled())
            .field("ttl", &self.ttl)
            .finish()
    }
}
