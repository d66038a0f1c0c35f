//! Dependency injection modules using Shaku.
//!
//! One module per store/cache combination:
//! - `RedisBackedModule`: MySQL store behind a shared Redis cache
//! - `LocalCacheModule`: MySQL store behind an in-process cache
//! - `StandaloneModule`: in-memory store and cache, no external services

use directory_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, InMemoryUserStore,
    MySqlUserStore, MySqlUserStoreParameters,
};
use directory_service::{
    MokaUserCache, MokaUserCacheParameters, RedisUserCache, RedisUserCacheParameters,
    UserServiceImpl,
};
use shaku::{module, HasComponent};
use std::sync::Arc;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

module! {
    pub RedisBackedModule {
        components = [
            DatabasePool,
            MySqlUserStore,
            RedisUserCache,
            UserServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub LocalCacheModule {
        components = [
            DatabasePool,
            MySqlUserStore,
            MokaUserCache,
            UserServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub StandaloneModule {
        components = [
            InMemoryUserStore,
            MokaUserCache,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds a module over MySQL with a Redis cache.
///
/// A disabled `cache` yields a module whose reads always go to MySQL.
pub fn build_redis_backed_module(
    pool: &DatabasePool,
    table: &str,
    cache: &RedisUserCache,
) -> Arc<RedisBackedModule> {
    let module = RedisBackedModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: pool.inner().clone(),
        })
        .with_component_parameters::<MySqlUserStore>(MySqlUserStoreParameters {
            table: table.to_string(),
        })
        .with_component_parameters::<RedisUserCache>(RedisUserCacheParameters {
            pool: cache.pool(),
            ttl: cache.ttl(),
        })
        .build();

    Arc::new(module)
}

/// Builds a module over MySQL with an in-process cache.
pub fn build_local_cache_module(
    pool: &DatabasePool,
    table: &str,
    cache: &MokaUserCache,
) -> Arc<LocalCacheModule> {
    let module = LocalCacheModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: pool.inner().clone(),
        })
        .with_component_parameters::<MySqlUserStore>(MySqlUserStoreParameters {
            table: table.to_string(),
        })
        .with_component_parameters::<MokaUserCache>(MokaUserCacheParameters {
            cache: cache.inner().clone(),
        })
        .build();

    Arc::new(module)
}

/// Builds a module with no external dependencies.
pub fn build_standalone_module(cache: &MokaUserCache) -> Arc<StandaloneModule> {
    let module = StandaloneModule::builder()
        .with_component_parameters::<MokaUserCache>(MokaUserCacheParameters {
            cache: cache.inner().clone(),
        })
        .build();

    Arc::new(module)
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the database pool from modules that have one.
pub trait DatabaseResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for RedisBackedModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

impl DatabaseResolver for LocalCacheModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
