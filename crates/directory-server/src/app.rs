//! Application assembly.
//!
//! Picks the store and cache backends named in the configuration, wires
//! them through the matching Shaku module and serves the REST router.

use crate::di::{
    build_local_cache_module, build_redis_backed_module, build_standalone_module,
    DatabaseResolver,
};
use axum::Router;
use directory_config::{AppConfig, CacheBackend, ServerConfig, StoreBackend};
use directory_core::{DirectoryError, DirectoryResult, HealthCheck};
use directory_repository::{DatabaseHealthCheck, DatabasePool, DatabasePoolInterface, MySqlUserStore};
use directory_rest::create_router;
use directory_service::{MokaUserCache, RedisUserCache};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A fully wired server, ready to bind.
pub struct Application {
    router: Router,
    server: ServerConfig,
    database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl Application {
    /// Connects the configured backends and builds the router.
    ///
    /// Fails when MySQL is unreachable or the table cannot be created.
    /// An unreachable Redis only disables the cache.
    pub async fn build(config: &AppConfig) -> DirectoryResult<Self> {
        match config.database.backend {
            StoreBackend::Memory => Ok(Self::standalone(config)),
            StoreBackend::Mysql => Self::with_mysql(config).await,
        }
    }

    fn standalone(config: &AppConfig) -> Self {
        warn!("Using the in-memory store; users are lost on restart");
        if config.cache.backend != CacheBackend::Memory {
            info!(
                "Cache backend '{}' ignored with the in-memory store",
                config.cache.backend
            );
        }

        let cache = MokaUserCache::from_config(&config.cache);
        let module = build_standalone_module(&cache);
        let checks: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(cache)];
        let router = create_router(module.as_ref(), &config.server, checks);

        Self {
            router,
            server: config.server.clone(),
            database: None,
        }
    }

    async fn with_mysql(config: &AppConfig) -> DirectoryResult<Self> {
        let pool = DatabasePool::connect(&config.database)
            .await
            .map_err(|e| DirectoryError::internal(format!("Database unavailable: {}", e)))?;
        let table = config.database.table.as_str();

        let (router, database) = match config.cache.backend {
            CacheBackend::Memory => {
                let cache = MokaUserCache::from_config(&config.cache);
                let module = build_local_cache_module(&pool, table, &cache);
                let database = module.database_pool();
                let checks: Vec<Arc<dyn HealthCheck>> = vec![
                    Arc::new(DatabaseHealthCheck::new(database.clone())),
                    Arc::new(cache),
                ];
                (create_router(module.as_ref(), &config.server, checks), database)
            }
            CacheBackend::Redis | CacheBackend::Disabled => {
                let cache = connect_redis(config).await;
                let module = build_redis_backed_module(&pool, table, &cache);
                let database = module.database_pool();
                let checks: Vec<Arc<dyn HealthCheck>> = vec![
                    Arc::new(DatabaseHealthCheck::new(database.clone())),
                    Arc::new(cache),
                ];
                (create_router(module.as_ref(), &config.server, checks), database)
            }
        };

        if config.database.auto_create_table {
            MySqlUserStore::new(database.clone(), table)
                .ensure_table()
                .await
                .map_err(|e| DirectoryError::internal(format!("Failed to prepare table: {}", e)))?;
        }

        Ok(Self {
            router,
            server: config.server.clone(),
            database: Some(database),
        })
    }

    /// Returns a handle to the router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until `shutdown` resolves, then closes the database pool.
    pub async fn run<F>(self, shutdown: F) -> DirectoryResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| DirectoryError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Starting REST server on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DirectoryError::internal(format!("REST server error: {}", e)))?;

        if let Some(database) = self.database {
            database.close().await;
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Builds the Redis cache, or a disabled one when Redis is off or unreachable.
async fn connect_redis(config: &AppConfig) -> RedisUserCache {
    if config.cache.backend == CacheBackend::Disabled {
        info!("Cache disabled; reads go straight to the store");
        return RedisUserCache::disabled();
    }

    let cache = match RedisUserCache::from_config(&config.cache) {
        Ok(cache) => cache,
        Err(e) => {
            error!("Cache setup failed, continuing without cache: {}", e);
            return RedisUserCache::disabled();
        }
    };

    match cache.ping().await {
        Ok(()) => cache,
        Err(e) => {
            error!("Cache unreachable, continuing without cache: {}", e);
            RedisUserCache::disabled()
        }
    }
}
