//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use directory_config::ServerConfig;
use directory_core::HealthCheck;
use directory_service::UserService;
use shaku::HasComponent;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Creates the main application router from a Shaku module.
///
/// `health_checks` back the `/ready` endpoint.
pub fn create_router<M>(
    module: &M,
    server_config: &ServerConfig,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> Router
where
    M: HasComponent<dyn UserService>,
{
    let state = AppState::from_module(module, server_config.request_timeout())
        .with_health_checks(health_checks);
    build_router(state, server_config)
}

/// Creates the router over an already assembled state.
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        .merge(health_controller::router())
        .nest("/users", user_controller::router())
        .route("/", get(root))
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state);

    info!("Router created with user and health endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "User Directory API"
}
