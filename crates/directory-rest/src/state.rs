//! Application state for Axum handlers.

use directory_core::{HealthCheck, RequestContext};
use directory_service::UserService;
use shaku::HasComponent;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub health_checks: Arc<[Arc<dyn HealthCheck>]>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new application state with no readiness checks.
    pub fn new(user_service: Arc<dyn UserService>, request_timeout: Duration) -> Self {
        Self {
            user_service,
            health_checks: Arc::from(Vec::new()),
            request_timeout,
        }
    }

    /// Resolves the user service from a Shaku module.
    pub fn from_module<M>(module: &M, request_timeout: Duration) -> Self
    where
        M: HasComponent<dyn UserService>,
    {
        Self::new(module.resolve(), request_timeout)
    }

    /// Sets the checks consulted by the readiness endpoint.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::from(checks);
        self
    }

    /// Builds the context for one inbound request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
