//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the token verifier, and the backing stores probed by readiness checks.

use std::sync::Arc;

use teamhub_cache::SharedRedisPool;
use teamhub_common::JwtService;
use teamhub_db::PgPool;
use teamhub_service::ServiceContext;

/// External stores the server was started against
#[derive(Clone)]
pub struct Backends {
    pub pool: PgPool,
    pub redis: SharedRedisPool,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    jwt_service: Arc<JwtService>,
    /// `None` when running on the in-memory store
    backends: Option<Backends>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, jwt_service: JwtService) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service: Arc::new(jwt_service),
            backends: None,
        }
    }

    #[must_use]
    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = Some(backends);
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn backends(&self) -> Option<&Backends> {
        self.backends.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("backends", &self.backends.is_some())
            .finish()
    }
}
