//! # Synapse API Server
//!
//! Axum-based HTTP API server for Synapse, a student-project collaboration
//! platform. The core of this crate is the membership service: project
//! creation, the join-request lifecycle, and transactional capacity
//! enforcement.
//!
//! ## Modules
//!
//! - [`identity`]: Bearer-token verification (issuance is external)
//! - [`membership`]: Project membership and join-request handlers
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: HTTP middleware (auth)
//! - [`realtime`]: Presence registry and membership event broadcast
//! - [`router`]: API route configuration

use std::sync::Arc;

pub mod dto;
pub mod identity;
pub mod membership;
pub mod middleware;
pub mod realtime;
pub mod router;
pub mod utils;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// Token verification configuration
    pub jwt_config: identity::JwtConfig,
    /// Presence registry and membership event channels
    pub realtime:   Arc<realtime::Realtime>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Creates application state with a fresh realtime registry.
    #[must_use]
    pub fn new(db: sea_orm::DbConn, jwt_config: identity::JwtConfig) -> Self {
        Self {
            db,
            jwt_config,
            realtime: Arc::new(realtime::Realtime::new()),
            start_time: std::time::Instant::now(),
        }
    }
}
