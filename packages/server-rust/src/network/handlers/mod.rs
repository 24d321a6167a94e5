//! HTTP handler definitions for the storefront server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for building the router.

pub mod admin;
pub mod customer;
pub mod health;

pub use admin::attribute_grid_handler;
pub use customer::current_customer_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};

use std::sync::Arc;
use std::time::Instant;

use super::{NetworkConfig, ShutdownController};

/// Shared application state passed to handlers via `State` extraction.
///
/// Per-request identity does not live here; handlers read it from the
/// `RequestContext` extension set by the customer-session layer.
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle state for health probes.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration (bind address, CORS, timeouts).
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(config: NetworkConfig, shutdown: Arc<ShutdownController>) -> Self {
        Self {
            shutdown,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
