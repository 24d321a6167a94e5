//! Network module with deferred startup lifecycle.
//!
//! `new()` wires shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves. The
//! split lets the binary report the bound port before serving.

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::handlers::{
    attribute_grid_handler, current_customer_handler, health_handler, liveness_handler,
    readiness_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;
use crate::auth::{CustomerSessionLayer, SessionResolver};

/// Manages the HTTP server lifecycle.
///
/// 1. `new()` -- allocates shared state (shutdown controller, resolver)
/// 2. `start()` -- binds the TCP listener to the configured address
/// 3. `serve()` -- serves until the shutdown future resolves
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    shutdown: Arc<ShutdownController>,
    resolver: Arc<SessionResolver>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, resolver: Arc<SessionResolver>) -> Self {
        Self {
            config,
            listener: None,
            shutdown: Arc::new(ShutdownController::new()),
            resolver,
        }
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /health` -- health JSON
    /// - `GET /health/live` -- liveness probe
    /// - `GET /health/ready` -- readiness probe
    /// - `GET /api/customers/me` -- customer resolved from the session cookie
    /// - `GET /api/admin/attributes/grid` -- attribute grid page context
    ///
    /// Only the `/api` routes run the customer-session layer, so probes never
    /// touch the session or customer stores.
    pub fn build_router(&self) -> Router {
        build_router(
            &self.config,
            Arc::clone(&self.shutdown),
            Arc::clone(&self.resolver),
        )
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which differs from the configured one
    /// when port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until `shutdown` resolves, then lets in-flight
    /// requests finish.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or if the server
    /// hits a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let Some(listener) = self.listener else {
            anyhow::bail!("start() must be called before serve()");
        };
        let controller = self.shutdown;

        controller.set_ready();
        info!("Serving HTTP connections");

        let draining = Arc::clone(&controller);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown signalled, draining in-flight requests");
                draining.begin_draining();
            })
            .await?;

        controller.mark_stopped();
        info!("Server stopped");
        Ok(())
    }
}

fn build_router(
    config: &NetworkConfig,
    shutdown: Arc<ShutdownController>,
    resolver: Arc<SessionResolver>,
) -> Router {
    let state = AppState::new(config.clone(), shutdown);

    let api = Router::new()
        .route("/customers/me", get(current_customer_handler))
        .route("/admin/attributes/grid", get(attribute_grid_handler))
        .layer(CustomerSessionLayer::new(resolver));

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .nest("/api", api)
        .layer(build_http_layers(config))
        .with_state(state)
}
