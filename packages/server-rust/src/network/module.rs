//! Development server with deferred startup lifecycle.
//!
//! `new()` assembles state, `start()` binds the TCP listener, and `serve()`
//! accepts connections until the shutdown future resolves.

use std::future::Future;
use std::sync::Arc;

use axum::routing::{any, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::handlers::{
    api_handler, invoke_handler, liveness_handler, metrics_handler, AppState,
};
use super::middleware::build_http_layers;
use crate::service::Processor;

/// Serves the processor over HTTP for local development.
///
/// Routes:
/// - `POST /invoke` -- raw payload in, processor result out
/// - `ANY /api/{*rest}` -- HTTP request translated to the inbound request shape
/// - `GET /health/live` -- liveness probe
/// - `GET /metrics` -- Prometheus text format
pub struct DevServer {
    config: NetworkConfig,
    state: AppState,
    listener: Option<TcpListener>,
}

impl DevServer {
    /// Creates the server without binding any port.
    #[must_use]
    pub fn new(
        config: NetworkConfig,
        processor: Arc<Processor>,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config,
            state: AppState {
                processor,
                prometheus,
            },
            listener: None,
        }
    }

    /// Assembles the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/invoke", post(invoke_handler))
            .route("/api/{*rest}", any(api_handler))
            .route("/health/live", get(liveness_handler))
            .route("/metrics", get(metrics_handler))
            .layer(build_http_layers(&self.config))
            .with_state(self.state.clone())
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// port when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
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
    /// Returns an error if `start()` was not called first, or if the server
    /// hits a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;

        info!("Serving HTTP connections");
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server stopped");
        Ok(())
    }
}
