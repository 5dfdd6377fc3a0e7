//! HTTP handler definitions for the development server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod api;
pub mod health;
pub mod invoke;
pub mod metrics;

pub use api::api_handler;
pub use health::liveness_handler;
pub use invoke::invoke_handler;
pub use self::metrics::metrics_handler;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::service::Processor;

/// Shared application state passed to all axum handlers via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    /// The processor every request is handed to.
    pub processor: Arc<Processor>,
    /// Render handle of the installed Prometheus recorder, if any.
    pub prometheus: Option<PrometheusHandle>,
}
