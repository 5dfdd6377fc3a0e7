//! Development HTTP server: exposes the processor over plain HTTP.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod module;

pub use config::NetworkConfig;
pub use handlers::AppState;
pub use module::DevServer;
