//! Network configuration for the development server.

use std::time::Duration;

/// Bind address and transport limits.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Command-line / environment flags for the bind address.
#[derive(Debug, Clone, clap::Args)]
pub struct NetworkArgs {
    /// Bind address.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Port to listen on (0 for an OS-assigned port).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
    /// Transport-level request timeout in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl From<NetworkArgs> for NetworkConfig {
    fn from(args: NetworkArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        }
    }
}
