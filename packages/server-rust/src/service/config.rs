use ventaro_core::keys::METRICS_NAMESPACE;

/// Processor-level configuration.
///
/// Read-only for the lifetime of the process; every invocation sees the same
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Deployment environment name, attached to messages and metrics.
    pub environment: String,
    /// Region reported by the health endpoint.
    pub region: String,
    /// Namespace for every metric data point.
    pub metrics_namespace: String,
    /// Version reported by the health endpoint.
    pub service_version: String,
    /// Deadline per request-handler call in milliseconds. 0 disables it.
    pub handler_timeout_ms: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            region: "us-west-2".to_string(),
            metrics_namespace: METRICS_NAMESPACE.to_string(),
            service_version: "1.0.0".to_string(),
            handler_timeout_ms: 25_000,
        }
    }
}

/// Command-line / environment flags shared by both binaries.
#[derive(Debug, Clone, clap::Args)]
pub struct ProcessorArgs {
    /// Deployment environment name.
    #[arg(long, env = "ENVIRONMENT", default_value = "dev")]
    pub environment: String,
    /// Deployment region.
    #[arg(long, env = "REGION", default_value = "us-west-2")]
    pub region: String,
    /// Metric namespace.
    #[arg(long, env = "METRICS_NAMESPACE", default_value = METRICS_NAMESPACE)]
    pub metrics_namespace: String,
    /// Per-handler deadline in milliseconds (0 disables).
    #[arg(long, env = "HANDLER_TIMEOUT_MS", default_value_t = 25_000)]
    pub handler_timeout_ms: u64,
    /// Log level used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl From<ProcessorArgs> for ProcessorConfig {
    fn from(args: ProcessorArgs) -> Self {
        Self {
            environment: args.environment,
            region: args.region,
            metrics_namespace: args.metrics_namespace,
            handler_timeout_ms: args.handler_timeout_ms,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        processor: ProcessorArgs,
    }

    #[test]
    fn processor_config_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.environment, "dev");
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.metrics_namespace, "VentaroAI");
        assert_eq!(config.service_version, "1.0.0");
        assert_eq!(config.handler_timeout_ms, 25_000);
    }

    #[test]
    fn args_convert_into_config() {
        let cli = TestCli::parse_from([
            "test",
            "--environment",
            "prod",
            "--region",
            "eu-central-1",
            "--handler-timeout-ms",
            "0",
        ]);
        let config = ProcessorConfig::from(cli.processor);
        assert_eq!(config.environment, "prod");
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.handler_timeout_ms, 0);
        assert_eq!(config.service_version, "1.0.0");
    }
}
