//! Local development server.
//!
//! Parameters resolve from environment variables, queue and notification
//! calls are logged, and metrics go to a Prometheus recorder scraped at
//! `/metrics`.

use std::sync::Arc;

use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use ventaro_processor::adapters::{
    EnvParameterStore, LoggingMessagingSink, LoggingNotificationSink, RecorderMetricsSink,
};
use ventaro_processor::network::config::NetworkArgs;
use ventaro_processor::network::{DevServer, NetworkConfig};
use ventaro_processor::telemetry::init_tracing;
use ventaro_processor::{Collaborators, Processor, ProcessorArgs, ProcessorConfig};

#[derive(Parser)]
#[command(name = "ventaro-dev-server", about = "Ventaro API processor over HTTP")]
struct Cli {
    #[command(flatten)]
    processor: ProcessorArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.processor.log_level)?;

    let prometheus = PrometheusBuilder::new().install_recorder()?;

    let config = ProcessorConfig::from(cli.processor);
    info!(environment = %config.environment, region = %config.region, "starting processor");

    let collaborators = Collaborators::new(
        Arc::new(EnvParameterStore::new()),
        Arc::new(LoggingMessagingSink),
        Arc::new(LoggingNotificationSink),
        Arc::new(RecorderMetricsSink::new()),
    );
    let processor = Arc::new(Processor::new(config, collaborators));

    let mut server = DevServer::new(NetworkConfig::from(cli.network), processor, Some(prometheus));
    server.start().await?;
    server.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
