//! Function-runtime entry point.
//!
//! Parameters resolve from environment variables; queue, notification and
//! metric calls are logged.

use std::sync::Arc;

use clap::Parser;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;
use ventaro_processor::adapters::{
    EnvParameterStore, LoggingMessagingSink, LoggingMetricsSink, LoggingNotificationSink,
};
use ventaro_processor::telemetry::init_tracing;
use ventaro_processor::{Collaborators, Processor, ProcessorArgs, ProcessorConfig};

#[derive(Parser)]
#[command(name = "ventaro-lambda", about = "Ventaro API processor function")]
struct Cli {
    #[command(flatten)]
    processor: ProcessorArgs,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_tracing(&cli.processor.log_level)?;

    let config = ProcessorConfig::from(cli.processor);
    info!(environment = %config.environment, region = %config.region, "starting processor");

    let collaborators = Collaborators::new(
        Arc::new(EnvParameterStore::new()),
        Arc::new(LoggingMessagingSink),
        Arc::new(LoggingNotificationSink),
        Arc::new(LoggingMetricsSink),
    );
    let processor = Arc::new(Processor::new(config, collaborators));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let processor = Arc::clone(&processor);
        async move { Ok::<Value, Error>(processor.handle_json(event.payload).await) }
    }))
    .await
}
