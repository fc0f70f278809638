use eventhub::aggregator::Aggregator;
use eventhub::config::env_loader::load_config;
use eventhub::server::run_server;
use eventhub::tracing::setup_tracing;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let loki = setup_tracing(config.loki_url.as_deref()).await;

    let exit_code = match Aggregator::from_config(&config.providers) {
        Ok(aggregator) => {
            info!("Searching {:?}", aggregator.providers());

            match run_server(config.bind_addr, aggregator).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!("Server stopped: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            error!("Invalid provider configuration: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        if let Err(err) = handle.await {
            error!("Loki background task failed: {}", err);
        }
    }

    exit_code
}
