pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = config::Config::parse();

    if let Err(err) = telemetry::init_tracing(&config.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting user service...");

    match api::server::start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server stopped");
            ExitCode::FAILURE
        }
    }
}
