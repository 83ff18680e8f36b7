//! RAX File Server - Entry Point
//!
//! Serves a single directory tree over HTTP: folder listings and file
//! downloads, confined to the configured root.

use log::{error, info};
use std::process::ExitCode;

use rax_file_server::utils::logging::setup_logging;
use rax_file_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // env_logger picks up RUST_LOG, defaulting to info
    setup_logging();

    info!("Launching file server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::bind(&config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Server terminated with error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
