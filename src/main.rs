// Main entry point for the gifmaker-server application.
// Parses configuration, initializes logging, bootstraps the working
// directories, configures the Axum router, and starts the HTTP server.

mod catalog;
mod estimator;
mod shutdown_signal;
mod web;

use clap::Parser;
use shutdown_signal::shutdown_signal;
use std::{path::PathBuf, sync::Arc};
use tracing::Level;
use web::{AppState, create_app, create_listener};

/// Command line arguments for gifmaker-server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to.
    /// If this option is specified without value, it will default to "*", meaning the server will listen on all interfaces.
    #[arg(long, env = "GIFMAKER_SERVER_HOST", default_value = "localhost", num_args = 0..=1, default_missing_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "GIFMAKER_SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory generated GIFs are written to.
    #[arg(long, env = "GIFMAKER_SERVER_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Directory reserved for raw uploads.
    #[arg(long, env = "GIFMAKER_SERVER_UPLOADS_DIR", default_value = "uploads")]
    uploads_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    tracing::info!("Starting gifmaker-server...");
    tracing::info!("Output directory: {}", config.output_dir.display());
    tracing::info!("Uploads directory: {}", config.uploads_dir.display());

    // Bootstrap the working directories before accepting any request.
    for dir in [&config.uploads_dir, &config.output_dir] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::error!("FATAL: Failed to create directory {}: {}", dir.display(), e);
            eprintln!(
                "FATAL: Could not create directory {}. Error: {}. Exiting.",
                dir.display(),
                e
            );
            std::process::exit(1);
        }
    }

    let state = Arc::new(AppState {
        output_dir: config.output_dir.clone(),
    });

    let app = create_app(state);
    tracing::info!("Axum router configured.");

    // --- Start HTTP Server ---
    let listener = match create_listener(&config.host, config.port).await {
        Ok((addr, l)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            eprintln!("FATAL: Could not bind server. Error: {}. Exiting.", e);
            std::process::exit(1);
        }
    };

    // Run the server.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {}", e);
    }

    tracing::info!("gifmaker-server has shut down.");
}
