//! Clinic Server
//!
//! Serves the appointment listing and department upsert for every client
//! organization, each backed by its own database.

use clap::Parser;
use clinic_persistence::backends::sqlite::SqliteBackend;
use clinic_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

/// Creates the SQLite backend from the server configuration.
fn create_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    match &config.data_dir {
        Some(dir) => info!(data_dir = %dir.display(), "Client databases stored on disk"),
        None => info!("Client databases held in memory"),
    }

    let backend = SqliteBackend::with_config(config.backend_config())?;
    Ok(backend)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        max_connections = config.max_connections,
        "Starting clinic server"
    );

    let backend = create_backend(&config)?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}
