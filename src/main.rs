//! header-shield
//!
//! A header-injecting HTTP front built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  HEADER SHIELD                   │
//!                      │                                                  │
//!     Client Request   │  ┌──────────┐   ┌─────────────┐   ┌──────────┐   │
//!     ─────────────────┼─▶│ trace /  │──▶│ flush layer │──▶│  header  │   │
//!                      │  │ req. id  │   │ (hooks in)  │   │ units ×N │   │
//!                      │  └──────────┘   └─────────────┘   └────┬─────┘   │
//!                      │                                        ▼         │
//!     Client Response  │  ┌──────────┐   ┌─────────────┐   ┌──────────┐   │
//!     ◀────────────────┼──│ trace /  │◀──│ flush layer │◀──│ upstream │◀──┼── Upstream
//!                      │  │ req. id  │   │ (hooks run) │   │ forward  │   │
//!                      │  └──────────┘   └─────────────┘   └──────────┘   │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use axum::http::HeaderMap;
use clap::Parser;
use tokio::net::TcpListener;

use header_shield::config::{load_config, ShieldConfig};
use header_shield::http::{shutdown_signal, HttpServer};
use header_shield::observability::init_logging;

#[derive(Parser)]
#[command(name = "header-shield")]
#[command(about = "Adds security response headers in front of an HTTP service", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the headers one response would receive, then exit.
    #[arg(long)]
    print_headers: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShieldConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!("header-shield v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;

    if cli.print_headers {
        for (name, value) in server.suite().render(HeaderMap::new()).iter() {
            println!("{}: {}", name, value.to_str().unwrap_or("<opaque>"));
        }
        return Ok(());
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
