//! Energy data proxy
//!
//! ```text
//!     Client ──▶ http (request id, limits, handlers)
//!                   │
//!                   ├──▶ mastr  (JSON POST, apiKey injected)      ──▶ MaStR
//!                   └──▶ entsoe (XML GET, securityToken injected) ──▶ ENTSO-E
//!                   │
//!     Client ◀── typed JSON, or {"detail": ...} on failure
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use energy_data_proxy::config::load_config;
use energy_data_proxy::lifecycle::{wait_for_signal, Shutdown};
use energy_data_proxy::observability::{logging, metrics};
use energy_data_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "energy-data-proxy", version)]
#[command(about = "HTTP proxy for MaStR and ENTSO-E energy data", long_about = None)]
struct Args {
    /// TOML configuration file. Without it, defaults plus environment apply.
    #[arg(short, long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; variables may come from the environment.
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init_logging(&config.observability)?;

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "energy-data-proxy starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let stopped = shutdown.subscribe();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();
    });

    server.run(listener, stopped).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
