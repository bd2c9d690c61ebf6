use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use miniblog::config::{self, validation::validate_config, ConfigError};
use miniblog::lifecycle::signals;
use miniblog::observability::{logging, metrics};
use miniblog::{AppConfig, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "miniblog")]
#[command(about = "A tiny social feed", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show failure reasons on 404 pages
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => {
            let config = AppConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };
    if cli.debug {
        config.app.debug = true;
    }

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "miniblog starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.0.len(),
        debug = config.app.debug,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
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
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::forward_to(&signal_shutdown).await;
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
