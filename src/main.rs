//! Pricewatch service binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricewatch::config::{Config, LogFormat, LoggingConfig};
use pricewatch::http::HttpServer;
use pricewatch::scraping::PageFetcher;
use pricewatch::tracker::Tracker;

#[derive(Parser)]
#[command(name = "pricewatch")]
#[command(about = "Marketplace product price tracker")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Listen address override (e.g., "0.0.0.0:8080")
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Validate the configuration file and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    init_tracing(&config.logging);

    if !cli.config.exists() {
        info!(path = %cli.config.display(), "no config file found, using defaults");
    }

    match cli.command {
        Commands::Serve { listen } => serve(config, listen).await,
        Commands::CheckConfig => {
            config.validate()?;
            println!("Configuration OK");
            Ok(())
        }
    }
}

async fn serve(mut config: Config, listen: Option<String>) -> Result<()> {
    if let Some(listen) = listen {
        config.server.listen_addr = listen;
    }

    let fetcher = PageFetcher::new(&config.fetch)
        .map_err(|e| anyhow::anyhow!("Failed to create page fetcher: {}", e))?;
    let tracker = Arc::new(Tracker::new(
        fetcher,
        (&config.rate_limit).into(),
        (&config.cache).into(),
    ));

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received ctrl-c, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    let server = HttpServer::new(config.server.clone(), tracker);
    server.run(shutdown_rx).await
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
