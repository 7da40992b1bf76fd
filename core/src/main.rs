//! Plugin Market Server Executable
//!
//! Main entry point for the plugin catalog HTTP service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use market_core::{CatalogService, CatalogStore, Config, MarketServer};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "marketd", version, about = "Plugin market catalog server")]
struct Args {
    /// Path to the TOML configuration file (default: $MARKET_CONFIG, then config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Catalog document path, overrides the config file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Answer with a server error when the catalog document is unreadable
    #[arg(long)]
    strict_reads: bool,
}

fn get_env_filter() -> EnvFilter {
    if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else if cfg!(debug_assertions) {
        EnvFilter::new("marketd=debug,market_core=debug,tower_http=debug")
    } else {
        EnvFilter::new("marketd=info,market_core=info")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.storage.data_file = data_file;
    }
    if args.strict_reads {
        config.storage.strict_reads = true;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.server.log_file)?;

    // Non-blocking log appenders
    let (file_non_blocking, file_guard) = tracing_appender::non_blocking(log_file);
    let (console_non_blocking, console_guard) = tracing_appender::non_blocking(std::io::stderr());
    // Keep the writer threads alive until main returns
    let _guards = (file_guard, console_guard);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_thread_ids(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(console_non_blocking)
        .with_ansi(true)
        .with_target(false)
        .compact();

    Registry::default()
        .with(get_env_filter())
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Plugin market v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(?config, "Resolved configuration");

    let store = Arc::new(CatalogStore::new(&config.storage.data_file));
    let service = CatalogService::new(store).with_strict_reads(config.storage.strict_reads);
    let server = MarketServer::new(config.server, service);

    let shutdown_token = server.shutdown_token();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown_token.cancel();
    });

    server.run().await?;

    tracing::info!("Plugin market stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, initiating shutdown...");
                    }
                }
            }
            _ => {
                tracing::warn!("Failed to register unix signal handlers, falling back to Ctrl+C");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            tracing::warn!("Server will run without console signal handling");
            std::future::pending::<()>().await;
        }
    }
}
