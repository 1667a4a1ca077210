//! SnapKV Server Binary
//!
//! Starts the HTTP server for SnapKV.

use std::time::Duration;

use clap::Parser;
use snapkv::network::{shutdown_signal, Server};
use snapkv::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// SnapKV Server
#[derive(Parser, Debug)]
#[command(name = "snapkv-server")]
#[command(about = "HTTP key-value store for JSON documents with periodic snapshots")]
#[command(version)]
struct Args {
    /// Data directory (snapshot and backups)
    #[arg(short, long, default_value = "./database")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:4820")]
    listen: String,

    /// Seconds between autosaves
    #[arg(short, long, default_value = "60")]
    autosave_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snapkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("SnapKV Server v{}", snapkv::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .autosave_interval(Duration::from_secs(args.autosave_secs))
        .build();

    // Open engine (loads the latest snapshot)
    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    // Start autosave and register the final save
    let autosave = match engine.start_autosave() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to start autosave: {}", e);
            std::process::exit(1);
        }
    };
    let coordinator = engine.shutdown_coordinator(Some(autosave));

    tracing::info!("Engine initialized successfully");

    // Serve until SIGINT/SIGTERM
    let served = match Server::bind(engine).await {
        Ok(server) => server.run(shutdown_signal()).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &served {
        tracing::error!("Server error: {}", e);
    }

    // Final save runs on a blocking thread so the runtime stays responsive
    let flushed = tokio::task::spawn_blocking(move || coordinator.shutdown()).await;
    let flushed_ok = matches!(flushed, Ok(Ok(_)));
    if let Err(e) = flushed {
        tracing::error!("Shutdown task failed: {}", e);
    }

    tracing::info!("Server stopped");

    if served.is_err() || !flushed_ok {
        std::process::exit(1);
    }
}
