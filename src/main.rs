//! Roundhold Game Server
//!
//! Authoritative WebSocket server for 1v1 Roundhold matches.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roundhold::balance::TICK_RATE;
use roundhold::config::{Cli, ServerConfig};
use roundhold::network::MatchServer;
use roundhold::VERSION;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env().with_cli_overrides(&cli);

    tracing::info!("Roundhold Server v{VERSION}");
    tracing::info!("Tick rate: {TICK_RATE} Hz");
    tracing::info!("Binding to {}", config.bind_addr);
    tracing::info!("Worker threads: {}", config.worker_threads);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");

    runtime.block_on(run(config));
}

async fn run(config: ServerConfig) {
    let server = MatchServer::new(config.bind_addr);

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                tracing::error!("server error: {e}");
                std::process::exit(1);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("received shutdown signal");
            server.shutdown();
        }
    }
}

/// Resolves once either `SIGINT` (Ctrl-C) or, on Unix, `SIGTERM` arrives, so a
/// `kill` or container stop tears down in-flight matches the same as a Ctrl-C.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
