//! Server configuration
//!
//! Defaults come from `balance`'s network constants; `ROUNDHOLD_*` env vars override
//! them, and a `clap`-derived CLI overrides env in turn. No game balance (tick rate,
//! costs, routes) is configurable — only how the server binds and how many worker
//! threads it runs with.

use std::net::SocketAddr;

use clap::Parser;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 42069;
const DEFAULT_WORKERS: usize = 10;

/// Resolved server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub worker_threads: usize,
}

impl ServerConfig {
    /// Build from environment variables, falling back to spec defaults.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("ROUNDHOLD_HOST").ok(),
            std::env::var("ROUNDHOLD_PORT").ok().and_then(|v| v.parse().ok()),
            std::env::var("ROUNDHOLD_WORKERS").ok().and_then(|v| v.parse().ok()),
        )
    }

    fn resolve(host: Option<String>, port: Option<u16>, worker_threads: Option<usize>) -> Self {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port.unwrap_or(DEFAULT_PORT);
        let bind_addr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));
        Self { bind_addr, worker_threads: worker_threads.unwrap_or(DEFAULT_WORKERS) }
    }

    /// Apply CLI overrides on top of an env-derived config.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.host {
            let port = self.bind_addr.port();
            if let Ok(addr) = format!("{host}:{port}").parse() {
                self.bind_addr = addr;
            }
        }
        if let Some(port) = cli.port {
            self.bind_addr.set_port(port);
        }
        if let Some(workers) = cli.workers {
            self.worker_threads = workers;
        }
        self
    }
}

/// Command-line overrides for the server binary.
#[derive(Parser, Debug)]
#[command(name = "roundhold-server", version, about = "Roundhold authoritative match server")]
pub struct Cli {
    /// Override the bind host (ROUNDHOLD_HOST env var, then 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port (ROUNDHOLD_PORT env var, then 42069).
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the worker thread count (ROUNDHOLD_WORKERS env var, then 10).
    #[arg(long)]
    pub workers: Option<usize>,
}
