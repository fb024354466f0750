//! JSON-RPC Pool (v0.1)
//!
//! Round-robin reverse proxy for JSON-RPC endpoints, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http::server ─▶ http::handler              │
//!                             │                     │  method gate           │
//!                             │                     │  body + id extraction  │
//!                             │                     ▼                        │
//!                             │              load_balancer::RoundRobin       │
//!                             │                     │  pick()                │
//!                             │                     ▼                        │
//!     Client Response         │              reqwest upstream client ───────┼──▶ RPC endpoint
//!     ◀───────────────────────┼── http::response ◀──┘                        │
//!                             └──────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! - `RPC_LIST` / `--rpc-list`: comma-separated upstream URLs (required)
//! - `PORT` / `--port`: listen port (default 8080)
//! - `RPC_POOL_CONFIG` / `--config`: optional TOML file; env and flags override it

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use rpc_pool::config::{resolve_config, ConfigOverrides};
use rpc_pool::http::HttpServer;
use rpc_pool::lifecycle::{shutdown_on_signal, Shutdown};
use rpc_pool::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "rpc-pool")]
#[command(version, about = "Round-robin JSON-RPC load balancer", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RPC_POOL_CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated list of upstream RPC URLs.
    #[arg(long, env = "RPC_LIST")]
    rpc_list: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "RPC_POOL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "RPC_POOL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            rpc_list: self.rpc_list.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
            request_timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability.log_level);
    tracing::info!("rpc-pool v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.bind_address(),
        endpoints = config.endpoints.len(),
        request_timeout_secs = config.upstream.request_timeout_secs,
        forward_headers = ?config.upstream.forward_headers,
        "Configuration loaded"
    );
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        tracing::debug!(index, endpoint = %endpoint, "Upstream endpoint");
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let _signals = shutdown_on_signal(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
