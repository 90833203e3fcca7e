//! Runs the service registry HTTP daemon.
//!
//! ```text
//! registryd [--config registry.toml] [--listen 0.0.0.0:8000] [--log-level debug] [--json]
//! ```
//!
//! Command-line flags override values loaded from the configuration file and
//! `REGISTRY_`-prefixed environment variables.

use clap::Parser;
use mockable::DefaultClock;
use service_registry::config::{ConfigLoadError, RegistryConfig};
use service_registry::server::{RegistryServer, ServerError, shutdown_signal};
use service_registry::telemetry::{TelemetryError, init_tracing};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Service registry daemon.
#[derive(Debug, Parser)]
#[command(name = "registryd", version, about = "Service registry for agents and tools")]
struct Cli {
    /// Configuration file (TOML, YAML, or JSON).
    #[arg(short, long, env = "REGISTRY_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Socket address to listen on.
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Log filter directive such as `info` or `service_registry=debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON log lines.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut RegistryConfig) {
        if let Some(listen) = self.listen {
            config.server.listen_addr = listen;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json {
            config.logging.json = true;
        }
    }
}

#[derive(Debug, Error)]
enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    let cli = Cli::parse();
    let mut config = RegistryConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_tracing(&config.logging.level, config.logging.json)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting service registry");

    let server = RegistryServer::new(config, Arc::new(DefaultClock))?;
    server.run(shutdown_signal()).await?;
    Ok(())
}
