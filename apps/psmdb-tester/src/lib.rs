//! MongoDB liveness tester
//!
//! Connects to a single MongoDB deployment, pings the primary and then keeps
//! two probes running until SIGINT/SIGTERM:
//!
//! ```text
//! config.yaml ──> Config ──> connect + ping (10s bound from launch)
//!                               │
//!              ┌────────────────┴────────────────┐
//!        write prober (10s)                read prober (1s)
//!        insert {name: "ege"}              find {}
//!              └────────────────┬────────────────┘
//!                        shutdown signal
//!                               │
//!                  stop probers ──> release client
//! ```
//!
//! Every probe outcome is one log line; failures never stop the loop.

pub mod config;
pub mod lifecycle;
pub mod probe;

#[cfg(test)]
mod test_logs;

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{FromYaml, YamlSource};
use database::mongodb::{Client, MongoConfig, connect_before, release};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

use config::{Config, Environment};
use probe::{MongoProbeTarget, ProbeTarget, Prober};

/// Run the tester until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if:
/// - The config file is missing or unparsable
/// - The connection or the primary ping fails, or does not finish within
///   the startup timeout counted from the start of this call
/// - The shutdown signal handlers cannot be installed
pub async fn run() -> Result<()> {
    let launched = Instant::now();

    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let source = YamlSource::discover(".").wrap_err("Failed to load configuration")?;
    for key in Config::missing_keys(&source) {
        warn!(key, "Config key not set, using empty string");
    }
    let config = Config::from_yaml(&source).wrap_err("Failed to load configuration")?;

    let deadline = launched + Duration::from_secs(config.mongodb.startup_timeout_secs);
    let client = connect_primary(&config.mongodb, deadline).await?;

    let db = client.database(config.mongodb.database());
    let target: Arc<dyn ProbeTarget> = Arc::new(MongoProbeTarget::new(&db, &config.collection));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let probers = vec![
        tokio::spawn(Prober::write().run(target.clone(), shutdown_rx.clone())),
        tokio::spawn(Prober::read().run(target, shutdown_rx)),
    ];

    let stats =
        lifecycle::stop_on_signal(lifecycle::shutdown_signal(), shutdown_tx, probers).await?;

    release(client).await;

    for (kind, s) in ["write", "read"].into_iter().zip(&stats) {
        info!(probe = kind, succeeded = s.succeeded, failed = s.failed, "Probe totals");
    }

    info!("psmdb-tester shutdown complete");
    Ok(())
}

/// Connect, ping the primary before `deadline` and log the connected host once
pub async fn connect_primary(config: &MongoConfig, deadline: Instant) -> Result<Client> {
    let client = connect_before(config, deadline)
        .await
        .wrap_err_with(|| format!("Failed to connect to MongoDB at {}", config.host()))?;

    info!(host = %config.host(), "Successfully connected and pinged");
    Ok(client)
}
