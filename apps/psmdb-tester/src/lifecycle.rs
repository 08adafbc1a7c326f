//! Signal handling and shutdown ordering.

use eyre::{Result, WrapErr};
use std::fmt;
use std::future::Future;
use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::probe::ProbeStats;

/// The signal that ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM)
///
/// Both handlers are installed before the wait starts.
pub async fn shutdown_signal() -> Result<ShutdownSignal> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .wrap_err("Failed to install SIGTERM handler")?;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .wrap_err("Failed to install Ctrl+C handler")
    };

    #[cfg(unix)]
    let terminate = async {
        terminate.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        result = ctrl_c => {
            result?;
            ShutdownSignal::Interrupt
        },
        _ = terminate => ShutdownSignal::Terminate,
    };

    info!(signal = %received, "Received shutdown signal, initiating shutdown...");
    Ok(received)
}

/// Wait for `signal`, then stop the probers and collect their stats.
///
/// The probers are stopped even if waiting failed; that error is returned
/// afterwards.
pub async fn stop_on_signal<S>(
    signal: S,
    shutdown_tx: watch::Sender<bool>,
    probers: Vec<JoinHandle<ProbeStats>>,
) -> Result<Vec<ProbeStats>>
where
    S: Future<Output = Result<ShutdownSignal>>,
{
    let received = signal.await.wrap_err("Failed to wait for shutdown signal");
    let stats = stop_probers(shutdown_tx, probers).await;
    received?;
    Ok(stats)
}

/// Tell the probers to stop and collect their stats.
///
/// A prober task that panicked is logged and reported as empty stats.
pub async fn stop_probers(
    shutdown_tx: watch::Sender<bool>,
    probers: Vec<JoinHandle<ProbeStats>>,
) -> Vec<ProbeStats> {
    let _ = shutdown_tx.send(true);

    let mut stats = Vec::with_capacity(probers.len());
    for handle in probers {
        match handle.await {
            Ok(s) => stats.push(s),
            Err(e) => {
                error!(error = %e, "Prober task failed");
                stats.push(ProbeStats::default());
            }
        }
    }
    stats
}
