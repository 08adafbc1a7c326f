use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::target::ProbeTarget;

/// Cadence of the write prober
pub const WRITE_PERIOD: Duration = Duration::from_secs(10);

/// Cadence of the read prober
pub const READ_PERIOD: Duration = Duration::from_secs(1);

/// How long in-flight probes may run on after shutdown before being aborted
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Write,
    Read,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Write => f.write_str("write"),
            ProbeKind::Read => f.write_str("read"),
        }
    }
}

/// Outcome counts of a finished prober
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub succeeded: u64,
    pub failed: u64,
}

impl ProbeStats {
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

#[derive(Default)]
struct Counters {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> ProbeStats {
        ProbeStats {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Periodic probe loop.
///
/// Fires every `period`, the first tick one period after start. Each tick
/// spawns its probe as its own task, so a slow request never delays the
/// next tick and requests may overlap. Failures are logged and counted,
/// never retried. Ticks missed while the runtime was busy fire late rather
/// than being dropped.
#[derive(Debug, Clone)]
pub struct Prober {
    kind: ProbeKind,
    period: Duration,
    drain_timeout: Duration,
}

impl Prober {
    pub fn new(kind: ProbeKind, period: Duration) -> Self {
        Self {
            kind,
            period,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Inserts the probe document every 10 seconds
    pub fn write() -> Self {
        Self::new(ProbeKind::Write, WRITE_PERIOD)
    }

    /// Finds all documents every second
    pub fn read() -> Self {
        Self::new(ProbeKind::Read, READ_PERIOD)
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until `shutdown` turns true (or its sender is dropped).
    ///
    /// On shutdown, in-flight probes get `drain_timeout` to finish; the rest
    /// are aborted and do not show up in the returned stats.
    pub async fn run(
        self,
        target: Arc<dyn ProbeTarget>,
        mut shutdown: watch::Receiver<bool>,
    ) -> ProbeStats {
        let counters = Arc::new(Counters::default());
        let mut in_flight: JoinSet<()> = JoinSet::new();

        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        info!(
            probe = %self.kind,
            period_ms = self.period.as_millis() as u64,
            collection = %target.namespace(),
            "Prober started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(probe = %self.kind, error = %e, "Probe task did not complete");
                    }
                }
                _ = ticker.tick() => {
                    in_flight.spawn(probe_once(self.kind, target.clone(), counters.clone()));
                }
            }
        }

        debug!(probe = %self.kind, in_flight = in_flight.len(), "Draining in-flight probes");

        let drained = tokio::time::timeout(self.drain_timeout, async {
            while in_flight.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(
                probe = %self.kind,
                aborted = in_flight.len(),
                "In-flight probes did not finish in time, aborting"
            );
            in_flight.abort_all();
            while in_flight.join_next().await.is_some() {}
        }

        let stats = counters.snapshot();
        info!(
            probe = %self.kind,
            succeeded = stats.succeeded,
            failed = stats.failed,
            "Prober stopped"
        );
        stats
    }
}

async fn probe_once(kind: ProbeKind, target: Arc<dyn ProbeTarget>, counters: Arc<Counters>) {
    let result = match kind {
        ProbeKind::Write => target.insert_probe_document().await,
        ProbeKind::Read => target.find_all().await,
    };

    match result {
        Ok(()) => {
            counters.succeeded.fetch_add(1, Ordering::Relaxed);
            info!(collection = %target.namespace(), "{} succeed", kind);
        }
        Err(e) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            error!(collection = %target.namespace(), error = %e, "{} failed", kind);
        }
    }
}
