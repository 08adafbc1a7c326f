//! Write and read probers and the store they exercise.

mod prober;
mod target;

pub use prober::{
    DEFAULT_DRAIN_TIMEOUT, ProbeKind, ProbeStats, Prober, READ_PERIOD, WRITE_PERIOD,
};
pub use target::{MongoProbeTarget, ProbeError, ProbeResult, ProbeTarget, probe_document};

#[cfg(test)]
pub use target::MockProbeTarget;
