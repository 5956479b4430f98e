//! Latency source port for simulated backends

use std::time::Duration;

use crate::value_objects::FaultPolicy;

/// Supplies the simulated latency of each store call.
///
/// Random sources draw below `policy.max_latency()`; scripted ones may return anything.
pub trait LatencySource: Send + Sync {
    fn draw(&self, policy: &FaultPolicy) -> Duration;
}
