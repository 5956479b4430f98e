//! Latency sources for the simulated backend
//!
//! `UniformLatency` is what production wiring uses. `FixedLatency` and
//! `ScriptedLatency` make the failure branch deterministic in tests and demos.

mod scripted;
mod uniform;

pub use scripted::{FixedLatency, ScriptedLatency};
pub use uniform::UniformLatency;
