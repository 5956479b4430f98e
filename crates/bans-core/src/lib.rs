//! # bans-core
//!
//! Domain layer for the simulated ban store: the `Ban` entity, the store error
//! kinds, the fault-injection policy, and the ports (repository, latency source,
//! metrics sink) that the infrastructure crates implement.
//! This crate has zero dependencies on infrastructure (runtime, tracing backend, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::Ban;
pub use error::StoreError;
pub use traits::{BanRepository, CallOutcome, LatencySource, MetricsSink, RepoResult};
pub use value_objects::{FaultPolicy, FaultPolicyError};
