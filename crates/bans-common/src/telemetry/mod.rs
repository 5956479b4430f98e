//! Telemetry: tracing setup and call metrics

mod metrics;
mod tracing_setup;

pub use metrics::{CallStats, DbCall, DbMetrics, InMemoryMetrics};
pub use tracing_setup::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
