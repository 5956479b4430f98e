//! # bans-common
//!
//! Shared utilities including configuration, tracing setup, and call metrics.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppConfig, AppSettings, ConfigError, Environment, SimulationConfig, StoreConfig};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    CallStats, DbCall, DbMetrics, InMemoryMetrics, TracingConfig, TracingError,
};
