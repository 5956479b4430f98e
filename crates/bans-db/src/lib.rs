//! # bans-db
//!
//! Data access for bans, backed by an in-memory table behind a simulated remote
//! backend.
//!
//! ## Overview
//!
//! `BansDao` behaves like a slow, unreliable database: every call sleeps for a
//! latency drawn from a `LatencySource`, and calls slower than the fault policy's
//! threshold fail with `StoreError::BackendFailure`. Each call runs inside a
//! tracing span and, once past input validation, is measured through `DbMetrics`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bans_common::InMemoryMetrics;
//! use bans_core::{Ban, BanRepository};
//! use bans_db::BansDao;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let metrics = Arc::new(InMemoryMetrics::new());
//!     let dao = BansDao::new(metrics.clone());
//!
//!     dao.add_ban(Ban::new("ban-1", "user-42")).await?;
//!     let ban = dao.get_ban("ban-1").await?;
//!     Ok(())
//! }
//! ```

pub mod latency;
pub mod repositories;

// Re-export commonly used types
pub use latency::{FixedLatency, ScriptedLatency, UniformLatency};
pub use repositories::BansDao;
