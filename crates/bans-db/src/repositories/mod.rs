//! Repository implementations
//!
//! Simulated implementations of the repository traits defined in bans-core.

mod ban;

pub use ban::BansDao;
