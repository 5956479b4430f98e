//! Domain entities - core business objects

mod ban;

pub use ban::Ban;
