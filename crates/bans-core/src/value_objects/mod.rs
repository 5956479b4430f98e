//! Value objects - immutable types that represent domain concepts

mod fault_policy;

pub use fault_policy::{FaultPolicy, FaultPolicyError};
