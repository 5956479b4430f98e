//! Metrics sink port - receives one record per measured store call

use std::time::Duration;

/// Outcome of a measured call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOutcome {
    Success,
    Error,
}

impl CallOutcome {
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Destination for call measurements.
///
/// `call_ended` is invoked exactly once per measured call.
pub trait MetricsSink: Send + Sync {
    fn call_ended(&self, store: &str, operation: &str, outcome: CallOutcome, elapsed: Duration);
}
