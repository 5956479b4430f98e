//! Fault policy - the latency range and the threshold above which a call fails
//!
//! A call draws a latency in `[0, max_latency)` whole milliseconds. Any draw strictly
//! greater than `failure_threshold` is treated as a backend failure, so with the
//! defaults (3000 ms / 2000 ms) roughly one call in three fails.

use std::time::Duration;

/// Latency range and failure threshold for simulated store calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultPolicy {
    max_latency: Duration,
    failure_threshold: Duration,
}

impl FaultPolicy {
    /// Default upper bound (exclusive) of the simulated latency
    pub const DEFAULT_MAX_LATENCY: Duration = Duration::from_millis(3000);

    /// Default latency above which a call fails
    pub const DEFAULT_FAILURE_THRESHOLD: Duration = Duration::from_millis(2000);

    /// Create a policy, rejecting an empty latency range
    pub fn new(
        max_latency: Duration,
        failure_threshold: Duration,
    ) -> Result<Self, FaultPolicyError> {
        if max_latency.as_millis() == 0 {
            return Err(FaultPolicyError::EmptyLatencyRange);
        }
        Ok(Self {
            max_latency,
            failure_threshold,
        })
    }

    /// Build a policy from millisecond values
    pub fn from_millis(max_latency_ms: u64, failure_threshold_ms: u64) -> Result<Self, FaultPolicyError> {
        Self::new(
            Duration::from_millis(max_latency_ms),
            Duration::from_millis(failure_threshold_ms),
        )
    }

    /// Exclusive upper bound of the latency draw
    #[inline]
    pub const fn max_latency(&self) -> Duration {
        self.max_latency
    }

    /// Latency above which a call is failed
    #[inline]
    pub const fn failure_threshold(&self) -> Duration {
        self.failure_threshold
    }

    /// Whether a call that took `latency` is an injected failure
    #[inline]
    pub fn is_failure(&self, latency: Duration) -> bool {
        latency > self.failure_threshold
    }

    /// Probability of failure for a uniform whole-millisecond draw
    pub fn failure_probability(&self) -> f64 {
        let max = self.max_latency.as_millis();
        let threshold = self.failure_threshold.as_millis();
        // draws are 0..max, failing ones are threshold+1..max
        let failing = max.saturating_sub(threshold.saturating_add(1));
        failing as f64 / max as f64
    }
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            max_latency: Self::DEFAULT_MAX_LATENCY,
            failure_threshold: Self::DEFAULT_FAILURE_THRESHOLD,
        }
    }
}

/// Error when building a fault policy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaultPolicyError {
    #[error("Maximum latency must be at least 1ms")]
    EmptyLatencyRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = FaultPolicy::default();
        assert_eq!(policy.max_latency(), Duration::from_millis(3000));
        assert_eq!(policy.failure_threshold(), Duration::from_millis(2000));
    }

    #[test]
    fn test_threshold_is_strict() {
        let policy = FaultPolicy::default();
        assert!(!policy.is_failure(Duration::ZERO));
        assert!(!policy.is_failure(Duration::from_millis(2000)));
        assert!(policy.is_failure(Duration::from_millis(2001)));
        assert!(policy.is_failure(Duration::from_millis(2999)));
    }

    #[test]
    fn test_failure_probability() {
        let p = FaultPolicy::default().failure_probability();
        assert!((p - 1.0 / 3.0).abs() < 0.001, "p = {p}");

        let never = FaultPolicy::from_millis(100, 500).unwrap();
        assert!(never.failure_probability().abs() < f64::EPSILON);

        let always = FaultPolicy::from_millis(100, 0).unwrap();
        assert!((always.failure_probability() - 0.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_empty_range() {
        assert_eq!(
            FaultPolicy::from_millis(0, 0),
            Err(FaultPolicyError::EmptyLatencyRange)
        );
        assert!(FaultPolicy::new(Duration::from_micros(500), Duration::ZERO).is_err());
    }
}
