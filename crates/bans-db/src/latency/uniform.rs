//! Uniformly distributed latency in whole milliseconds

use std::time::Duration;

use bans_core::{FaultPolicy, LatencySource};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws latency uniformly from `[0, max_latency)`, truncated to whole milliseconds
#[derive(Debug)]
pub struct UniformLatency {
    rng: Mutex<StdRng>,
}

impl UniformLatency {
    /// Create a source seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for UniformLatency {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencySource for UniformLatency {
    fn draw(&self, policy: &FaultPolicy) -> Duration {
        let max_ms = policy.max_latency().as_millis() as u64;
        let ms = self.rng.lock().gen_range(0..max_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let source = UniformLatency::seeded(1);
        let policy = FaultPolicy::default();

        for _ in 0..10_000 {
            let latency = source.draw(&policy);
            assert!(latency < policy.max_latency(), "{latency:?}");
            assert_eq!(latency.subsec_nanos() % 1_000_000, 0);
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let policy = FaultPolicy::default();
        let a = UniformLatency::seeded(99);
        let b = UniformLatency::seeded(99);

        let left: Vec<_> = (0..32).map(|_| a.draw(&policy)).collect();
        let right: Vec<_> = (0..32).map(|_| b.draw(&policy)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_failure_fraction_converges() {
        let source = UniformLatency::seeded(2024);
        let policy = FaultPolicy::default();
        let n = 10_000;

        let failures = (0..n)
            .filter(|_| policy.is_failure(source.draw(&policy)))
            .count();
        let fraction = failures as f64 / f64::from(n);

        assert!((fraction - 1.0 / 3.0).abs() < 0.02, "fraction = {fraction}");
    }

    #[test]
    fn test_one_millisecond_range() {
        let source = UniformLatency::seeded(5);
        let policy = FaultPolicy::from_millis(1, 0).unwrap();
        assert_eq!(source.draw(&policy), Duration::ZERO);
    }
}
