//! Deterministic latency sources

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bans_core::{FaultPolicy, LatencySource};

/// Always returns the same latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLatency(pub Duration);

impl FixedLatency {
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl LatencySource for FixedLatency {
    fn draw(&self, _policy: &FaultPolicy) -> Duration {
        self.0
    }
}

/// Replays a fixed sequence of latencies, wrapping around at the end
#[derive(Debug)]
pub struct ScriptedLatency {
    script: Vec<Duration>,
    next: AtomicUsize,
}

impl ScriptedLatency {
    /// Create a scripted source; an empty script always yields zero latency
    pub fn new(script: Vec<Duration>) -> Self {
        Self {
            script,
            next: AtomicUsize::new(0),
        }
    }

    pub fn from_millis(script: &[u64]) -> Self {
        Self::new(script.iter().copied().map(Duration::from_millis).collect())
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

impl LatencySource for ScriptedLatency {
    fn draw(&self, _policy: &FaultPolicy) -> Duration {
        if self.script.is_empty() {
            return Duration::ZERO;
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        self.script[i % self.script.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed() {
        let policy = FaultPolicy::default();
        let source = FixedLatency::from_millis(2500);
        assert_eq!(source.draw(&policy), Duration::from_millis(2500));
        assert_eq!(source.draw(&policy), Duration::from_millis(2500));
    }

    #[test]
    fn test_scripted_wraps() {
        let policy = FaultPolicy::default();
        let source = ScriptedLatency::from_millis(&[10, 2001, 0]);

        let drawn: Vec<_> = (0..5).map(|_| source.draw(&policy).as_millis()).collect();
        assert_eq!(drawn, [10, 2001, 0, 10, 2001]);
        assert_eq!(source.draws(), 5);
    }

    #[test]
    fn test_empty_script() {
        let source = ScriptedLatency::new(Vec::new());
        assert_eq!(source.draw(&FaultPolicy::default()), Duration::ZERO);
        assert_eq!(source.draws(), 0);
    }
}
