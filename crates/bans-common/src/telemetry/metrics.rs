//! Per-call database metrics
//!
//! `DbMetrics` is bound to one store name and hands out a `DbCall` per measured
//! operation. A `DbCall` reports to its `MetricsSink` exactly once, when it is
//! dropped, so every return path of the caller closes the measurement.
//! Elapsed time follows the tokio clock, so paused-time tests see simulated latency.

use std::fmt::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use bans_core::{CallOutcome, MetricsSink};
use dashmap::DashMap;
use tokio::time::Instant;

/// Recorder factory scoped to a single store
#[derive(Clone)]
pub struct DbMetrics {
    store: Arc<str>,
    sink: Arc<dyn MetricsSink>,
}

impl DbMetrics {
    pub fn new(store: impl Into<Arc<str>>, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            store: store.into(),
            sink,
        }
    }

    /// Name the store's calls are recorded under
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Start measuring one call of `operation`
    pub fn new_call(&self, operation: &'static str) -> DbCall<'_> {
        DbCall {
            metrics: self,
            operation,
            outcome: CallOutcome::Success,
            started: Instant::now(),
        }
    }
}

impl fmt::Debug for DbMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbMetrics").field("store", &self.store).finish()
    }
}

/// One in-flight measured call; reports on drop
#[must_use = "dropping a DbCall ends the measurement immediately"]
pub struct DbCall<'a> {
    metrics: &'a DbMetrics,
    operation: &'static str,
    outcome: CallOutcome,
    started: Instant,
}

impl DbCall<'_> {
    /// Mark this call as failed
    pub fn error(&mut self) {
        self.outcome = CallOutcome::Error;
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Drop for DbCall<'_> {
    fn drop(&mut self) {
        self.metrics.sink.call_ended(
            &self.metrics.store,
            self.operation,
            self.outcome,
            self.started.elapsed(),
        );
    }
}

/// Aggregated counters for one `(store, operation)` pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStats {
    pub store: String,
    pub operation: String,
    pub calls: u64,
    pub errors: u64,
    pub total_elapsed: Duration,
    pub max_elapsed: Duration,
}

impl CallStats {
    /// Fraction of calls that ended in error
    pub fn error_rate(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.errors as f64 / self.calls as f64
        }
    }

    /// Mean call duration
    pub fn mean_elapsed(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total_elapsed.as_nanos() / u128::from(self.calls);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }
}

/// In-process metrics sink backed by `DashMap`
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    calls: DashMap<(String, String), CallStats>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for one operation, if it has been called
    pub fn get(&self, store: &str, operation: &str) -> Option<CallStats> {
        self.calls
            .get(&(store.to_string(), operation.to_string()))
            .map(|entry| entry.value().clone())
    }

    /// All stats sorted by store then operation
    pub fn snapshot(&self) -> Vec<CallStats> {
        let mut rows: Vec<CallStats> = self.calls.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| (&a.store, &a.operation).cmp(&(&b.store, &b.operation)));
        rows
    }

    /// Render in Prometheus text exposition format
    pub fn render(&self) -> String {
        let rows = self.snapshot();
        let mut out = String::new();

        let _ = writeln!(out, "# TYPE bans_db_calls_total counter");
        for row in &rows {
            let _ = writeln!(out, "bans_db_calls_total{{{}}} {}", labels(row), row.calls);
        }
        let _ = writeln!(out, "# TYPE bans_db_errors_total counter");
        for row in &rows {
            let _ = writeln!(out, "bans_db_errors_total{{{}}} {}", labels(row), row.errors);
        }
        let _ = writeln!(out, "# TYPE bans_db_call_duration_ms_sum counter");
        for row in &rows {
            let _ = writeln!(
                out,
                "bans_db_call_duration_ms_sum{{{}}} {}",
                labels(row),
                row.total_elapsed.as_millis()
            );
        }
        out
    }
}

impl MetricsSink for InMemoryMetrics {
    fn call_ended(&self, store: &str, operation: &str, outcome: CallOutcome, elapsed: Duration) {
        let mut stats = self
            .calls
            .entry((store.to_string(), operation.to_string()))
            .or_insert_with(|| CallStats {
                store: store.to_string(),
                operation: operation.to_string(),
                ..CallStats::default()
            });
        stats.calls += 1;
        if outcome.is_error() {
            stats.errors += 1;
        }
        stats.total_elapsed += elapsed;
        stats.max_elapsed = stats.max_elapsed.max(elapsed);
        drop(stats);

        tracing::trace!(
            store,
            operation,
            outcome = outcome.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            "db call ended"
        );
    }
}

fn labels(row: &CallStats) -> String {
    format!(
        "store=\"{}\",operation=\"{}\"",
        escape_label(&row.store),
        escape_label(&row.operation)
    )
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
