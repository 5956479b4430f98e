//! # bans-sim
//!
//! Drives a concurrent mix of `add_ban` / `get_ban` calls against a `BansDao` and
//! reports how the outcomes split between success, misses, validation errors and
//! injected backend failures.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use bans_common::{AppConfig, ConfigError, InMemoryMetrics};
use bans_core::{Ban, BanRepository, StoreError};
use bans_db::BansDao;

/// Every n-th add is sent with an empty ID to exercise validation
const INVALID_ADD_EVERY: usize = 50;

/// Simulation errors
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Simulation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Outcome tally of one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub calls: usize,
    pub succeeded: usize,
    pub not_found: usize,
    pub validation_errors: usize,
    pub backend_failures: usize,
    /// Backend failures over calls that reached the backend
    pub observed_failure_rate: f64,
    pub expected_failure_rate: f64,
    /// Prometheus text rendering of the store's call metrics
    pub metrics: String,
}

impl SimulationReport {
    fn record(&mut self, outcome: &Result<(), StoreError>) {
        self.calls += 1;
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(StoreError::NotFound) => self.not_found += 1,
            Err(StoreError::Validation(_)) => self.validation_errors += 1,
            Err(StoreError::BackendFailure) => self.backend_failures += 1,
        }
    }

    /// Calls that got past validation
    pub fn measured_calls(&self) -> usize {
        self.calls - self.validation_errors
    }
}

/// Run the configured number of calls and tally the outcomes
pub async fn run(config: &AppConfig) -> Result<SimulationReport, SimError> {
    let metrics = Arc::new(InMemoryMetrics::new());
    let dao = Arc::new(BansDao::from_config(&config.store, metrics.clone())?);
    let permits = Arc::new(Semaphore::new(config.simulation.concurrency));
    let last_id = Arc::new(Mutex::new(String::new()));

    let mut tasks = JoinSet::new();
    for i in 0..config.simulation.calls {
        let dao = dao.clone();
        let permits = permits.clone();
        let last_id = last_id.clone();

        tasks.spawn(async move {
            // the semaphore is never closed
            let _permit = permits.acquire_owned().await.ok();
            if i % 2 == 0 {
                dao.add_ban(next_ban(i, &last_id)).await
            } else {
                let id = last_id.lock().clone();
                dao.get_ban(&id).await.map(|_| ())
            }
        });
    }

    let mut report = SimulationReport {
        expected_failure_rate: dao.policy().failure_probability(),
        ..SimulationReport::default()
    };
    while let Some(joined) = tasks.join_next().await {
        report.record(&joined?);
    }

    if report.measured_calls() > 0 {
        report.observed_failure_rate =
            report.backend_failures as f64 / report.measured_calls() as f64;
    }
    report.metrics = metrics.render();

    info!(
        calls = report.calls,
        succeeded = report.succeeded,
        not_found = report.not_found,
        validation_errors = report.validation_errors,
        backend_failures = report.backend_failures,
        observed = report.observed_failure_rate,
        expected = report.expected_failure_rate,
        "Simulation finished"
    );
    if (report.observed_failure_rate - report.expected_failure_rate).abs() > 0.05
        && report.measured_calls() >= 1000
    {
        warn!("Observed failure rate drifted from the fault policy");
    }

    Ok(report)
}

/// Build the ban for the i-th call and remember its ID for later lookups
fn next_ban(i: usize, last_id: &Mutex<String>) -> Ban {
    if i % (2 * INVALID_ADD_EVERY) == 0 {
        return Ban::new("", format!("user-{i}"));
    }
    let id = Uuid::new_v4().to_string();
    *last_id.lock() = id.clone();
    Ban::new(id, format!("user-{i}")).with_reason("simulated")
}
