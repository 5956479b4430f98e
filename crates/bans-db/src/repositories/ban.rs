//! Simulated implementation of BanRepository
//!
//! The table holds at most one ban: every successful `add_ban` replaces the whole
//! table with a single entry. Only the swap and the lookup take the lock, never
//! the simulated latency, so concurrent calls do not serialize on each other.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use bans_common::{ConfigError, DbCall, DbMetrics, StoreConfig};
use bans_core::{Ban, BanRepository, FaultPolicy, LatencySource, MetricsSink, RepoResult, StoreError};

use crate::latency::UniformLatency;

/// Ban store that simulates a remote, unreliable database
pub struct BansDao {
    table: RwLock<HashMap<String, Ban>>,
    metrics: DbMetrics,
    latency: Arc<dyn LatencySource>,
    policy: FaultPolicy,
}

impl BansDao {
    /// Name the store's metrics are recorded under by default
    pub const STORE_NAME: &'static str = "bans_dao";

    /// Create an empty store with uniform random latency and the default policy
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
            metrics: DbMetrics::new(Self::STORE_NAME, sink),
            latency: Arc::new(UniformLatency::new()),
            policy: FaultPolicy::default(),
        }
    }

    /// Create an empty store from configuration
    pub fn from_config(config: &StoreConfig, sink: Arc<dyn MetricsSink>) -> Result<Self, ConfigError> {
        let latency = match config.latency_seed {
            Some(seed) => UniformLatency::seeded(seed),
            None => UniformLatency::new(),
        };

        Ok(Self {
            table: RwLock::new(HashMap::new()),
            metrics: DbMetrics::new(config.name.as_str(), sink),
            latency: Arc::new(latency),
            policy: config.fault_policy()?,
        })
    }

    /// Replace the latency source
    pub fn with_latency_source(mut self, latency: Arc<dyn LatencySource>) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the fault policy
    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FaultPolicy {
        &self.policy
    }

    /// Name the store's metrics are recorded under
    pub fn store_name(&self) -> &str {
        self.metrics.store()
    }

    /// Number of bans currently held (0 or 1)
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Sleep for a drawn latency and fail the call if it crossed the threshold
    async fn simulate_backend(&self, call: &mut DbCall<'_>) -> RepoResult<()> {
        let latency = self.latency.draw(&self.policy);
        tokio::time::sleep(latency).await;

        let latency_ms = latency.as_millis() as u64;
        if self.policy.is_failure(latency) {
            call.error();
            warn!(operation = call.operation(), latency_ms, "Simulated backend failure");
            return Err(StoreError::BackendFailure);
        }

        debug!(operation = call.operation(), latency_ms, "Simulated backend call");
        Ok(())
    }
}

#[async_trait]
impl BanRepository for BansDao {
    #[instrument(name = "BansDao.add_ban", skip_all, fields(ban_id = %ban.id))]
    async fn add_ban(&self, ban: Ban) -> RepoResult<()> {
        // validation failures are not charged against call metrics
        ban.validate()?;

        let mut call = self.metrics.new_call("add_ban");
        self.simulate_backend(&mut call).await?;

        *self.table.write() = HashMap::from([(ban.id.clone(), ban)]);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_ban(&self, ban_id: &str) -> RepoResult<Ban> {
        let mut call = self.metrics.new_call("get_ban");
        self.simulate_backend(&mut call).await?;

        // a miss is a normal outcome, not a backend error
        let found = self.table.read().get(ban_id).cloned();
        found.ok_or(StoreError::NotFound)
    }
}
