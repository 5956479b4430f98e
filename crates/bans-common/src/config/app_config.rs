//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).
//! Structs are built field by field so each variable is parsed and reported on its own.

use std::env;
use std::str::FromStr;

use bans_core::FaultPolicy;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub simulation: SimulationConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Simulated store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name the store's metrics are recorded under
    pub name: String,
    pub max_latency_ms: u64,
    pub failure_threshold_ms: u64,
    /// Fixed RNG seed for reproducible latency draws
    pub latency_seed: Option<u64>,
}

impl StoreConfig {
    /// Build the fault policy described by this config
    pub fn fault_policy(&self) -> Result<FaultPolicy, ConfigError> {
        FaultPolicy::from_millis(self.max_latency_ms, self.failure_threshold_ms)
            .map_err(|e| ConfigError::InvalidValue("BANS_MAX_LATENCY_MS", e.to_string()))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            max_latency_ms: default_max_latency_ms(),
            failure_threshold_ms: default_failure_threshold_ms(),
            latency_seed: None,
        }
    }
}

/// Load generator settings for the simulator binary
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub calls: usize,
    pub concurrency: usize,
}

// Default value functions
fn default_app_name() -> String {
    "bans-sim".to_string()
}

fn default_store_name() -> String {
    "bans_dao".to_string()
}

fn default_max_latency_ms() -> u64 {
    3000
}

fn default_failure_threshold_ms() -> u64 {
    2000
}

fn default_calls() -> usize {
    1000
}

fn default_concurrency() -> usize {
    64
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// resulting fault policy is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_var(&lookup, "APP_ENV")?.unwrap_or_default(),
            },
            store: StoreConfig {
                name: lookup("BANS_STORE_NAME").unwrap_or_else(default_store_name),
                max_latency_ms: parse_var(&lookup, "BANS_MAX_LATENCY_MS")?
                    .unwrap_or_else(default_max_latency_ms),
                failure_threshold_ms: parse_var(&lookup, "BANS_FAILURE_THRESHOLD_MS")?
                    .unwrap_or_else(default_failure_threshold_ms),
                latency_seed: parse_var(&lookup, "BANS_LATENCY_SEED")?,
            },
            simulation: SimulationConfig {
                calls: parse_var(&lookup, "BANS_SIM_CALLS")?.unwrap_or_else(default_calls),
                concurrency: parse_var(&lookup, "BANS_SIM_CONCURRENCY")?
                    .unwrap_or_else(default_concurrency),
            },
        };

        config.store.fault_policy()?;
        if config.simulation.concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "BANS_SIM_CONCURRENCY",
                "must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Parse an optional variable, failing only when it is set to garbage
fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
