//! Ports - the interfaces the domain needs and the infrastructure provides

mod metrics;
mod repositories;
mod simulation;

pub use metrics::{CallOutcome, MetricsSink};
pub use repositories::{BanRepository, RepoResult};
pub use simulation::LatencySource;
