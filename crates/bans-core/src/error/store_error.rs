//! Store errors - the three ways a ban store call can fail

use thiserror::Error;

/// Ban store errors
///
/// The kinds are never conflated: callers branch on "bad input", "absent" and
/// "unavailable" separately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The caller supplied an invalid ban. Raised before any latency or metrics.
    #[error("{0}")]
    Validation(String),

    /// Synthetic backend failure injected by the latency simulation
    #[error("request to DB failed")]
    BackendFailure,

    /// No ban stored under the requested identifier
    #[error("not found")]
    NotFound,
}

impl StoreError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BackendFailure => "BACKEND_FAILURE",
            Self::NotFound => "UNKNOWN_BAN",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an injected backend failure
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::BackendFailure)
    }

    /// Whether retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        self.is_backend_failure()
    }
}
