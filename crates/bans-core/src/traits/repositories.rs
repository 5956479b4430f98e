//! Repository traits (ports) - define the interface for data access

use async_trait::async_trait;

use crate::entities::Ban;
use crate::error::StoreError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, StoreError>;

// ============================================================================
// Ban Repository
// ============================================================================

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// Create or replace a ban
    async fn add_ban(&self, ban: Ban) -> RepoResult<()>;

    /// Look up a ban by its identifier
    async fn get_ban(&self, ban_id: &str) -> RepoResult<Ban>;
}
