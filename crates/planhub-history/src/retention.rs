//! Per-user retention policy for the action log.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use planhub_core::AppResult;
use planhub_core::config::history::DEFAULT_RETENTION_LIMIT;
use planhub_database::repositories::ActionRepository;

/// Bounds how many action records each user retains.
///
/// The limit is enforced inside the insert transaction by the repository;
/// this type owns the configured value and exposes standalone pruning for
/// compaction and tests.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    limit: i64,
}

impl RetentionPolicy {
    /// Create a policy with the given per-user cap (minimum 1).
    pub fn new(limit: i64) -> Self {
        Self { limit: limit.max(1) }
    }

    /// The per-user record cap.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Delete a user's records beyond the cap. Idempotent.
    pub async fn prune(&self, repo: &Arc<ActionRepository>, user_id: Uuid) -> AppResult<u64> {
        repo.prune_excess(user_id, self.limit).await
    }

    /// Best-effort prune: failures are logged, never propagated.
    pub async fn prune_logged(&self, repo: &Arc<ActionRepository>, user_id: Uuid) -> u64 {
        match self.prune(repo, user_id).await {
            Ok(evicted) => evicted,
            Err(e) => {
                warn!(%user_id, error = %e, "Retention prune failed; continuing");
                0
            }
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_LIMIT)
    }
}
