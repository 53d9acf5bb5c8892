//! Undo/redo replay engine.
//!
//! Each invocation runs Fetch -> Validate -> Dispatch -> Apply -> Commit
//! with no state persisted between invocations. Dispatch and apply share
//! one transaction, so a mid-apply failure rolls back fully and the target
//! entity is never left half-patched. The action record itself is never
//! mutated by replay; undo/redo do not push new history entries.

use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use planhub_core::error::{AppError, ErrorKind};
use planhub_core::result::AppResult;
use planhub_database::repositories::ActionRepository;
use planhub_entity::action::{ActionRecord, Snapshot};

use crate::context::RequestContext;
use crate::mutator::MutatorRegistry;

/// Which stored snapshot a replay applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayDirection {
    /// Apply the before snapshot.
    Undo,
    /// Apply the after snapshot.
    Redo,
}

impl fmt::Display for ReplayDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// Replays stored snapshots back onto their entities.
pub struct ReplayEngine {
    /// Connection pool; each replay opens one transaction on it.
    pool: PgPool,
    /// Action store.
    actions: Arc<ActionRepository>,
    /// Dispatch registry.
    registry: Arc<MutatorRegistry>,
}

impl ReplayEngine {
    /// Creates a new replay engine.
    pub fn new(pool: PgPool, actions: Arc<ActionRepository>, registry: Arc<MutatorRegistry>) -> Self {
        Self {
            pool,
            actions,
            registry,
        }
    }

    /// Apply an action's before snapshot, reverting the recorded mutation.
    pub async fn undo(&self, ctx: &RequestContext, action_id: Uuid) -> AppResult<ActionRecord> {
        self.replay(ctx, action_id, ReplayDirection::Undo).await
    }

    /// Apply an action's after snapshot, re-applying the recorded mutation.
    pub async fn redo(&self, ctx: &RequestContext, action_id: Uuid) -> AppResult<ActionRecord> {
        self.replay(ctx, action_id, ReplayDirection::Redo).await
    }

    async fn replay(
        &self,
        ctx: &RequestContext,
        action_id: Uuid,
        direction: ReplayDirection,
    ) -> AppResult<ActionRecord> {
        // Fetch. Ownership is folded into the lookup: another user's record
        // is indistinguishable from a missing one.
        let record = self
            .actions
            .find_by_id(action_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Action {action_id} not found")))?;

        // Validate the requested direction has a snapshot.
        let stored = match direction {
            ReplayDirection::Undo => record.before_data.as_deref(),
            ReplayDirection::Redo => record.after_data.as_deref(),
        };
        let stored = stored.ok_or_else(|| {
            AppError::snapshot_unavailable(format!(
                "Action {action_id} has no {} snapshot to {direction}",
                match direction {
                    ReplayDirection::Undo => "before",
                    ReplayDirection::Redo => "after",
                }
            ))
        })?;

        // Dispatch.
        let mutator = self.registry.resolve(record.item_type)?;
        let snapshot = Snapshot::decode(stored)?;

        // Apply inside one transaction; any failure rolls back fully.
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin replay transaction", e)
        })?;

        let applied = mutator.apply_patch(&mut tx, record.item_id, &snapshot).await;

        match applied {
            Ok(()) => {
                tx.commit().await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::ReplayFailed,
                        format!("Failed to commit {direction} of action {action_id}"),
                        e,
                    )
                })?;
            }
            Err(cause) => {
                // Rollback is implicit when the transaction drops, but do it
                // explicitly so the pool gets the connection back promptly.
                let _ = tx.rollback().await;
                return Err(AppError::with_source(
                    ErrorKind::ReplayFailed,
                    format!(
                        "Failed to {direction} action {action_id} on {} {}",
                        record.item_type, record.item_id
                    ),
                    cause,
                ));
            }
        }

        info!(
            user_id = %ctx.user_id,
            action_id = %action_id,
            item_type = %record.item_type,
            item_id = %record.item_id,
            %direction,
            "Replayed action snapshot"
        );
        Ok(record)
    }
}
