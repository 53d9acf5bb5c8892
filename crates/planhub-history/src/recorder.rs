//! Action recording and history queries.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use planhub_core::types::pagination::{PageRequest, PageResponse};
use planhub_core::{AppError, AppResult};
use planhub_database::repositories::ActionRepository;
use planhub_entity::action::{ActionRecord, CreateActionRecord, ItemType, Snapshot};

use crate::context::RequestContext;
use crate::mutator::MutatorRegistry;
use crate::retention::RetentionPolicy;

/// Input for recording one action.
///
/// Callers record an action right after they perform the mutation
/// elsewhere; the record is a post-hoc log entry, not part of the mutating
/// transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAction {
    /// Free-form action tag (e.g., `"update"`).
    pub action_type: String,
    /// Human-readable description.
    pub action_description: String,
    /// The kind of entity the action touched.
    pub item_type: ItemType,
    /// The entity the action touched.
    pub item_id: Uuid,
    /// State before the mutation, if captured.
    pub before_data: Option<Snapshot>,
    /// State after the mutation, if captured.
    pub after_data: Option<Snapshot>,
    /// Optional workspace scoping.
    pub workspace_id: Option<Uuid>,
}

/// Appends validated action records to the bounded per-user log.
pub struct ActionRecorder {
    /// Action store.
    actions: Arc<ActionRepository>,
    /// Dispatch registry, used to fail fast on unsupported item types.
    registry: Arc<MutatorRegistry>,
    /// Per-user retention cap.
    retention: RetentionPolicy,
}

impl ActionRecorder {
    /// Creates a new action recorder.
    pub fn new(
        actions: Arc<ActionRepository>,
        registry: Arc<MutatorRegistry>,
        retention: RetentionPolicy,
    ) -> Self {
        Self {
            actions,
            registry,
            retention,
        }
    }

    /// Record one action for the current user.
    ///
    /// Unsupported item types and snapshots that do not match the item
    /// type's patch schema are rejected here, at record time, so replay can
    /// never encounter a record it does not know how to apply. Exactly one
    /// row is inserted; the same transaction evicts the user's excess
    /// history.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: RecordAction,
    ) -> AppResult<ActionRecord> {
        if action.action_type.trim().is_empty() {
            return Err(AppError::validation("action_type must not be empty"));
        }
        if action.action_description.trim().is_empty() {
            return Err(AppError::validation("action_description must not be empty"));
        }

        let mutator = self.registry.resolve(action.item_type)?;
        if let Some(before) = &action.before_data {
            mutator.validate(before)?;
        }
        if let Some(after) = &action.after_data {
            mutator.validate(after)?;
        }

        let data = CreateActionRecord {
            user_id: ctx.user_id,
            action_type: action.action_type,
            action_description: action.action_description,
            item_type: action.item_type,
            item_id: action.item_id,
            before_data: Snapshot::encode_opt(action.before_data.as_ref())?,
            after_data: Snapshot::encode_opt(action.after_data.as_ref())?,
            workspace_id: action.workspace_id,
        };

        let (record, evicted) = self
            .actions
            .create(&data, self.retention.limit())
            .await?;

        if evicted > 0 {
            debug!(user_id = %ctx.user_id, evicted, "Evicted excess action records");
        }
        Ok(record)
    }

    /// Fetch one of the user's records.
    pub async fn get(&self, ctx: &RequestContext, action_id: Uuid) -> AppResult<ActionRecord> {
        self.actions
            .find_by_id(action_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Action {action_id} not found")))
    }

    /// List the user's records, most recent first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        workspace_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<PageResponse<ActionRecord>> {
        self.actions.list(ctx.user_id, workspace_id, &page).await
    }

    /// Clear the user's history, optionally only records older than the
    /// given number of days.
    pub async fn clear(
        &self,
        ctx: &RequestContext,
        older_than_days: Option<i64>,
    ) -> AppResult<u64> {
        let cutoff = match older_than_days {
            Some(days) if days <= 0 => {
                return Err(AppError::validation("olderThan must be a positive number of days"));
            }
            Some(days) => Some(Utc::now() - Duration::days(days)),
            None => None,
        };

        self.actions.delete_for_user(ctx.user_id, cutoff).await
    }
}
