//! Action record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use planhub_core::AppResult;

use super::item_type::ItemType;
use super::snapshot::Snapshot;

/// An append-only log entry capturing a mutation's before/after snapshots
/// for later undo/redo.
///
/// Records are never mutated after creation; they are only deleted, either
/// by retention eviction or an explicit user-initiated clear.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActionRecord {
    /// Unique record identifier (store-assigned).
    pub id: Uuid,
    /// The user who owns this history entry.
    pub user_id: Uuid,
    /// Free-form action tag (e.g., `"update"`, `"move"`).
    pub action_type: String,
    /// Human-readable description of the action.
    pub action_description: String,
    /// The kind of entity the action touched.
    pub item_type: ItemType,
    /// The entity the action touched.
    pub item_id: Uuid,
    /// Serialized state before the mutation; `NULL` disables undo.
    pub before_data: Option<String>,
    /// Serialized state after the mutation; `NULL` disables redo.
    pub after_data: Option<String>,
    /// Optional workspace scoping.
    pub workspace_id: Option<Uuid>,
    /// When the record was created (immutable).
    pub created_at: DateTime<Utc>,
}

impl ActionRecord {
    /// Parse the stored before snapshot, preserving absence.
    pub fn before_snapshot(&self) -> AppResult<Option<Snapshot>> {
        Snapshot::decode_opt(self.before_data.as_deref())
    }

    /// Parse the stored after snapshot, preserving absence.
    pub fn after_snapshot(&self) -> AppResult<Option<Snapshot>> {
        Snapshot::decode_opt(self.after_data.as_deref())
    }

    /// Whether this record can be replayed backwards.
    pub fn can_undo(&self) -> bool {
        self.before_data.is_some()
    }

    /// Whether this record can be replayed forwards.
    pub fn can_redo(&self) -> bool {
        self.after_data.is_some()
    }
}

/// Data required to create a new action record.
///
/// Snapshots are already serialized through the [`Snapshot`] codec by the
/// recorder; `None` is stored as `NULL`, never as an empty object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActionRecord {
    /// The acting user.
    pub user_id: Uuid,
    /// Free-form action tag.
    pub action_type: String,
    /// Human-readable description.
    pub action_description: String,
    /// The kind of entity the action touched.
    pub item_type: ItemType,
    /// The entity the action touched.
    pub item_id: Uuid,
    /// Encoded state before the mutation, if captured.
    pub before_data: Option<String>,
    /// Encoded state after the mutation, if captured.
    pub after_data: Option<String>,
    /// Optional workspace scoping.
    pub workspace_id: Option<Uuid>,
}
