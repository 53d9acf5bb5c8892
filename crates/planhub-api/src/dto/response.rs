//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use planhub_core::AppResult;
use planhub_entity::action::{ActionRecord, ItemType};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// An action record with its snapshots parsed to objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecordResponse {
    /// Record ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Action tag.
    pub action_type: String,
    /// Description.
    pub action_description: String,
    /// Item type.
    pub item_type: ItemType,
    /// Item ID.
    pub item_id: Uuid,
    /// Parsed before snapshot.
    pub before_data: Option<Value>,
    /// Parsed after snapshot.
    pub after_data: Option<Value>,
    /// Workspace scoping.
    pub workspace_id: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the record can be replayed backwards.
    pub can_undo: bool,
    /// Whether the record can be replayed forwards.
    pub can_redo: bool,
}

impl ActionRecordResponse {
    /// Build a response from a stored record, parsing its snapshots.
    pub fn from_record(record: &ActionRecord) -> AppResult<Self> {
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            action_type: record.action_type.clone(),
            action_description: record.action_description.clone(),
            item_type: record.item_type,
            item_id: record.item_id,
            before_data: record.before_snapshot()?.map(|s| s.to_value()),
            after_data: record.after_snapshot()?.map(|s| s.to_value()),
            workspace_id: record.workspace_id,
            created_at: record.created_at,
            can_undo: record.can_undo(),
            can_redo: record.can_redo(),
        })
    }
}

/// Body for successful undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResponse {
    /// Outcome message.
    pub message: String,
    /// The action that was replayed (unchanged by the replay).
    pub action: ActionRecordResponse,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
