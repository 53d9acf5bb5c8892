//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use planhub_entity::action::{ItemType, Snapshot};
use planhub_history::recorder::RecordAction;

/// Body for `POST /api/action-history`.
///
/// `before_data` / `after_data` are independently optional; omitting one
/// disables that replay direction for the record. An empty object is a
/// valid (no-op) snapshot and is distinct from omission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordActionRequest {
    /// Free-form action tag.
    #[validate(length(min = 1, max = 64, message = "action_type must be 1-64 characters"))]
    pub action_type: String,
    /// Human-readable description.
    #[validate(length(min = 1, max = 500, message = "action_description must be 1-500 characters"))]
    pub action_description: String,
    /// The kind of entity the action touched.
    pub item_type: ItemType,
    /// The entity the action touched.
    pub item_id: Uuid,
    /// State before the mutation.
    pub before_data: Option<Snapshot>,
    /// State after the mutation.
    pub after_data: Option<Snapshot>,
    /// Optional workspace scoping.
    pub workspace_id: Option<Uuid>,
}

impl From<RecordActionRequest> for RecordAction {
    fn from(req: RecordActionRequest) -> Self {
        RecordAction {
            action_type: req.action_type,
            action_description: req.action_description,
            item_type: req.item_type,
            item_id: req.item_id,
            before_data: req.before_data,
            after_data: req.after_data,
            workspace_id: req.workspace_id,
        }
    }
}

/// Query parameters for `DELETE /api/action-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryParams {
    /// Only clear records older than this many days; clears all when absent.
    #[serde(rename = "olderThan")]
    pub older_than: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_validation_bounds() {
        let req = RecordActionRequest {
            action_type: String::new(),
            action_description: "moved a task".to_string(),
            item_type: ItemType::Task,
            item_id: Uuid::new_v4(),
            before_data: None,
            after_data: None,
            workspace_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_snapshot_absence_survives_deserialization() {
        let req: RecordActionRequest = serde_json::from_value(serde_json::json!({
            "action_type": "update",
            "action_description": "changed status",
            "item_type": "task",
            "item_id": Uuid::new_v4(),
            "after_data": {"status": "done"},
        }))
        .unwrap();
        assert!(req.before_data.is_none());
        assert!(req.after_data.is_some());
    }
}
