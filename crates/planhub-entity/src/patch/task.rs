//! Sparse patch for tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planhub_core::AppResult;

use crate::action::Snapshot;

/// Fields of a task that action snapshots may capture and replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    /// Task title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Task body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status (e.g., `"todo"`, `"in_progress"`, `"done"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Priority label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Assigned user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
    /// Kanban column the task sits in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<Uuid>,
    /// Position within the column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Validate and deserialize a snapshot into a task patch.
    pub fn from_snapshot(snapshot: &Snapshot) -> AppResult<Self> {
        super::from_snapshot(snapshot, "task")
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> Snapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sparse_fields() {
        let patch = TaskPatch::from_snapshot(&snapshot(json!({"status": "todo"}))).unwrap();
        assert_eq!(patch.status.as_deref(), Some("todo"));
        assert!(patch.title.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = TaskPatch::from_snapshot(&snapshot(json!({"owner": "mallory"}))).unwrap_err();
        assert_eq!(err.kind, planhub_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_empty_snapshot_is_empty_patch() {
        let patch = TaskPatch::from_snapshot(&Snapshot::new()).unwrap();
        assert!(patch.is_empty());
    }
}
