//! Sparse patch for projects.

use serde::{Deserialize, Serialize};

use planhub_core::AppResult;

use crate::action::Snapshot;

/// Fields of a project that action snapshots may capture and replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    /// Project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status (e.g., `"active"`, `"archived"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Display color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProjectPatch {
    /// Validate and deserialize a snapshot into a project patch.
    pub fn from_snapshot(snapshot: &Snapshot) -> AppResult<Self> {
        super::from_snapshot(snapshot, "project")
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
