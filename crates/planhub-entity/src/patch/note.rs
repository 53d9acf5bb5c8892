//! Sparse patch for notes.

use serde::{Deserialize, Serialize};

use planhub_core::AppResult;

use crate::action::Snapshot;

/// Fields of a note that action snapshots may capture and replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotePatch {
    /// Note title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Note body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Whether the note is pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl NotePatch {
    /// Validate and deserialize a snapshot into a note patch.
    pub fn from_snapshot(snapshot: &Snapshot) -> AppResult<Self> {
        super::from_snapshot(snapshot, "note")
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
