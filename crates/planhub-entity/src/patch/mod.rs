//! Schema-validated sparse patches, one per replayable entity type.
//!
//! Snapshots arrive as free-form JSON maps; before anything is persisted or
//! applied, the map is deserialized into the typed patch struct for the
//! record's item type. Every field is optional (absent fields are left
//! untouched on the target entity) and unknown fields are rejected, so a
//! snapshot's applicability is checked at record time instead of trusting
//! arbitrary column names at write time.

pub mod note;
pub mod project;
pub mod task;

pub use note::NotePatch;
pub use project::ProjectPatch;
pub use task::TaskPatch;

use planhub_core::{AppError, AppResult};

use crate::action::Snapshot;

/// Deserialize a snapshot into a typed patch, rejecting unknown fields.
pub(crate) fn from_snapshot<T: serde::de::DeserializeOwned>(
    snapshot: &Snapshot,
    entity: &'static str,
) -> AppResult<T> {
    serde_json::from_value(snapshot.to_value()).map_err(|e| {
        AppError::validation(format!("Snapshot is not a valid {entity} patch: {e}"))
    })
}
