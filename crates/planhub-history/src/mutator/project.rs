//! Project entity mutator.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use planhub_core::error::{AppError, ErrorKind};
use planhub_core::result::AppResult;
use planhub_entity::action::{ItemType, Snapshot};
use planhub_entity::patch::ProjectPatch;

use super::EntityMutator;

/// Applies snapshots back onto rows of the `projects` table.
pub struct ProjectMutator;

#[async_trait]
impl EntityMutator for ProjectMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Project
    }

    fn validate(&self, snapshot: &Snapshot) -> AppResult<()> {
        ProjectPatch::from_snapshot(snapshot).map(|_| ())
    }

    async fn apply_patch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item_id: Uuid,
        snapshot: &Snapshot,
    ) -> AppResult<()> {
        let patch = ProjectPatch::from_snapshot(snapshot)?;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE projects SET updated_at = now()");
        if let Some(name) = patch.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(description) = patch.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(status) = patch.status {
            query.push(", status = ").push_bind(status);
        }
        if let Some(color) = patch.color {
            query.push(", color = ").push_bind(color);
        }
        query.push(" WHERE id = ").push_bind(item_id);

        let result = query.build().execute(&mut **tx).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to patch project", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Project {item_id} no longer exists"
            )));
        }
        Ok(())
    }
}
