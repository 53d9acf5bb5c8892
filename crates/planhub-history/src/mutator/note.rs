//! Note entity mutator.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use planhub_core::error::{AppError, ErrorKind};
use planhub_core::result::AppResult;
use planhub_entity::action::{ItemType, Snapshot};
use planhub_entity::patch::NotePatch;

use super::EntityMutator;

/// Applies snapshots back onto rows of the `notes` table.
pub struct NoteMutator;

#[async_trait]
impl EntityMutator for NoteMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Note
    }

    fn validate(&self, snapshot: &Snapshot) -> AppResult<()> {
        NotePatch::from_snapshot(snapshot).map(|_| ())
    }

    async fn apply_patch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item_id: Uuid,
        snapshot: &Snapshot,
    ) -> AppResult<()> {
        let patch = NotePatch::from_snapshot(snapshot)?;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE notes SET updated_at = now()");
        if let Some(title) = patch.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(content) = patch.content {
            query.push(", content = ").push_bind(content);
        }
        if let Some(pinned) = patch.pinned {
            query.push(", pinned = ").push_bind(pinned);
        }
        query.push(" WHERE id = ").push_bind(item_id);

        let result = query.build().execute(&mut **tx).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to patch note", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Note {item_id} no longer exists")));
        }
        Ok(())
    }
}
