//! Task entity mutator.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use planhub_core::error::{AppError, ErrorKind};
use planhub_core::result::AppResult;
use planhub_entity::action::{ItemType, Snapshot};
use planhub_entity::patch::TaskPatch;

use super::EntityMutator;

/// Applies snapshots back onto rows of the `tasks` table.
pub struct TaskMutator;

#[async_trait]
impl EntityMutator for TaskMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Task
    }

    fn validate(&self, snapshot: &Snapshot) -> AppResult<()> {
        TaskPatch::from_snapshot(snapshot).map(|_| ())
    }

    async fn apply_patch(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item_id: Uuid,
        snapshot: &Snapshot,
    ) -> AppResult<()> {
        let patch = TaskPatch::from_snapshot(snapshot)?;

        // Always touch updated_at so even an empty patch verifies the
        // target still exists.
        let mut query = QueryBuilder::<Postgres>::new("UPDATE tasks SET updated_at = now()");
        if let Some(title) = patch.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = patch.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(status) = patch.status {
            query.push(", status = ").push_bind(status);
        }
        if let Some(priority) = patch.priority {
            query.push(", priority = ").push_bind(priority);
        }
        if let Some(assignee_id) = patch.assignee_id {
            query.push(", assignee_id = ").push_bind(assignee_id);
        }
        if let Some(column_id) = patch.column_id {
            query.push(", column_id = ").push_bind(column_id);
        }
        if let Some(position) = patch.position {
            query.push(", position = ").push_bind(position);
        }
        if let Some(due_date) = patch.due_date {
            query.push(", due_date = ").push_bind(due_date);
        }
        query.push(" WHERE id = ").push_bind(item_id);

        let result = query.build().execute(&mut **tx).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to patch task", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Task {item_id} no longer exists")));
        }
        Ok(())
    }
}
