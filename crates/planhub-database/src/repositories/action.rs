//! Action record repository implementation (the action store).
//!
//! The store is append-only and per-user ordered: rows are inserted once,
//! listed most-recent-first, and only ever removed by retention eviction or
//! an explicit clear.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use planhub_core::error::{AppError, ErrorKind};
use planhub_core::result::AppResult;
use planhub_core::types::pagination::{PageRequest, PageResponse};
use planhub_entity::action::{ActionRecord, CreateActionRecord};

/// Repository for action history records.
#[derive(Debug, Clone)]
pub struct ActionRepository {
    pool: PgPool,
}

impl ActionRepository {
    /// Create a new action repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new record and evict the owner's excess history.
    ///
    /// Insert and eviction share one transaction so the retention cap holds
    /// at every observable instant and eviction cannot race a concurrent
    /// insert for the same user. Returns the stored record and the number
    /// of evicted rows.
    pub async fn create(
        &self,
        data: &CreateActionRecord,
        retention_limit: i64,
    ) -> AppResult<(ActionRecord, u64)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, ActionRecord>(
            "INSERT INTO action_records \
             (user_id, action_type, action_description, item_type, item_id, before_data, after_data, workspace_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.action_type)
        .bind(&data.action_description)
        .bind(data.item_type)
        .bind(data.item_id)
        .bind(&data.before_data)
        .bind(&data.after_data)
        .bind(data.workspace_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create action record", e)
        })?;

        let evicted = Self::delete_excess(&mut tx, data.user_id, retention_limit).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit action record", e)
        })?;

        Ok((record, evicted))
    }

    /// Find a record by ID, scoped to its owner.
    ///
    /// A record owned by another user is indistinguishable from an absent
    /// one; cross-user lookups come back `None`.
    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<ActionRecord>> {
        sqlx::query_as::<_, ActionRecord>(
            "SELECT * FROM action_records WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find action record", e))
    }

    /// List a user's records, most recent first.
    pub async fn list(
        &self,
        user_id: Uuid,
        workspace_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActionRecord>> {
        let (where_clause, param_idx) = if workspace_id.is_some() {
            ("WHERE user_id = $1 AND workspace_id = $2", 3u32)
        } else {
            ("WHERE user_id = $1", 2u32)
        };

        let count_sql = format!("SELECT COUNT(*) FROM action_records {where_clause}");
        let select_sql = format!(
            "SELECT * FROM action_records {where_clause} \
             ORDER BY created_at DESC, id DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
        let mut select_query = sqlx::query_as::<_, ActionRecord>(&select_sql).bind(user_id);

        if let Some(ws) = workspace_id {
            count_query = count_query.bind(ws);
            select_query = select_query.bind(ws);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count action records", e)
        })?;

        let records = select_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list action records", e)
            })?;

        Ok(PageResponse::new(records, total, page))
    }

    /// Delete every record of the user outside their `limit` most recent.
    ///
    /// Idempotent: a second call with no intervening inserts deletes zero.
    pub async fn prune_excess(&self, user_id: Uuid, limit: i64) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        let evicted = Self::delete_excess(&mut tx, user_id, limit).await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit prune", e)
        })?;
        Ok(evicted)
    }

    /// Delete all of a user's records, optionally only those created before
    /// a cutoff.
    pub async fn delete_for_user(
        &self,
        user_id: Uuid,
        older_than: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        let result = match older_than {
            Some(cutoff) => {
                sqlx::query("DELETE FROM action_records WHERE user_id = $1 AND created_at < $2")
                    .bind(user_id)
                    .bind(cutoff)
                    .execute(&self.pool)
                    .await
            }
            None => {
                sqlx::query("DELETE FROM action_records WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear action records", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Count a user's records.
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM action_records WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count action records", e)
            })
    }

    async fn delete_excess(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM action_records WHERE user_id = $1 AND id NOT IN \
             (SELECT id FROM action_records WHERE user_id = $1 \
              ORDER BY created_at DESC, id DESC LIMIT $2)",
        )
        .bind(user_id)
        .bind(limit.max(1))
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to evict excess records", e)
        })?;

        Ok(result.rows_affected())
    }
}
