//! Hook Repository Implementation
//!
//! PostgreSQL implementation of webhook subscription storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Hook, HookEvent, HookRepository, NewHook};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct HookRow {
    id: i64,
    user_id: Option<i64>,
    target: String,
    event: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HookRow {
    /// Fails with `AppError::Internal` when the stored event name is unknown.
    /// List queries skip such rows; single-row lookups surface the error.
    fn into_hook(self) -> Result<Hook, AppError> {
        let event: HookEvent = self
            .event
            .parse()
            .map_err(|e: crate::domain::UnknownHookEvent| AppError::Internal(e.to_string()))?;

        Ok(Hook {
            id: self.id,
            user_id: self.user_id,
            target: self.target,
            event,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn collect_hooks(rows: Vec<HookRow>) -> Vec<Hook> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            row.into_hook()
                .map_err(|e| tracing::warn!(hook_id = id, error = %e, "Skipping hook row"))
                .ok()
        })
        .collect()
}

/// PostgreSQL implementation of the HookRepository.
#[derive(Clone)]
pub struct PgHookRepository {
    pool: PgPool,
}

impl PgHookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HookRepository for PgHookRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Hook>, AppError> {
        let row = sqlx::query_as::<_, HookRow>(
            r#"
            SELECT id, user_id, target, event, created_at, updated_at
            FROM hooks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(HookRow::into_hook).transpose()
    }

    async fn list(&self) -> Result<Vec<Hook>, AppError> {
        let rows = sqlx::query_as::<_, HookRow>(
            r#"
            SELECT id, user_id, target, event, created_at, updated_at
            FROM hooks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(collect_hooks(rows))
    }

    async fn find_by_event(&self, event: HookEvent) -> Result<Vec<Hook>, AppError> {
        let rows = sqlx::query_as::<_, HookRow>(
            r#"
            SELECT id, user_id, target, event, created_at, updated_at
            FROM hooks
            WHERE event = $1
            ORDER BY id
            "#,
        )
        .bind(event.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(collect_hooks(rows))
    }

    async fn create(&self, hook: &NewHook) -> Result<Hook, AppError> {
        let row = sqlx::query_as::<_, HookRow>(
            r#"
            INSERT INTO hooks (user_id, target, event)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, target, event, created_at, updated_at
            "#,
        )
        .bind(hook.user_id)
        .bind(&hook.target)
        .bind(hook.event.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_hook()
    }

    async fn update(&self, id: i64, hook: &NewHook) -> Result<Hook, AppError> {
        let row = sqlx::query_as::<_, HookRow>(
            r#"
            UPDATE hooks
            SET user_id = $2, target = $3, event = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, target, event, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(hook.user_id)
        .bind(&hook.target)
        .bind(hook.event.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Hook {} not found", id)))?
            .into_hook()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hooks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Hook {} not found", id)));
        }

        Ok(())
    }
}
