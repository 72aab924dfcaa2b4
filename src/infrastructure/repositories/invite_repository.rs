//! Invite Repository Implementation
//!
//! PostgreSQL implementation of rating invite storage.
//! The free-form `invite` data is stored as JSONB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{Invite, InviteFilter, InviteRepository};
use crate::shared::error::AppError;

const INVITE_COLUMNS: &str = "id, identity, version, invited, completed, expired, invite, \
                              expires_at, created_at, updated_at";

/// Database row representation of the `invites` table.
#[derive(Debug, sqlx::FromRow)]
struct InviteRow {
    id: Uuid,
    identity: String,
    version: i32,
    invited: bool,
    completed: bool,
    expired: bool,
    invite: Json<Map<String, Value>>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InviteRow {
    fn into_invite(self) -> Invite {
        Invite {
            id: self.id,
            identity: self.identity,
            version: self.version,
            invited: self.invited,
            completed: self.completed,
            expired: self.expired,
            invite: self.invite.0,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Append `WHERE`/`AND` clauses for every set filter field.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &InviteFilter) {
    let mut first = true;
    let mut clause = |builder: &mut QueryBuilder<'_, Postgres>, column: &str| {
        builder.push(if first { " WHERE " } else { " AND " });
        builder.push(column);
        builder.push(" = ");
        first = false;
    };

    if let Some(identity) = &filter.identity {
        clause(builder, "identity");
        builder.push_bind(identity.clone());
    }
    if let Some(version) = filter.version {
        clause(builder, "version");
        builder.push_bind(version);
    }
    if let Some(invited) = filter.invited {
        clause(builder, "invited");
        builder.push_bind(invited);
    }
    if let Some(completed) = filter.completed {
        clause(builder, "completed");
        builder.push_bind(completed);
    }
    if let Some(expired) = filter.expired {
        clause(builder, "expired");
        builder.push_bind(expired);
    }
    if let Some(expires_at) = filter.expires_at {
        clause(builder, "expires_at");
        builder.push_bind(expires_at);
    }
    if let Some(created_at) = filter.created_at {
        clause(builder, "created_at");
        builder.push_bind(created_at);
    }
    if let Some(updated_at) = filter.updated_at {
        clause(builder, "updated_at");
        builder.push_bind(updated_at);
    }
}

/// PostgreSQL implementation of the InviteRepository.
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    /// Creates a new PgInviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invite>, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {} FROM invites WHERE id = $1",
            INVITE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InviteRow::into_invite))
    }

    async fn list(&self, filter: &InviteFilter) -> Result<Vec<Invite>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM invites",
            INVITE_COLUMNS
        ));
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<InviteRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(InviteRow::into_invite).collect())
    }

    async fn create(&self, invite: &Invite) -> Result<Invite, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            r#"
            INSERT INTO invites (id, identity, version, invited, completed, expired,
                                 invite, expires_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            INVITE_COLUMNS
        ))
        .bind(invite.id)
        .bind(&invite.identity)
        .bind(invite.version)
        .bind(invite.invited)
        .bind(invite.completed)
        .bind(invite.expired)
        .bind(Json(&invite.invite))
        .bind(invite.expires_at)
        .bind(invite.created_at)
        .bind(invite.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_invite())
    }

    /// Persist every mutable field; `updated_at` is stamped by the database.
    async fn update(&self, invite: &Invite) -> Result<Invite, AppError> {
        let row = sqlx::query_as::<_, InviteRow>(&format!(
            r#"
            UPDATE invites
            SET identity = $2, version = $3, invited = $4, completed = $5,
                expired = $6, invite = $7, expires_at = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INVITE_COLUMNS
        ))
        .bind(invite.id)
        .bind(&invite.identity)
        .bind(invite.version)
        .bind(invite.invited)
        .bind(invite.completed)
        .bind(invite.expired)
        .bind(Json(&invite.invite))
        .bind(invite.expires_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(InviteRow::into_invite)
            .ok_or_else(|| AppError::NotFound(format!("Invite {} not found", invite.id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM invites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Invite {} not found", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_adds_no_where_clause() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM invites");
        push_filters(&mut builder, &InviteFilter::default());
        assert_eq!(builder.sql(), "SELECT id FROM invites");
    }

    #[test]
    fn test_filters_are_and_joined() {
        let filter = InviteFilter {
            identity: Some("8a1c".into()),
            invited: Some(false),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM invites");
        push_filters(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT id FROM invites WHERE identity = $1 AND invited = $2"
        );
    }
}
