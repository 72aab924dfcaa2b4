//! Rating Repository Implementation
//!
//! PostgreSQL implementation of rating storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::{Rating, RatingFilter, RatingRepository};
use crate::shared::error::AppError;

const RATING_COLUMNS: &str = "id, identity, invite_id, version, question_id, question_text, \
                              answer_text, answer_value, created_at";

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    identity: String,
    invite_id: Uuid,
    version: i32,
    question_id: i32,
    question_text: String,
    answer_text: String,
    answer_value: String,
    created_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            identity: row.identity,
            invite: row.invite_id,
            version: row.version,
            question_id: row.question_id,
            question_text: row.question_text,
            answer_text: row.answer_text,
            answer_value: row.answer_value,
            created_at: row.created_at,
        }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &RatingFilter) {
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
    if let Some(invite) = filter.invite {
        clause(builder, "invite_id");
        builder.push_bind(invite);
    }
    if let Some(version) = filter.version {
        clause(builder, "version");
        builder.push_bind(version);
    }
    if let Some(question_id) = filter.question_id {
        clause(builder, "question_id");
        builder.push_bind(question_id);
    }
    if let Some(created_at) = filter.created_at {
        clause(builder, "created_at");
        builder.push_bind(created_at);
    }
}

/// PostgreSQL implementation of the RatingRepository.
#[derive(Clone)]
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rating>, AppError> {
        let row = sqlx::query_as::<_, RatingRow>(&format!(
            "SELECT {} FROM ratings WHERE id = $1",
            RATING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Rating::from))
    }

    async fn list(&self, filter: &RatingFilter) -> Result<Vec<Rating>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM ratings",
            RATING_COLUMNS
        ));
        push_filters(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder
            .build_query_as::<RatingRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    /// Insert a rating. A dangling invite reference surfaces as a
    /// foreign-key violation and is reported as a bad request.
    async fn create(&self, rating: &Rating) -> Result<Rating, AppError> {
        let row = sqlx::query_as::<_, RatingRow>(&format!(
            r#"
            INSERT INTO ratings (id, identity, invite_id, version, question_id,
                                 question_text, answer_text, answer_value, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            RATING_COLUMNS
        ))
        .bind(rating.id)
        .bind(&rating.identity)
        .bind(rating.invite)
        .bind(rating.version)
        .bind(rating.question_id)
        .bind(&rating.question_text)
        .bind(&rating.answer_text)
        .bind(&rating.answer_value)
        .bind(rating.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| foreign_key_error(e, rating.invite))?;

        Ok(row.into())
    }

    async fn update(&self, rating: &Rating) -> Result<Rating, AppError> {
        let row = sqlx::query_as::<_, RatingRow>(&format!(
            r#"
            UPDATE ratings
            SET identity = $2, invite_id = $3, version = $4, question_id = $5,
                question_text = $6, answer_text = $7, answer_value = $8
            WHERE id = $1
            RETURNING {}
            "#,
            RATING_COLUMNS
        ))
        .bind(rating.id)
        .bind(&rating.identity)
        .bind(rating.invite)
        .bind(rating.version)
        .bind(rating.question_id)
        .bind(&rating.question_text)
        .bind(&rating.answer_text)
        .bind(&rating.answer_value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| foreign_key_error(e, rating.invite))?;

        row.map(Rating::from)
            .ok_or_else(|| AppError::NotFound(format!("Rating {} not found", rating.id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Rating {} not found", id)));
        }

        Ok(())
    }
}

fn foreign_key_error(error: sqlx::Error, invite: Uuid) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::BadRequest(format!("Invite {} does not exist", invite))
        }
        _ => AppError::Database(error),
    }
}
