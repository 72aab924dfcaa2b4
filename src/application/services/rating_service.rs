//! Rating Service
//!
//! Stores answers given in response to invites.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::hook_service::{fire_model_event, HookService};
use crate::domain::{HookEvent, Rating, RatingFilter, RatingRepository};
use crate::shared::error::AppError;

/// Rating service trait
#[async_trait]
pub trait RatingService: Send + Sync {
    /// List ratings matching the filter
    async fn list_ratings(&self, filter: RatingFilter) -> Result<Vec<Rating>, RatingError>;

    /// Get rating by ID
    async fn get_rating(&self, rating_id: Uuid) -> Result<Rating, RatingError>;

    /// Record a rating
    async fn create_rating(&self, request: RatingInputDto) -> Result<Rating, RatingError>;

    /// Replace every writable field
    async fn replace_rating(
        &self,
        rating_id: Uuid,
        request: RatingInputDto,
    ) -> Result<Rating, RatingError>;

    /// Update the given fields only
    async fn patch_rating(
        &self,
        rating_id: Uuid,
        update: RatingPatchDto,
    ) -> Result<Rating, RatingError>;

    /// Delete a rating
    async fn delete_rating(&self, rating_id: Uuid) -> Result<(), RatingError>;
}

/// Create/replace rating request
#[derive(Debug, Clone, PartialEq)]
pub struct RatingInputDto {
    pub identity: String,
    pub invite: Uuid,
    pub version: Option<i32>,
    pub question_id: i32,
    pub question_text: String,
    pub answer_text: String,
    pub answer_value: String,
}

/// Partial rating update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingPatchDto {
    pub identity: Option<String>,
    pub invite: Option<Uuid>,
    pub version: Option<i32>,
    pub question_id: Option<i32>,
    pub question_text: Option<String>,
    pub answer_text: Option<String>,
    pub answer_value: Option<String>,
}

impl From<RatingInputDto> for RatingPatchDto {
    fn from(input: RatingInputDto) -> Self {
        Self {
            identity: Some(input.identity),
            invite: Some(input.invite),
            version: input.version,
            question_id: Some(input.question_id),
            question_text: Some(input.question_text),
            answer_text: Some(input.answer_text),
            answer_value: Some(input.answer_value),
        }
    }
}

impl RatingPatchDto {
    fn apply(self, rating: &mut Rating) {
        if let Some(identity) = self.identity {
            rating.identity = identity;
        }
        if let Some(invite) = self.invite {
            rating.invite = invite;
        }
        if let Some(version) = self.version {
            rating.version = version;
        }
        if let Some(question_id) = self.question_id {
            rating.question_id = question_id;
        }
        if let Some(question_text) = self.question_text {
            rating.question_text = question_text;
        }
        if let Some(answer_text) = self.answer_text {
            rating.answer_text = answer_text;
        }
        if let Some(answer_value) = self.answer_value {
            rating.answer_value = answer_value;
        }
    }
}

/// Rating service errors
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Rating not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] AppError),
}

/// RatingService implementation
pub struct RatingServiceImpl<R, K>
where
    R: RatingRepository,
    K: HookService,
{
    rating_repo: Arc<R>,
    hooks: Arc<K>,
}

impl<R, K> RatingServiceImpl<R, K>
where
    R: RatingRepository,
    K: HookService + 'static,
{
    pub fn new(rating_repo: Arc<R>, hooks: Arc<K>) -> Self {
        Self { rating_repo, hooks }
    }

    async fn load(&self, rating_id: Uuid) -> Result<Rating, RatingError> {
        self.rating_repo
            .find_by_id(rating_id)
            .await?
            .ok_or(RatingError::NotFound)
    }

    async fn store_update(
        &self,
        mut rating: Rating,
        update: RatingPatchDto,
    ) -> Result<Rating, RatingError> {
        update.apply(&mut rating);
        let rating = self.rating_repo.update(&rating).await.map_err(|e| match e {
            AppError::NotFound(_) => RatingError::NotFound,
            e => RatingError::Repository(e),
        })?;

        fire_model_event(&*self.hooks, HookEvent::RatingChanged, &rating).await;
        Ok(rating)
    }
}

#[async_trait]
impl<R, K> RatingService for RatingServiceImpl<R, K>
where
    R: RatingRepository + 'static,
    K: HookService + 'static,
{
    async fn list_ratings(&self, filter: RatingFilter) -> Result<Vec<Rating>, RatingError> {
        Ok(self.rating_repo.list(&filter).await?)
    }

    async fn get_rating(&self, rating_id: Uuid) -> Result<Rating, RatingError> {
        self.load(rating_id).await
    }

    async fn create_rating(&self, request: RatingInputDto) -> Result<Rating, RatingError> {
        let rating = Rating {
            id: Uuid::new_v4(),
            identity: request.identity,
            invite: request.invite,
            version: request.version.unwrap_or(1),
            question_id: request.question_id,
            question_text: request.question_text,
            answer_text: request.answer_text,
            answer_value: request.answer_value,
            created_at: Utc::now(),
        };

        let rating = self.rating_repo.create(&rating).await?;
        info!(rating_id = %rating.id, invite_id = %rating.invite, "Rating recorded");

        fire_model_event(&*self.hooks, HookEvent::RatingAdded, &rating).await;
        Ok(rating)
    }

    async fn replace_rating(
        &self,
        rating_id: Uuid,
        request: RatingInputDto,
    ) -> Result<Rating, RatingError> {
        let rating = self.load(rating_id).await?;
        self.store_update(rating, request.into()).await
    }

    async fn patch_rating(
        &self,
        rating_id: Uuid,
        update: RatingPatchDto,
    ) -> Result<Rating, RatingError> {
        let rating = self.load(rating_id).await?;
        self.store_update(rating, update).await
    }

    async fn delete_rating(&self, rating_id: Uuid) -> Result<(), RatingError> {
        let rating = self.load(rating_id).await?;
        self.rating_repo.delete(rating_id).await.map_err(|e| match e {
            AppError::NotFound(_) => RatingError::NotFound,
            e => RatingError::Repository(e),
        })?;

        fire_model_event(&*self.hooks, HookEvent::RatingDeleted, &rating).await;
        Ok(())
    }
}
