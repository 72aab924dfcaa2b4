//! Rating Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::parse_uuid;
use crate::application::dto::request::{RatingPatchRequest, RatingRequest};
use crate::application::services::{HookServiceImpl, RatingError, RatingService, RatingServiceImpl};
use crate::domain::{Rating, RatingFilter};
use crate::infrastructure::repositories::{PgHookRepository, PgRatingRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

type Service = RatingServiceImpl<PgRatingRepository, HookServiceImpl<PgHookRepository>>;

fn rating_service(state: &AppState) -> Service {
    let hooks = HookServiceImpl::new(
        Arc::new(PgHookRepository::new(state.db.clone())),
        state.queue.clone(),
    );
    RatingServiceImpl::new(
        Arc::new(PgRatingRepository::new(state.db.clone())),
        Arc::new(hooks),
    )
}

fn rating_error(e: RatingError) -> AppError {
    match e {
        RatingError::NotFound => AppError::NotFound("Rating not found".into()),
        RatingError::Repository(e) => e,
    }
}

/// List ratings
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(filter): Query<RatingFilter>,
) -> Result<Json<Vec<Rating>>, AppError> {
    let ratings = rating_service(&state)
        .list_ratings(filter)
        .await
        .map_err(rating_error)?;

    Ok(Json(ratings))
}

/// Record a rating
pub async fn create_rating(
    State(state): State<AppState>,
    Json(body): Json<RatingRequest>,
) -> Result<(StatusCode, Json<Rating>), AppError> {
    validate_body(&body)?;

    let rating = rating_service(&state)
        .create_rating(body.into())
        .await
        .map_err(rating_error)?;

    Ok((StatusCode::CREATED, Json(rating)))
}

/// Get rating by ID
pub async fn get_rating(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
) -> Result<Json<Rating>, AppError> {
    let rating_id = parse_uuid(&rating_id, "rating")?;

    let rating = rating_service(&state)
        .get_rating(rating_id)
        .await
        .map_err(rating_error)?;

    Ok(Json(rating))
}

/// Replace a rating
pub async fn replace_rating(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
    Json(body): Json<RatingRequest>,
) -> Result<Json<Rating>, AppError> {
    let rating_id = parse_uuid(&rating_id, "rating")?;
    validate_body(&body)?;

    let rating = rating_service(&state)
        .replace_rating(rating_id, body.into())
        .await
        .map_err(rating_error)?;

    Ok(Json(rating))
}

/// Partially update a rating
pub async fn patch_rating(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
    Json(body): Json<RatingPatchRequest>,
) -> Result<Json<Rating>, AppError> {
    let rating_id = parse_uuid(&rating_id, "rating")?;
    validate_body(&body)?;

    let rating = rating_service(&state)
        .patch_rating(rating_id, body.into())
        .await
        .map_err(rating_error)?;

    Ok(Json(rating))
}

/// Delete a rating
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let rating_id = parse_uuid(&rating_id, "rating")?;

    rating_service(&state)
        .delete_rating(rating_id)
        .await
        .map_err(rating_error)?;

    Ok(StatusCode::NO_CONTENT)
}
