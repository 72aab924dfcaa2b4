//! Hook Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::HookRequest;
use crate::application::services::{HookError, HookService, HookServiceImpl};
use crate::domain::{Hook, HookEvent};
use crate::infrastructure::repositories::PgHookRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

fn hook_service(state: &AppState) -> HookServiceImpl<PgHookRepository> {
    HookServiceImpl::new(
        Arc::new(PgHookRepository::new(state.db.clone())),
        state.queue.clone(),
    )
}

fn hook_error(e: HookError) -> AppError {
    match e {
        HookError::NotFound => AppError::NotFound("Hook not found".into()),
        HookError::InvalidEvent(event) => {
            let known: Vec<&str> = HookEvent::ALL.iter().map(|e| e.as_str()).collect();
            AppError::Validation(format!(
                "event: unknown event `{}`, expected one of {}",
                event,
                known.join(", ")
            ))
        }
        HookError::Repository(e) => e,
        e => AppError::Internal(e.to_string()),
    }
}

fn parse_hook_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid hook ID".into()))
}

/// List hooks
pub async fn list_hooks(State(state): State<AppState>) -> Result<Json<Vec<Hook>>, AppError> {
    let hooks = hook_service(&state).list_hooks().await.map_err(hook_error)?;
    Ok(Json(hooks))
}

/// Register a hook
pub async fn create_hook(
    State(state): State<AppState>,
    Json(body): Json<HookRequest>,
) -> Result<(StatusCode, Json<Hook>), AppError> {
    validate_body(&body)?;

    let hook = hook_service(&state)
        .create_hook(body.into())
        .await
        .map_err(hook_error)?;

    Ok((StatusCode::CREATED, Json(hook)))
}

/// Get hook by ID
pub async fn get_hook(
    State(state): State<AppState>,
    Path(hook_id): Path<String>,
) -> Result<Json<Hook>, AppError> {
    let hook_id = parse_hook_id(&hook_id)?;

    let hook = hook_service(&state)
        .get_hook(hook_id)
        .await
        .map_err(hook_error)?;

    Ok(Json(hook))
}

/// Replace a hook
pub async fn update_hook(
    State(state): State<AppState>,
    Path(hook_id): Path<String>,
    Json(body): Json<HookRequest>,
) -> Result<Json<Hook>, AppError> {
    let hook_id = parse_hook_id(&hook_id)?;
    validate_body(&body)?;

    let hook = hook_service(&state)
        .update_hook(hook_id, body.into())
        .await
        .map_err(hook_error)?;

    Ok(Json(hook))
}

/// Delete a hook
pub async fn delete_hook(
    State(state): State<AppState>,
    Path(hook_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let hook_id = parse_hook_id(&hook_id)?;

    hook_service(&state)
        .delete_hook(hook_id)
        .await
        .map_err(hook_error)?;

    Ok(StatusCode::NO_CONTENT)
}
