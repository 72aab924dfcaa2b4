//! Invite Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::parse_uuid;
use crate::application::dto::request::{InvitePatchRequest, InviteRequest};
use crate::application::services::{HookServiceImpl, InviteError, InviteService, InviteServiceImpl};
use crate::domain::{Invite, InviteFilter};
use crate::infrastructure::repositories::{PgHookRepository, PgInviteRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validate_body;
use crate::startup::AppState;

type Service = InviteServiceImpl<PgInviteRepository, HookServiceImpl<PgHookRepository>>;

fn invite_service(state: &AppState) -> Service {
    let hooks = HookServiceImpl::new(
        Arc::new(PgHookRepository::new(state.db.clone())),
        state.queue.clone(),
    );
    InviteServiceImpl::new(
        Arc::new(PgInviteRepository::new(state.db.clone())),
        Arc::new(hooks),
        state.queue.clone(),
    )
}

fn invite_error(e: InviteError) -> AppError {
    match e {
        InviteError::NotFound => AppError::NotFound("Invite not found".into()),
        InviteError::Repository(e) => e,
        e => AppError::Internal(e.to_string()),
    }
}

/// List invites
pub async fn list_invites(
    State(state): State<AppState>,
    Query(filter): Query<InviteFilter>,
) -> Result<Json<Vec<Invite>>, AppError> {
    let invites = invite_service(&state)
        .list_invites(filter)
        .await
        .map_err(invite_error)?;

    Ok(Json(invites))
}

/// Create an invite; unsent invites get their message scheduled
pub async fn create_invite(
    State(state): State<AppState>,
    Json(body): Json<InviteRequest>,
) -> Result<(StatusCode, Json<Invite>), AppError> {
    validate_body(&body)?;

    let invite = invite_service(&state)
        .create_invite(body.into())
        .await
        .map_err(invite_error)?;

    Ok((StatusCode::CREATED, Json(invite)))
}

/// Get invite by ID
pub async fn get_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
) -> Result<Json<Invite>, AppError> {
    let invite_id = parse_uuid(&invite_id, "invite")?;

    let invite = invite_service(&state)
        .get_invite(invite_id)
        .await
        .map_err(invite_error)?;

    Ok(Json(invite))
}

/// Replace an invite
pub async fn replace_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
    Json(body): Json<InviteRequest>,
) -> Result<Json<Invite>, AppError> {
    let invite_id = parse_uuid(&invite_id, "invite")?;
    validate_body(&body)?;

    let invite = invite_service(&state)
        .replace_invite(invite_id, body.into())
        .await
        .map_err(invite_error)?;

    Ok(Json(invite))
}

/// Partially update an invite
pub async fn patch_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
    Json(body): Json<InvitePatchRequest>,
) -> Result<Json<Invite>, AppError> {
    let invite_id = parse_uuid(&invite_id, "invite")?;
    validate_body(&body)?;

    let invite = invite_service(&state)
        .patch_invite(invite_id, body.into())
        .await
        .map_err(invite_error)?;

    Ok(Json(invite))
}

/// Delete an invite
pub async fn delete_invite(
    State(state): State<AppState>,
    Path(invite_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let invite_id = parse_uuid(&invite_id, "invite")?;

    invite_service(&state)
        .delete_invite(invite_id)
        .await
        .map_err(invite_error)?;

    Ok(StatusCode::NO_CONTENT)
}
