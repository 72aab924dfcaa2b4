//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod hook;
pub mod invite;
pub mod rating;

use uuid::Uuid;

use crate::shared::error::AppError;

/// Parse a UUID path segment.
pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}
