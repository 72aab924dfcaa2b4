//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **InviteService**: Rating invite management, schedules invite messages
//! - **RatingService**: Rating CRUD
//! - **HookService**: Webhook subscriptions and event fan-out

pub mod hook_service;
pub mod invite_service;
pub mod rating_service;

// Re-export hook service types
pub use hook_service::{
    fire_model_event, hook_payload, HookError, HookInputDto, HookService, HookServiceImpl,
};

// Re-export invite service types
pub use invite_service::{
    InviteError, InviteInputDto, InvitePatchDto, InviteService, InviteServiceImpl,
};

// Re-export rating service types
pub use rating_service::{
    RatingError, RatingInputDto, RatingPatchDto, RatingService, RatingServiceImpl,
};
