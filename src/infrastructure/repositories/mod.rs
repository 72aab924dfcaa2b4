//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **InviteRepository** - Rating invites with JSONB invite data
//! - **RatingRepository** - Ratings answering an invite
//! - **HookRepository** - Webhook subscriptions
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgHookRepository, PgInviteRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let invite_repo = PgInviteRepository::new(pool.clone());
//!     let hook_repo = PgHookRepository::new(pool);
//! }
//! ```

pub mod hook_repository;
pub mod invite_repository;
pub mod rating_repository;

pub use hook_repository::PgHookRepository;
pub use invite_repository::PgInviteRepository;
pub use rating_repository::PgRatingRepository;
