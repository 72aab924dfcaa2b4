//! # Domain Entities
//!
//! Core domain entities. All entities map directly to their corresponding
//! database tables.
//!
//! - **Invite**: An invitation for an identity to rate a service
//! - **Rating**: One answer given in response to an invite
//! - **Hook**: A webhook subscription to a model event
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod hook;
mod invite;
mod rating;

pub use hook::{Hook, HookRepository, NewHook};
pub use invite::{Invite, InviteFilter, InviteRepository, CONTENT_KEY, TO_ADDR_KEY};
pub use rating::{Rating, RatingFilter, RatingRepository};

#[cfg(test)]
pub use hook::MockHookRepository;
#[cfg(test)]
pub use invite::MockInviteRepository;
#[cfg(test)]
pub use rating::MockRatingRepository;
