//! # Domain Layer
//!
//! Core business types of the rating service, independent of any
//! framework or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Invite, Rating and Hook records with their repository traits
//! - **value_objects**: Immutable value types (RecordId, HookEvent, OutboundMessage)
//! - **services**: Ports to the message sender and webhook targets

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
