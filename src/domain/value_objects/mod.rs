//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **RecordId**: Integer or UUID key of a hook-triggering record
//! - **HookEvent**: Model lifecycle events hooks subscribe to
//! - **OutboundMessage**: Request body for the message sender API

mod hook_event;
mod outbound_message;
mod record_id;

pub use hook_event::*;
pub use outbound_message::*;
pub use record_id::*;
