//! # Domain Services
//!
//! Ports to the external systems the background jobs talk to. Concrete
//! HTTP clients live in the infrastructure layer.
//!
//! ## Services
//!
//! - **MessageSender**: Creates outbound messages
//! - **HookDeliverer**: Posts webhook payloads to subscriber URLs

mod hook_deliverer;
mod message_sender;

pub use hook_deliverer::*;
pub use message_sender::*;
