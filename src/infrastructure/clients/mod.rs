//! External API Clients
//!
//! reqwest-backed implementations of the domain's outbound ports.

mod hook_client;
mod message_sender;

pub use hook_client::HttpHookDeliverer;
pub use message_sender::HttpMessageSender;

/// Value of the `Authorization` header both APIs expect.
pub(crate) fn token_header(token: &str) -> String {
    format!("Token {}", token)
}
