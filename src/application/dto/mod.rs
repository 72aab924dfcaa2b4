//! Data Transfer Objects
//!
//! DTOs for API request deserialization. Entities are serialized directly
//! in responses.

pub mod request;
