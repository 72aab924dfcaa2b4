//! Application Layer
//!
//! Contains business logic services, data transfer objects (DTOs) and the
//! background tasks run by the worker pool. This layer orchestrates the
//! flow of data between the presentation and domain layers.

pub mod dto;
pub mod services;
pub mod tasks;
