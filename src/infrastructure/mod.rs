//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - Job queue brokers (Redis, in-memory) and the worker pool
//! - HTTP clients for the message sender and webhook targets
//! - Prometheus metrics

pub mod clients;
pub mod database;
pub mod metrics;
pub mod queue;
pub mod repositories;
