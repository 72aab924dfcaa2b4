//! # Service Rating Library
//!
//! This crate provides the service rating backend:
//! - RESTful HTTP API for rating invites, ratings and webhook subscriptions
//! - Background tasks that send invite messages and deliver webhooks
//! - PostgreSQL for persistent storage
//! - Redis as the job broker
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits and outbound ports
//! - **Application Layer**: Business logic services, DTOs and background tasks
//! - **Infrastructure Layer**: Database, job queue and HTTP client implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! service_rating/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and ports
//! +-- application/    Application services, DTOs and tasks
//! +-- infrastructure/ Database, queue, clients and metrics
//! +-- presentation/   HTTP routes and handlers
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services and background tasks
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
