//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use service_rating::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Jobs go to {} with {} workers", settings.queue.key, settings.queue.workers);
//! ```

mod settings;

pub use settings::*;
