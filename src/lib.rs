//! Credence - credentialing registry API
//!
//! Users, organizations, certificate templates and the certifications
//! awarding them, with soft delete and restore on every resource.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, request bodies, response views and pure rules
//! - **services**: Use cases (uniqueness checks, slug resolution, population)
//! - **infra**: Database, repositories, blob storage
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Certificate, Certification, Organization, User, UserRole};
pub use errors::{AppError, AppResult};
