//! User CRUD API - layered user management backend.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, password value object, request/response types
//! - **services**: User use cases (validation, uniqueness, hashing, auth)
//! - **infra**: Database connection, migrations and repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Response envelope and pagination
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (runs pending migrations first)
//! cargo run -- serve
//!
//! # Inspect migrations
//! cargo run -- migrate status
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
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
