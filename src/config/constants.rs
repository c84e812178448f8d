//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Application
// =============================================================================

/// Default application name
pub const DEFAULT_APP_NAME: &str = "user-crud";

/// Default runtime environment
pub const DEFAULT_APP_ENV: &str = "development";

/// Environment name that enables error details in responses
pub const ENV_DEVELOPMENT: &str = "development";

/// Version reported by health endpoints
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: &str = "5432";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_NAME: &str = "user_crud";
pub const DEFAULT_DB_SSL_MODE: &str = "disable";

/// Connection pool upper bound
pub const DB_MAX_CONNECTIONS: u32 = 100;

/// Connections kept open while idle
pub const DB_MIN_CONNECTIONS: u32 = 10;

/// Maximum lifetime of a pooled connection in seconds (1 hour)
pub const DB_MAX_LIFETIME_SECS: u64 = 3600;

/// Timeout for establishing a connection and for health pings
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// CORS
// =============================================================================

pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";
pub const DEFAULT_CORS_ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
pub const DEFAULT_CORS_ALLOWED_HEADERS: &str = "Content-Type";

// =============================================================================
// Logging
// =============================================================================

pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// `console` or `json`
pub const DEFAULT_LOG_FORMAT: &str = "console";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum accepted plaintext password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;
