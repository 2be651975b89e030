//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of names stored in varchar(255) columns
pub const MAX_NAME_LENGTH: usize = 255;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";

// =============================================================================
// Catalog
// =============================================================================

/// Maximum number of products a full-text search returns
pub const SEARCH_RESULT_LIMIT: u64 = 10;

/// Postgres text-search configuration used for product search
pub const DEFAULT_SEARCH_LANGUAGE: &str = "dutch";

// =============================================================================
// Scraper
// =============================================================================

/// Path of the scraper liveness endpoint
pub const SCRAPER_HEALTH_PATH: &str = "/health_check";

/// Path of the scraper status endpoint
pub const SCRAPER_STATUS_PATH: &str = "/status";

/// Path that starts a scrape run
pub const SCRAPER_TRIGGER_PATH: &str = "/scrape_func";
