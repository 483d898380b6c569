//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// SCHEDULER DEFAULTS
// =============================================================================

/// Default cron expression for the preselection job (every 15 minutes)
pub const DEFAULT_PRESELECTION_CRON: &str = "0 */15 * * * *";

// =============================================================================
// CONTEST SETTINGS
// =============================================================================

/// Number of top-ranked entries preselected when a contest does not say otherwise
pub const DEFAULT_PRESELECTION_COUNT: i32 = 100;

/// Activity type that never counts towards completion
pub const REST_ACTIVITY_TYPE: &str = "rest";

/// Maximum accepted length of a submitted video URL
pub const MAX_VIDEO_URL_LENGTH: u64 = 2048;

// =============================================================================
// USER ROLES
// =============================================================================

/// Role identifiers carried in access tokens
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const AUTHENTICATED: &str = "authenticated";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for leaderboards
pub const DEFAULT_LEADERBOARD_PAGE_SIZE: u32 = 50;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
