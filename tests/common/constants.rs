//! Shared constants for end-to-end tests
//!
//! When the fixture batches change, update only this file and fixtures.rs.

// ============================================================================
// Fixture Terms
// ============================================================================

/// Term whose batch is the A/A/B reference scenario
pub const REFERENCE_TERM: &str = "pop";

/// Term stored as a bare JSON array with messy field types
pub const MESSY_TERM: &str = "rock";

/// Term stored as the default "top" chart, reached through the "all" preset
pub const ALL_PRESET_ID: &str = "all";

/// Term whose file is an empty envelope
pub const EMPTY_TERM: &str = "jazz";

/// Term whose file holds a Deezer API error
pub const API_ERROR_TERM: &str = "classical";

/// Term whose file is not valid JSON
pub const CORRUPT_TERM: &str = "electronic";

/// Term with no file at all
pub const MISSING_TERM: &str = "polka";

// ============================================================================
// Reference Scenario
// ============================================================================

pub const REFERENCE_TOTAL_TRACKS: u64 = 3;
pub const REFERENCE_AVG_DURATION: u64 = 200;
pub const REFERENCE_EXPLICIT_COUNT: u64 = 1;
pub const REFERENCE_EXPLICIT_PERCENT: u64 = 33;

/// Number of tracks in the "top" fixture
pub const TOP_TRACK_COUNT: usize = 12;

// ============================================================================
// Timeouts
// ============================================================================

/// Timeout for individual HTTP requests in tests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between server readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
