//! Platform constants
//!
//! Centralized limits, defaults and version strings. All magic numbers
//! used across more than one crate live here.

// ============================================================================
// Versions
// ============================================================================

/// Current REST API version segment
pub const API_VERSION: &str = "v1";

/// Credit methodology version recorded with enrollments
pub const CREDIT_METHODOLOGY_VERSION: &str = "v1";

// ============================================================================
// Pagination
// ============================================================================

/// Default page size for list endpoints
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Hard cap on requested page size
pub const MAX_PAGE_LIMIT: u32 = 500;

// ============================================================================
// Field limits
// ============================================================================

/// Maximum crops recorded per farmer
pub const MAX_CROPS_PER_FARMER: usize = 20;

/// Maximum points in a single field boundary ring
pub const MAX_BOUNDARY_POINTS: usize = 256;

/// Maximum stored transcript length in bytes
pub const MAX_TRANSCRIPT_BYTES: usize = 16 * 1024;

/// Maximum SMS body length accepted for sending
pub const MAX_SMS_BODY_CHARS: usize = 1600;

// ============================================================================
// Timeouts (seconds)
// ============================================================================

/// Default timeout for outbound vendor requests
pub const VENDOR_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Secrets
// ============================================================================

/// Trailing characters left visible when masking a secret
pub const SECRET_VISIBLE_CHARS: usize = 4;
