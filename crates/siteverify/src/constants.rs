//! Shared constants for the siteverify client.

/// Verification endpoint. Fixed; Google serves both v2 and v3 here.
pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Form field the reCAPTCHA widget submits the challenge token under.
pub const RESPONSE_FIELD: &str = "g-recaptcha-response";

/// Minimum v3 score accepted when the caller configures none.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Request timeout for siteverify calls (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection timeout for siteverify calls (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Form field names sent to the verification endpoint.
pub mod form_fields {
    /// Shared secret between the site and the endpoint.
    pub const SECRET: &str = "secret";

    /// The challenge token submitted by the client.
    pub const RESPONSE: &str = "response";

    /// Client IP address (optional, best-effort).
    pub const REMOTEIP: &str = "remoteip";
}
