//! Decoded siteverify response shapes.
//!
//! Decoding is purely structural: absent fields fall back to empty/zero
//! values and no range validation is applied (a score outside [0, 1] is
//! passed through untouched). Policy decisions happen in `policy`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A v2 (pass/fail) siteverify response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct V2Response {
    /// Whether the challenge was solved.
    #[serde(default)]
    pub success: bool,

    /// Timestamp of the challenge load. Omitted by the endpoint on
    /// error responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_ts: Option<DateTime<Utc>>,

    /// Hostname of the site where the challenge was solved.
    #[serde(default)]
    pub hostname: String,

    /// Error codes reported by the endpoint.
    #[serde(rename = "error-codes", default, skip_serializing_if = "Vec::is_empty")]
    pub error_codes: Vec<String>,
}

/// A v3 (score-based) siteverify response.
///
/// Carries everything a v2 response does plus the risk score and the
/// action label the widget was executed with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct V3Response {
    /// Risk score; 1.0 is very likely a good interaction, 0.0 very
    /// likely a bot.
    #[serde(default)]
    pub score: f64,

    /// Action name provided when executing the widget.
    #[serde(default)]
    pub action: String,

    /// The pass/fail fields shared with v2.
    #[serde(flatten)]
    pub response: V2Response,
}
