//! Error taxonomy for reCAPTCHA verification.

use thiserror::Error;

use crate::response::V2Response;

/// Errors produced while verifying a challenge response.
///
/// Every failure is a distinct variant so callers can branch on cause
/// (show "try again" vs block the request). None of these are fatal to
/// the process; each verification call is independent.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The request carried no challenge token.
    #[error("missing captcha response token in request")]
    MissingToken,

    /// The peer address could not be split into host and port.
    #[error("invalid client address '{0}'")]
    ClientAddr(String),

    /// The verification endpoint could not be reached, returned a
    /// non-success status, or the body could not be read.
    #[error("siteverify request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("invalid siteverify response: {0}")]
    Decode(String),

    /// The endpoint reported the challenge was not solved. Carries the
    /// decoded response so error codes remain inspectable.
    #[error("challenge was not successful: [{}]", .0.error_codes.join(", "))]
    NoSuccess(Box<V2Response>),

    /// v3 only: the returned score was below the configured minimum.
    #[error("score {score} below required minimum {min_score}")]
    LowScore { score: f64, min_score: f64 },

    /// v3 only: the returned action did not match the required one.
    #[error("wrong action: want '{want}' but got '{got}'")]
    WrongAction { want: String, got: String },
}

impl VerifyError {
    /// Returns true when the failure came from the network layer and a
    /// caller may reasonably try the whole verification again.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true when the endpoint answered but the challenge was
    /// rejected (unsolved, low score, or wrong action).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NoSuccess(_) | Self::LowScore { .. } | Self::WrongAction { .. }
        )
    }
}
