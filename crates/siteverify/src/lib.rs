//! # Siteverify
//!
//! reCAPTCHA verification client. Checks v2 (pass/fail) and v3
//! (score-based) challenge responses against Google's siteverify
//! endpoint and interprets the result under a configurable policy.
//!
//! ## Modules
//! - `verifier` - HTTP transport and the verification entry points
//! - `policy` - Acceptance rules for v3 scores
//! - `request` - Inbound request access
//! - `response` - Decoded response shapes
//! - `error` - Error taxonomy
//! - `constants` - Endpoint URL, field names, defaults
//!
//! ## Usage
//! ```no_run
//! use siteverify::{FormRequest, ScorePolicy, Verifier};
//!
//! # async fn handle() -> Result<(), siteverify::VerifyError> {
//! let verifier = Verifier::new();
//! let request = FormRequest::new("203.0.113.7:41512").with_token("token-from-widget");
//!
//! let result = verifier
//!     .verify_v3("my-secret", &request, ScorePolicy::new().min_score(0.7).action("login"))
//!     .await?;
//! println!("accepted with score {}", result.score);
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod policy;
pub mod request;
pub mod response;
pub mod verifier;

pub use constants::{DEFAULT_MIN_SCORE, RESPONSE_FIELD, SITEVERIFY_URL};
pub use error::VerifyError;
pub use policy::ScorePolicy;
pub use request::{ClientRequest, FormRequest};
pub use response::{V2Response, V3Response};
pub use verifier::Verifier;
