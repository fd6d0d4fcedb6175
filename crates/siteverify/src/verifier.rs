//! Verification entry points and the HTTP transport behind them.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, RESPONSE_FIELD, SITEVERIFY_URL,
    form_fields,
};
use crate::error::VerifyError;
use crate::policy::ScorePolicy;
use crate::request::{ClientRequest, client_ip};
use crate::response::{V2Response, V3Response};

/// Client for verifying reCAPTCHA responses against the siteverify
/// endpoint.
///
/// Holds a reusable connection pool; share one `Verifier` across tasks
/// rather than building one per request. Every verification is a single
/// network round trip with no retry — callers decide whether to retry.
#[derive(Debug, Clone)]
pub struct Verifier {
    http: reqwest::Client,
}

impl Verifier {
    /// Create a verifier with default timeout settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a verifier with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Verify a v2 (pass/fail) challenge response.
    ///
    /// Extracts the token and client IP from `request`, posts them to
    /// the endpoint, and decodes the result. An unsolved challenge is an
    /// error carrying the decoded response for diagnostics.
    pub async fn verify_v2(
        &self,
        secret: &str,
        request: &impl ClientRequest,
    ) -> Result<V2Response, VerifyError> {
        let (token, remoteip) = extract(request)?;
        let body = self.siteverify(secret, &token, Some(&remoteip)).await?;
        let resp: V2Response = decode(&body)?;

        if !resp.success {
            tracing::debug!(error_codes = ?resp.error_codes, "captcha challenge not solved");
            return Err(VerifyError::NoSuccess(Box::new(resp)));
        }

        tracing::debug!(hostname = %resp.hostname, "captcha challenge verified");
        Ok(resp)
    }

    /// Verify a v3 (score-based) challenge response against a policy.
    pub async fn verify_v3(
        &self,
        secret: &str,
        request: &impl ClientRequest,
        policy: ScorePolicy,
    ) -> Result<V3Response, VerifyError> {
        let (token, remoteip) = extract(request)?;
        let body = self.siteverify(secret, &token, Some(&remoteip)).await?;
        let resp: V3Response = decode(&body)?;

        policy.evaluate(&resp)?;

        tracing::debug!(
            score = resp.score,
            action = %resp.action,
            hostname = %resp.response.hostname,
            "captcha challenge accepted"
        );
        Ok(resp)
    }

    /// Perform the single POST to the verification endpoint and return
    /// the raw response body.
    async fn siteverify(
        &self,
        secret: &str,
        token: &str,
        remoteip: Option<&str>,
    ) -> Result<Vec<u8>, VerifyError> {
        let mut params = vec![
            (form_fields::SECRET, secret),
            (form_fields::RESPONSE, token),
        ];
        if let Some(ip) = remoteip {
            params.push((form_fields::REMOTEIP, ip));
        }

        let response = self
            .http
            .post(SITEVERIFY_URL)
            .form(&params)
            .send()
            .await
            .map_err(classify_transport)?;

        if !response.status().is_success() {
            return Err(VerifyError::Transport(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(classify_transport)?;
        Ok(body.to_vec())
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the challenge token and client IP out of the inbound request.
///
/// Runs before any network activity: a request without a token never
/// reaches the endpoint.
fn extract(request: &impl ClientRequest) -> Result<(String, String), VerifyError> {
    let token = match request.form_value(RESPONSE_FIELD) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Err(VerifyError::MissingToken),
    };

    let remoteip = client_ip(request.remote_addr())?;
    Ok((token, remoteip))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, VerifyError> {
    serde_json::from_slice(body)
        .map_err(|e| VerifyError::Decode(format!("failed to parse siteverify response: {e}")))
}

fn classify_transport(e: reqwest::Error) -> VerifyError {
    if e.is_timeout() {
        VerifyError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        VerifyError::Transport(format!("connection failed: {e}"))
    } else {
        VerifyError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FormRequest;

    #[test]
    fn test_missing_token_fails_before_network() {
        let verifier = Verifier::new();
        let request = FormRequest::new("127.0.0.1:58662");

        let err = tokio_test::block_on(verifier.verify_v2("secret", &request)).unwrap_err();
        assert!(matches!(err, VerifyError::MissingToken));
    }

    #[test]
    fn test_empty_token_fails_before_network() {
        let verifier = Verifier::new();
        let request = FormRequest::new("127.0.0.1:58662").with_token("");

        let err =
            tokio_test::block_on(verifier.verify_v3("secret", &request, ScorePolicy::new()))
                .unwrap_err();
        assert!(matches!(err, VerifyError::MissingToken));
    }

    #[test]
    fn test_portless_remote_addr_fails_before_network() {
        let verifier = Verifier::new();
        let request = FormRequest::new("203.0.113.7").with_token("anything");

        let err = tokio_test::block_on(verifier.verify_v2("secret", &request)).unwrap_err();
        assert!(matches!(err, VerifyError::ClientAddr(_)));
    }

    #[test]
    fn test_extract_returns_token_and_ip() {
        let request = FormRequest::new("[2001:db8::1]:443").with_token("tok");
        let (token, ip) = extract(&request).unwrap();

        assert_eq!(token, "tok");
        assert_eq!(ip, "2001:db8::1");
    }

    #[test]
    fn test_decode_rejects_malformed_body() {
        let err = decode::<V2Response>(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, VerifyError::Decode(_)));
    }

    #[test]
    fn test_decode_tolerates_unknown_fields() {
        let body = br#"{"success": true, "hostname": "example.com", "apk_package_name": null}"#;
        let resp: V2Response = decode(body).unwrap();
        assert!(resp.success);
    }
}
