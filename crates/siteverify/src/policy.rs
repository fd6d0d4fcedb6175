//! Acceptance policy for v3 score-based verifications.

use crate::constants::DEFAULT_MIN_SCORE;
use crate::error::VerifyError;
use crate::response::V3Response;

/// Acceptance rules applied to a decoded v3 response.
///
/// Built from defaults and overridden one field at a time; when the same
/// field is set twice, the later call wins. The policy is constructed
/// once per verification call and never consulted again afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePolicy {
    min_score: f64,
    action: String,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            action: String::new(),
        }
    }
}

impl ScorePolicy {
    /// Policy with default settings (minimum score 0.5, any action).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a minimum score. The threshold is inclusive: a response
    /// scoring exactly the minimum is accepted.
    pub fn min_score(mut self, min: f64) -> Self {
        self.min_score = min;
        self
    }

    /// Require an exact action label. Comparison is case-sensitive; an
    /// empty label means no constraint.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Apply the checks to a decoded response, in order, stopping at the
    /// first failure.
    ///
    /// An unsolved challenge is reported as [`VerifyError::NoSuccess`]
    /// even though its score would also fall below the threshold; the
    /// finer-grained policy failures only apply to solved challenges.
    pub fn evaluate(&self, resp: &V3Response) -> Result<(), VerifyError> {
        if !resp.response.success {
            return Err(VerifyError::NoSuccess(Box::new(resp.response.clone())));
        }

        if resp.score < self.min_score {
            return Err(VerifyError::LowScore {
                score: resp.score,
                min_score: self.min_score,
            });
        }

        if !self.action.is_empty() && resp.action != self.action {
            return Err(VerifyError::WrongAction {
                want: self.action.clone(),
                got: resp.action.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::V2Response;

    fn solved(score: f64, action: &str) -> V3Response {
        V3Response {
            score,
            action: action.to_string(),
            response: V2Response {
                success: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_no_success_reported_before_score() {
        // success=false with a score that would also fail the threshold:
        // the deeper cause wins.
        let resp = V3Response {
            score: 0.0,
            action: String::new(),
            response: V2Response {
                success: false,
                error_codes: vec!["invalid-input-response".into()],
                ..Default::default()
            },
        };

        let err = ScorePolicy::new().evaluate(&resp).unwrap_err();
        match err {
            VerifyError::NoSuccess(inner) => {
                assert_eq!(inner.error_codes, vec!["invalid-input-response"]);
            }
            other => panic!("want NoSuccess, got {other:?}"),
        }
    }

    #[test]
    fn test_default_policy_rejects_zero_score() {
        let err = ScorePolicy::new().evaluate(&solved(0.0, "")).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::LowScore { score, min_score }
                if score == 0.0 && min_score == DEFAULT_MIN_SCORE
        ));
    }

    #[test]
    fn test_zero_threshold_accepts_zero_score() {
        ScorePolicy::new()
            .min_score(0.0)
            .evaluate(&solved(0.0, ""))
            .unwrap();
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = ScorePolicy::new().min_score(0.7);
        policy.evaluate(&solved(0.7, "")).unwrap();

        let err = policy.evaluate(&solved(0.69, "")).unwrap_err();
        assert!(matches!(err, VerifyError::LowScore { .. }));
    }

    #[test]
    fn test_action_mismatch() {
        let err = ScorePolicy::new()
            .min_score(0.0)
            .action("register")
            .evaluate(&solved(0.9, "submit"))
            .unwrap_err();

        assert!(matches!(
            err,
            VerifyError::WrongAction { want, got } if want == "register" && got == "submit"
        ));
    }

    #[test]
    fn test_action_match_is_case_sensitive() {
        let err = ScorePolicy::new()
            .min_score(0.0)
            .action("register")
            .evaluate(&solved(0.9, "Register"))
            .unwrap_err();

        assert!(matches!(err, VerifyError::WrongAction { .. }));
    }

    #[test]
    fn test_empty_action_means_no_constraint() {
        ScorePolicy::new()
            .min_score(0.0)
            .evaluate(&solved(0.1, "whatever"))
            .unwrap();
    }

    #[test]
    fn test_later_override_wins() {
        let policy = ScorePolicy::new().min_score(0.9).min_score(0.0);
        policy.evaluate(&solved(0.0, "")).unwrap();
    }

    #[test]
    fn test_accepts_matching_action_and_score() {
        ScorePolicy::new()
            .min_score(0.5)
            .action("login")
            .evaluate(&solved(0.8, "login"))
            .unwrap();
    }

    #[test]
    fn test_score_checked_before_action() {
        let err = ScorePolicy::new()
            .min_score(0.5)
            .action("register")
            .evaluate(&solved(0.2, "submit"))
            .unwrap_err();

        assert!(matches!(err, VerifyError::LowScore { .. }));
    }
}
