//! Crude or Rude error types

use std::time::Duration;

/// Crude or Rude error types
#[derive(Debug, thiserror::Error)]
pub enum CrudeOrRudeError {
    // Input errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Pipeline errors
    #[error("scoring error: {0}")]
    Scoring(String),

    /// The reasoning collaborator could not produce a decision.
    /// `DecisionMaker` substitutes the rule-based strategy on this variant.
    #[error("reasoning unavailable: {0}")]
    ReasoningUnavailable(String),

    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    // Collaborator/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CrudeOrRudeError {
    /// Whether a retry of the same collaborator call may succeed.
    ///
    /// Network failures, rate limits and 5xx responses are transient.
    /// Authentication, malformed answers and everything produced by the
    /// pipeline itself are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied retry hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CrudeOrRudeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CrudeOrRudeError::MalformedResponse(err.to_string())
        } else {
            CrudeOrRudeError::Http(err.to_string())
        }
    }
}

/// Result type alias for Crude or Rude operations
pub type Result<T> = std::result::Result<T, CrudeOrRudeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(CrudeOrRudeError::Http("reset".into()).is_transient());
        assert!(CrudeOrRudeError::RateLimited { retry_after: None }.is_transient());
        assert!(
            CrudeOrRudeError::Api {
                status: 503,
                message: "overloaded".into()
            }
            .is_transient()
        );
        assert!(
            !CrudeOrRudeError::Api {
                status: 400,
                message: "bad request".into()
            }
            .is_transient()
        );
        assert!(!CrudeOrRudeError::AuthenticationFailed.is_transient());
        assert!(!CrudeOrRudeError::ReasoningUnavailable("down".into()).is_transient());
    }

    #[test]
    fn retry_after_only_from_rate_limit() {
        let err = CrudeOrRudeError::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
        assert_eq!(CrudeOrRudeError::EmptyResponse.retry_after(), None);
    }

    #[test]
    fn display_includes_cause() {
        let err = CrudeOrRudeError::AnalysisFailed("missing tone".into());
        assert_eq!(err.to_string(), "analysis failed: missing tone");
    }
}
