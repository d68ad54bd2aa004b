//! Assembled analysis output and the serialized shapes callers receive.

use serde::{Deserialize, Serialize};

use super::{DecisionResult, SentimentResult, ToneResult};

/// Complete, immutable result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub headline: String,
    pub sentiment: SentimentResult,
    #[serde(rename = "rudeness")]
    pub tone: ToneResult,
    #[serde(rename = "market_sentiment")]
    pub decision: DecisionResult,
}

/// Error payload returned in place of a result; carries the headline for
/// caller correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    pub headline: String,
}

/// Either a full result or an error payload, never partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    Failure(ErrorReport),
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn headline(&self) -> &str {
        match self {
            AnalysisOutcome::Success(result) => &result.headline,
            AnalysisOutcome::Failure(report) => &report.headline,
        }
    }
}

/// Batch response: one slot per analysed headline, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<AnalysisOutcome>,
    pub total_analyzed: usize,
}

impl From<Vec<AnalysisOutcome>> for BatchReport {
    fn from(results: Vec<AnalysisOutcome>) -> Self {
        Self {
            total_analyzed: results.len(),
            results,
        }
    }
}
