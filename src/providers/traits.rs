//! Reasoning collaborator trait.
//!
//! A reasoning client turns the sentiment and tone summaries of a headline
//! into a structured market-mood decision. Implementations talk to an
//! external text-generation service and may fail for any transport,
//! authentication or parsing reason; the decision layer treats every such
//! failure as "reasoning unavailable" and falls back to the rule-based
//! strategy.
//!
//! # Example
//!
//! ```ignore
//! #[async_trait]
//! impl ReasoningClient for CannedClient {
//!     fn name(&self) -> &str { "canned" }
//!
//!     async fn reason(&self, request: &ReasoningRequest<'_>) -> Result<DecisionResult> {
//!         Ok(self.answer.clone())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::types::{DecisionResult, SentimentResult, ToneResult};

/// Structured context handed to the collaborator.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningRequest<'a> {
    pub headline: &'a str,
    pub sentiment: &'a SentimentResult,
    pub tone: &'a ToneResult,
}

impl<'a> ReasoningRequest<'a> {
    pub fn new(headline: &'a str, sentiment: &'a SentimentResult, tone: &'a ToneResult) -> Self {
        Self {
            headline,
            sentiment,
            tone,
        }
    }
}

/// External text-generation collaborator producing `{category, reasoning, response}`.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Client name for logging/metrics.
    fn name(&self) -> &str;

    /// Ask the collaborator for a decision.
    async fn reason(&self, request: &ReasoningRequest<'_>) -> Result<DecisionResult>;
}
