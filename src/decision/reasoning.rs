//! Decision strategy backed by an external reasoning collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::DecisionStrategy;
use crate::providers::{ReasoningClient, ReasoningRequest};
use crate::types::{DecisionResult, SentimentResult, ToneResult};
use crate::{CrudeOrRudeError, Result};

/// Delegates the decision to a [`ReasoningClient`].
///
/// Every client failure, whatever its cause, is reported as
/// [`CrudeOrRudeError::ReasoningUnavailable`].
pub struct ReasoningStrategy {
    client: Arc<dyn ReasoningClient>,
}

impl ReasoningStrategy {
    pub fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self { client }
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }
}

#[async_trait]
impl DecisionStrategy for ReasoningStrategy {
    fn name(&self) -> &str {
        "reasoning"
    }

    async fn decide(
        &self,
        headline: &str,
        sentiment: &SentimentResult,
        tone: &ToneResult,
    ) -> Result<DecisionResult> {
        let request = ReasoningRequest::new(headline, sentiment, tone);
        match self.client.reason(&request).await {
            Ok(decision) => {
                debug!(client = self.client.name(), category = %decision.category, "reasoning decision");
                Ok(decision)
            }
            Err(e) => Err(CrudeOrRudeError::ReasoningUnavailable(format!(
                "{}: {e}",
                self.client.name()
            ))),
        }
    }
}
