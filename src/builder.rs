//! Host-side construction of a [`Pipeline`].

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::decision::{DecisionMaker, ReasoningStrategy};
use crate::pipeline::Pipeline;
use crate::providers::{
    AnthropicClient, AnthropicConfig, ReasoningClient, RetryConfig, RetryingReasoningClient,
};
use crate::scoring::{JitterSource, SeededJitter, SentimentScorer, ToneScorer};
use crate::Result;

/// Main entry point for creating pipelines.
pub struct CrudeOrRude;

impl CrudeOrRude {
    /// Create a new builder for configuring the pipeline.
    pub fn builder() -> CrudeOrRudeBuilder {
        CrudeOrRudeBuilder::new()
    }
}

/// Builder for configuring pipeline instances.
///
/// Without an Anthropic key or a custom reasoning client the pipeline
/// decides with the rule-based strategy only.
pub struct CrudeOrRudeBuilder {
    anthropic_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    retry: Option<RetryConfig>,
    reasoning_client: Option<Arc<dyn ReasoningClient>>,
    jitter: Option<Arc<dyn JitterSource>>,
}

impl CrudeOrRudeBuilder {
    pub fn new() -> Self {
        Self {
            anthropic_key: None,
            base_url: None,
            model: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
            retry: None,
            reasoning_client: None,
            jitter: None,
        }
    }

    /// Use Claude as the reasoning collaborator.
    pub fn anthropic(mut self, api_key: impl Into<String>) -> Self {
        self.anthropic_key = Some(api_key.into());
        self
    }

    /// Override the Anthropic API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request timeout for the collaborator (seconds).
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Retry transient collaborator failures.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Custom reasoning collaborator. Takes precedence over `anthropic`.
    pub fn reasoning_client(mut self, client: Arc<dyn ReasoningClient>) -> Self {
        self.reasoning_client = Some(client);
        self
    }

    /// Randomness for the tone scorer.
    pub fn jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// Seeded tone jitter for reproducible runs.
    pub fn seed(self, seed: u64) -> Self {
        self.jitter(Arc::new(SeededJitter::new(seed)))
    }

    /// Whether a reasoning collaborator will be wired in.
    pub fn has_reasoning(&self) -> bool {
        self.reasoning_client.is_some() || self.anthropic_key.is_some()
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let tone = match self.jitter {
            Some(jitter) => ToneScorer::new(jitter),
            None => ToneScorer::default(),
        };

        let client: Option<Arc<dyn ReasoningClient>> = match (self.reasoning_client, self.anthropic_key) {
            (Some(client), _) => Some(client),
            (None, Some(key)) => {
                let mut config = AnthropicConfig::new(key);
                if let Some(url) = self.base_url {
                    config = config.base_url(url);
                }
                if let Some(model) = self.model {
                    config = config.model(model);
                }
                if let Some(temperature) = self.temperature {
                    config = config.temperature(temperature);
                }
                if let Some(max_tokens) = self.max_tokens {
                    config = config.max_tokens(max_tokens);
                }
                if let Some(secs) = self.timeout_secs {
                    config = config.timeout(Duration::from_secs(secs));
                }
                Some(Arc::new(AnthropicClient::new(config)?))
            }
            (None, None) => None,
        };

        let decision = match client {
            Some(client) => {
                let client: Arc<dyn ReasoningClient> = match self.retry {
                    Some(retry) => Arc::new(RetryingReasoningClient::new(client, retry)),
                    None => client,
                };
                info!(client = client.name(), "reasoning collaborator enabled");
                DecisionMaker::with_primary(Arc::new(ReasoningStrategy::new(client)))
            }
            None => {
                info!("no reasoning collaborator configured, using rule-based decisions");
                DecisionMaker::rule_based()
            }
        };

        Ok(Pipeline::new(SentimentScorer::new(), tone, decision))
    }
}

impl Default for CrudeOrRudeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
