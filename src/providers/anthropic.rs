//! Anthropic Messages API client used as the reasoning collaborator.
//!
//! See: <https://docs.anthropic.com/en/api/messages>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::traits::{ReasoningClient, ReasoningRequest};
use crate::types::DecisionResult;
use crate::{CrudeOrRudeError, Result};

/// Default base URL for the Anthropic API
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Default model for market-mood decisions
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
const API_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are a witty financial market analyst who specializes in crude oil markets. \
Your job is to analyze news headlines and classify the market sentiment into one of three categories:\n\
1. \"Professional\" - Normal, measured market reporting\n\
2. \"PanicStricken\" - Markets are in chaos, fear-driven reactions\n\
3. \"PassiveAggressive\" - Markets are being manipulative or sending mixed signals\n\n\
Based on the sentiment analysis and tone analysis provided, make your classification and provide:\n\
1. A brief reasoning for your choice that cites the scores\n\
2. A witty, entertaining one-line response about what the market is doing \
(like \"This market is gaslighting you\")\n\n\
Reply with a single JSON object and nothing else: \
{\"category\": \"...\", \"reasoning\": \"...\", \"response\": \"...\"}";

/// Connection settings for [`AnthropicClient`].
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reasoning collaborator backed by Claude.
///
/// Holds one pooled HTTP client for its whole lifetime; dropping the client
/// releases the connections.
#[derive(Clone)]
pub struct AnthropicClient {
    config: AnthropicConfig,
    http: Client,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CrudeOrRudeError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { config, http })
    }

    /// Client with default settings against a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::new(AnthropicConfig::new(api_key).base_url(base_url))
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send the decision prompt and parse the structured answer.
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    pub async fn decide(&self, request: &ReasoningRequest<'_>) -> Result<DecisionResult> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let prompt = user_prompt(request);

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model: &self.config.model,
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                system: SYSTEM_PROMPT,
                messages: vec![RequestMessage {
                    role: "user",
                    content: &prompt,
                }],
            })
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: MessagesResponse = response.json().await?;

        let text: String = body
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        debug!(chars = text.len(), "reasoning reply received");

        parse_decision(&text)
    }
}

#[async_trait]
impl ReasoningClient for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn reason(&self, request: &ReasoningRequest<'_>) -> Result<DecisionResult> {
        AnthropicClient::decide(self, request).await
    }
}

/// Render the per-headline prompt with all numeric inputs.
pub fn user_prompt(request: &ReasoningRequest<'_>) -> String {
    let s = request.sentiment;
    let t = request.tone;
    format!(
        "Analyze this crude oil news headline: \"{}\"\n\n\
         Sentiment Analysis Results:\n\
         - Sentiment Score: {:.2} (range: -1.0 to 1.0)\n\
         - Sentiment Label: {}\n\
         - Confidence: {:.2}\n\n\
         Rudeness/Tone Analysis Results:\n\
         - Rudeness Score: {:.2} (range: 0.0 to 1.0)\n\
         - Tone: {}\n\
         - Confidence: {:.2}\n",
        request.headline, s.score, s.label, s.confidence, t.rudeness, t.tone, t.confidence
    )
}

/// Extract the JSON decision object from model text.
///
/// Tolerates prose or code fences around the object.
pub fn parse_decision(text: &str) -> Result<DecisionResult> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CrudeOrRudeError::EmptyResponse);
    }
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(CrudeOrRudeError::MalformedResponse(
            "no JSON object in reply".to_string(),
        ));
    };
    if end < start {
        return Err(CrudeOrRudeError::MalformedResponse(
            "no JSON object in reply".to_string(),
        ));
    }

    let decision: DecisionResult = serde_json::from_str(&text[start..=end])
        .map_err(|e| CrudeOrRudeError::MalformedResponse(e.to_string()))?;

    if decision.reasoning.trim().is_empty() || decision.response.trim().is_empty() {
        return Err(CrudeOrRudeError::MalformedResponse(
            "empty reasoning or response".to_string(),
        ));
    }
    Ok(decision)
}

/// Map non-success statuses to errors.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        401 | 403 => Err(CrudeOrRudeError::AuthenticationFailed),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(CrudeOrRudeError::RateLimited { retry_after })
        }
        code => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Anthropic API error: {status}"));
            Err(CrudeOrRudeError::Api {
                status: code,
                message,
            })
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}
