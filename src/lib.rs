//! Crude or Rude - crude oil headline mood analyzer
//!
//! Every headline runs through three stages in order:
//!
//! 1. **Sentiment**: keyword polarity in `[-0.9, 0.9]` with a label
//! 2. **Tone**: how rude the headline sounds, in `[0, 1]`
//! 3. **Decision**: `Professional`, `PanicStricken` or `PassiveAggressive`,
//!    with a reasoning string and a one-line quip
//!
//! The decision comes from a reasoning collaborator (Claude) when one is
//! configured. When it is absent or fails, deterministic rules decide.
//!
//! # Rule-based Example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> crude_or_rude::Result<()> {
//!     let result = crude_or_rude::analyze(
//!         "Oil market crashes and devastates investors",
//!         Some("Reuters"),
//!     )
//!     .await?;
//!
//!     println!("{} ({})", result.decision.category, result.decision.response);
//!     Ok(())
//! }
//! ```
//!
//! # Reasoning Example
//!
//! ```rust,no_run
//! use crude_or_rude::{CrudeOrRude, RetryConfig};
//!
//! #[tokio::main]
//! async fn main() -> crude_or_rude::Result<()> {
//!     let pipeline = CrudeOrRude::builder()
//!         .anthropic("sk-ant-your-key")
//!         .retry(RetryConfig::new().max_attempts(3))
//!         .build()?;
//!
//!     let result = pipeline
//!         .run("OPEC cuts production again despite global surplus concerns", None)
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

pub mod builder;
#[cfg(any(feature = "server", feature = "cli"))]
pub mod config;
pub mod decision;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod samples;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod telemetry;
pub mod types;

/// Crate version.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types at crate root
pub use builder::{CrudeOrRude, CrudeOrRudeBuilder};
pub use decision::{DecisionMaker, DecisionStrategy, ReasoningStrategy, RuleBasedStrategy};
pub use error::{CrudeOrRudeError, Result};
pub use pipeline::{AnalysisState, Phase, Pipeline, StageUpdate};
pub use providers::{
    AnthropicClient, AnthropicConfig, ReasoningClient, ReasoningRequest, RetryConfig,
    RetryingReasoningClient,
};
pub use samples::SAMPLE_HEADLINES;
pub use scoring::{
    FixedJitter, JitterSource, SeededJitter, SentimentScorer, ThreadRngJitter, ToneScorer,
};
pub use service::AnalysisService;

// Re-export all types
pub use types::{
    AnalysisOutcome, AnalysisResult, BatchReport, DecisionResult, ErrorReport, MarketCategory,
    SentimentLabel, SentimentResult, Tone, ToneResult,
};

/// Analyse one headline with the rule-based pipeline.
///
/// Builds a fresh pipeline per call; hosts serving many requests should
/// build one [`Pipeline`] and share it.
pub async fn analyze(headline: &str, source: Option<&str>) -> Result<AnalysisResult> {
    Pipeline::rule_based().run(headline, source).await
}
