//! Final market-mood decision.
//!
//! A [`DecisionMaker`] holds an optional primary strategy (normally the
//! reasoning-backed one) and an always-available fallback (normally the
//! rule-based one). Both satisfy the same [`DecisionStrategy`] contract.
//!
//! # Fallback Semantics
//!
//! ```text
//!   DecisionMaker::decide
//!          │
//!          ▼
//!   ┌──────────────────┐  Ok ──────────────────────────► decision
//!   │ primary strategy │
//!   └────────┬─────────┘  ReasoningUnavailable
//!            ▼
//!   ┌──────────────────┐  Ok ──────────────────────────► decision
//!   │ fallback strategy│
//!   └──────────────────┘  Err ─────────────────────────► error
//! ```
//!
//! Only `ReasoningUnavailable` triggers the fallback. Any other primary
//! error is returned as is.

mod reasoning;
mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::telemetry;
use crate::types::{DecisionResult, SentimentResult, ToneResult};
use crate::{CrudeOrRudeError, Result};

pub use reasoning::ReasoningStrategy;
pub use rules::RuleBasedStrategy;

/// Contract shared by every decision strategy.
#[async_trait]
pub trait DecisionStrategy: Send + Sync {
    /// Strategy name for logging/metrics.
    fn name(&self) -> &str;

    /// Combine sentiment and tone into a category with an explanation.
    ///
    /// Reasoning-backed strategies fail with `ReasoningUnavailable`.
    async fn decide(
        &self,
        headline: &str,
        sentiment: &SentimentResult,
        tone: &ToneResult,
    ) -> Result<DecisionResult>;
}

/// Primary strategy with a fallback.
#[derive(Clone)]
pub struct DecisionMaker {
    primary: Option<Arc<dyn DecisionStrategy>>,
    fallback: Arc<dyn DecisionStrategy>,
}

impl std::fmt::Debug for DecisionMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionMaker")
            .field("primary", &self.primary_name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl Default for DecisionMaker {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl DecisionMaker {
    /// Rule-based decisions only.
    pub fn rule_based() -> Self {
        Self {
            primary: None,
            fallback: Arc::new(RuleBasedStrategy),
        }
    }

    /// Try `primary` first, fall back to the rules.
    pub fn with_primary(primary: Arc<dyn DecisionStrategy>) -> Self {
        Self {
            primary: Some(primary),
            fallback: Arc::new(RuleBasedStrategy),
        }
    }

    /// Fully custom pair.
    pub fn new(
        primary: Option<Arc<dyn DecisionStrategy>>,
        fallback: Arc<dyn DecisionStrategy>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Name of the primary strategy, if one is configured.
    pub fn primary_name(&self) -> Option<&str> {
        self.primary.as_ref().map(|p| p.name())
    }

    pub async fn decide(
        &self,
        headline: &str,
        sentiment: &SentimentResult,
        tone: &ToneResult,
    ) -> Result<DecisionResult> {
        if let Some(primary) = &self.primary {
            match primary.decide(headline, sentiment, tone).await {
                Ok(decision) => {
                    Self::record_decision(primary.name());
                    return Ok(decision);
                }
                Err(CrudeOrRudeError::ReasoningUnavailable(cause)) => {
                    warn!(
                        strategy = primary.name(),
                        fallback = self.fallback.name(),
                        %cause,
                        "primary decision strategy unavailable, falling back"
                    );
                    metrics::counter!(telemetry::REASONING_FALLBACKS_TOTAL,
                        "strategy" => primary.name().to_owned(),
                    )
                    .increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        let decision = self.fallback.decide(headline, sentiment, tone).await?;
        Self::record_decision(self.fallback.name());
        Ok(decision)
    }

    fn record_decision(strategy: &str) {
        metrics::counter!(telemetry::DECISIONS_TOTAL,
            "strategy" => strategy.to_owned(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketCategory, SentimentLabel, Tone};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Scripted {
        result: fn() -> Result<DecisionResult>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(result: fn() -> Result<DecisionResult>) -> Self {
            Self {
                result,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl DecisionStrategy for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn decide(
            &self,
            _headline: &str,
            _sentiment: &SentimentResult,
            _tone: &ToneResult,
        ) -> Result<DecisionResult> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            (self.result)()
        }
    }

    fn inputs() -> (SentimentResult, ToneResult) {
        (
            SentimentResult {
                score: -0.45,
                label: SentimentLabel::Negative,
                confidence: 0.7,
            },
            ToneResult {
                rudeness: 0.9,
                tone: Tone::Aggressive,
                confidence: 0.8,
            },
        )
    }

    #[tokio::test]
    async fn primary_answer_is_used() {
        let primary = Arc::new(Scripted::new(|| {
            Ok(DecisionResult {
                category: MarketCategory::Professional,
                reasoning: "calm".into(),
                response: "fine".into(),
            })
        }));
        let maker = DecisionMaker::with_primary(primary.clone());
        let (s, t) = inputs();
        let d = maker.decide("h", &s, &t).await.unwrap();
        assert_eq!(d.category, MarketCategory::Professional);
        assert_eq!(d.reasoning, "calm");
        assert_eq!(primary.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn unavailable_primary_falls_back_to_rules() {
        let maker = DecisionMaker::with_primary(Arc::new(Scripted::new(|| {
            Err(CrudeOrRudeError::ReasoningUnavailable("offline".into()))
        })));
        let (s, t) = inputs();
        let d = maker.decide("h", &s, &t).await.unwrap();
        assert_eq!(d.category, MarketCategory::PanicStricken);
        assert!(!d.reasoning.is_empty());
    }

    #[tokio::test]
    async fn other_primary_errors_are_not_swallowed() {
        let fallback = Arc::new(Scripted::new(|| Ok(RuleBasedStrategy::evaluate(&inputs().0, &inputs().1))));
        let maker = DecisionMaker::new(
            Some(Arc::new(Scripted::new(|| {
                Err(CrudeOrRudeError::Scoring("bad state".into()))
            }))),
            fallback.clone(),
        );
        let (s, t) = inputs();
        let err = maker.decide("h", &s, &t).await.unwrap_err();
        assert!(matches!(err, CrudeOrRudeError::Scoring(_)));
        assert_eq!(fallback.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn failing_fallback_surfaces_error() {
        let maker = DecisionMaker::new(
            Some(Arc::new(Scripted::new(|| {
                Err(CrudeOrRudeError::ReasoningUnavailable("offline".into()))
            }))),
            Arc::new(Scripted::new(|| {
                Err(CrudeOrRudeError::AnalysisFailed("rules broke".into()))
            })),
        );
        let (s, t) = inputs();
        assert!(maker.decide("h", &s, &t).await.is_err());
    }

    #[tokio::test]
    async fn rule_based_maker_has_no_primary() {
        let maker = DecisionMaker::rule_based();
        assert_eq!(maker.primary_name(), None);
        let (s, t) = inputs();
        let d = maker.decide("h", &s, &t).await.unwrap();
        assert_eq!(d.category, MarketCategory::PanicStricken);
    }
}
