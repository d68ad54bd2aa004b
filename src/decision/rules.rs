//! Deterministic rule-based decision strategy.
//!
//! Always available; used directly when no reasoning collaborator is
//! configured and as the fallback when the collaborator fails.

use async_trait::async_trait;

use super::DecisionStrategy;
use crate::Result;
use crate::types::{DecisionResult, MarketCategory, SentimentResult, Tone, ToneResult};

const PANIC_RUDENESS: f64 = 0.7;
const MIXED_RUDENESS: f64 = 0.4;
const MIXED_SENTIMENT: f64 = 0.3;

const PANIC_RESPONSE: &str = "This market is having a complete meltdown!";
const MIXED_RESPONSE: &str = "This market is gaslighting you with mixed signals.";
const CALM_RESPONSE: &str = "The market is being surprisingly reasonable today.";

/// Threshold rules over tone and sentiment. Branch order matters: the
/// aggressive check runs first.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedStrategy;

impl RuleBasedStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Pure classification; identical inputs give identical output.
    pub fn evaluate(sentiment: &SentimentResult, tone: &ToneResult) -> DecisionResult {
        if tone.tone == Tone::Aggressive || tone.rudeness > PANIC_RUDENESS {
            DecisionResult {
                category: MarketCategory::PanicStricken,
                reasoning: format!(
                    "High rudeness score ({:.2}) and {} tone indicate market panic",
                    tone.rudeness, tone.tone
                ),
                response: PANIC_RESPONSE.to_string(),
            }
        } else if tone.tone == Tone::PassiveAggressive
            || (tone.rudeness > MIXED_RUDENESS && sentiment.score.abs() < MIXED_SENTIMENT)
        {
            DecisionResult {
                category: MarketCategory::PassiveAggressive,
                reasoning: format!(
                    "Passive-aggressive tone with mixed signals (sentiment: {:.2}, rudeness: {:.2})",
                    sentiment.score, tone.rudeness
                ),
                response: MIXED_RESPONSE.to_string(),
            }
        } else {
            DecisionResult {
                category: MarketCategory::Professional,
                reasoning: format!(
                    "Low rudeness score ({:.2}) and {} tone",
                    tone.rudeness, tone.tone
                ),
                response: CALM_RESPONSE.to_string(),
            }
        }
    }
}

#[async_trait]
impl DecisionStrategy for RuleBasedStrategy {
    fn name(&self) -> &str {
        "rules"
    }

    async fn decide(
        &self,
        _headline: &str,
        sentiment: &SentimentResult,
        tone: &ToneResult,
    ) -> Result<DecisionResult> {
        Ok(Self::evaluate(sentiment, tone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn sentiment(score: f64) -> SentimentResult {
        SentimentResult {
            score,
            label: SentimentLabel::from_score(score),
            confidence: 0.7,
        }
    }

    fn tone(tone: Tone, rudeness: f64) -> ToneResult {
        ToneResult {
            rudeness,
            tone,
            confidence: 0.8,
        }
    }

    #[test]
    fn aggressive_tone_is_panic() {
        let d = RuleBasedStrategy::evaluate(&sentiment(-0.45), &tone(Tone::Aggressive, 0.65));
        assert_eq!(d.category, MarketCategory::PanicStricken);
        assert!(d.reasoning.contains("0.65"));
        assert!(d.reasoning.contains("aggressive"));
        assert_eq!(d.response, PANIC_RESPONSE);
    }

    #[test]
    fn high_rudeness_is_panic_regardless_of_tone() {
        let d = RuleBasedStrategy::evaluate(&sentiment(0.0), &tone(Tone::PassiveAggressive, 0.75));
        assert_eq!(d.category, MarketCategory::PanicStricken);
    }

    #[test]
    fn rudeness_exactly_at_threshold_is_not_panic() {
        let d = RuleBasedStrategy::evaluate(&sentiment(0.6), &tone(Tone::Professional, 0.7));
        assert_eq!(d.category, MarketCategory::Professional);
    }

    #[test]
    fn passive_aggressive_tone_is_mixed() {
        let d = RuleBasedStrategy::evaluate(&sentiment(0.6), &tone(Tone::PassiveAggressive, 0.45));
        assert_eq!(d.category, MarketCategory::PassiveAggressive);
        assert!(d.reasoning.contains("0.60"));
        assert_eq!(d.response, MIXED_RESPONSE);
    }

    #[test]
    fn moderate_rudeness_with_weak_sentiment_is_mixed() {
        let d = RuleBasedStrategy::evaluate(&sentiment(0.0), &tone(Tone::Professional, 0.5));
        assert_eq!(d.category, MarketCategory::PassiveAggressive);
    }

    #[test]
    fn moderate_rudeness_with_strong_sentiment_is_professional() {
        let d = RuleBasedStrategy::evaluate(&sentiment(-0.45), &tone(Tone::Professional, 0.5));
        assert_eq!(d.category, MarketCategory::Professional);
    }

    #[test]
    fn calm_headline_is_professional() {
        let d = RuleBasedStrategy::evaluate(&sentiment(0.0), &tone(Tone::Professional, 0.25));
        assert_eq!(d.category, MarketCategory::Professional);
        assert!(d.reasoning.contains("0.25"));
        assert_eq!(d.response, CALM_RESPONSE);
    }

    #[test]
    fn evaluation_is_pure() {
        let s = sentiment(0.45);
        let t = tone(Tone::PassiveAggressive, 0.55);
        assert_eq!(
            RuleBasedStrategy::evaluate(&s, &t),
            RuleBasedStrategy::evaluate(&s, &t)
        );
    }

    #[tokio::test]
    async fn strategy_never_fails() {
        let d = RuleBasedStrategy
            .decide("anything", &sentiment(0.0), &tone(Tone::Professional, 0.1))
            .await
            .unwrap();
        assert_eq!(d.category, MarketCategory::Professional);
    }
}
