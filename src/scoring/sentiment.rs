//! Keyword-weighted polarity scorer.

use crate::types::{SentimentLabel, SentimentResult};

use super::lexicon;

/// Score ceiling (and negated floor) for keyword polarity.
const MAX_SCORE: f64 = 0.9;
const BASE_SCORE: f64 = 0.3;
const PER_KEYWORD: f64 = 0.15;
const BASE_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;

/// Polarity scorer over static keyword tables.
///
/// Pure and infallible: the same text always yields the same result.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    positive: &'static [&'static str],
    negative: &'static [&'static str],
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// Scorer over the built-in crude oil lexicon.
    pub fn new() -> Self {
        Self::with_keywords(lexicon::POSITIVE, lexicon::NEGATIVE)
    }

    /// Scorer over custom keyword tables (lowercase terms).
    pub fn with_keywords(
        positive: &'static [&'static str],
        negative: &'static [&'static str],
    ) -> Self {
        Self { positive, negative }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        let normalized = text.to_lowercase();
        let p = lexicon::count_matches(&normalized, self.positive);
        let n = lexicon::count_matches(&normalized, self.negative);

        let score = if p > n {
            (BASE_SCORE + PER_KEYWORD * p as f64).min(MAX_SCORE)
        } else if n > p {
            (-BASE_SCORE - PER_KEYWORD * n as f64).max(-MAX_SCORE)
        } else {
            0.0
        };

        let words = text.split_whitespace().count().max(1);
        let density = (p + n) as f64 / words as f64;
        let confidence = (BASE_CONFIDENCE + 0.3 * density).min(MAX_CONFIDENCE);

        SentimentResult {
            score,
            label: SentimentLabel::from_score(score),
            confidence,
        }
    }
}
