//! Keyword-weighted, jittered tone classifier.
//!
//! Every call draws fresh jitter for both rudeness and confidence, so two
//! calls over the same text generally differ. Bounds are fixed:
//! rudeness stays in `[0.0, 1.0]`, confidence in `[0.6, 0.95]`.

use std::sync::Arc;

use crate::types::{Tone, ToneResult};

use super::jitter::{JitterSource, ThreadRngJitter};
use super::lexicon;

const MAX_CONFIDENCE: f64 = 0.95;

/// Keyword counts per tone family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToneCounts {
    pub professional: usize,
    pub aggressive: usize,
    pub passive_aggressive: usize,
}

impl ToneCounts {
    pub fn total(&self) -> usize {
        self.professional + self.aggressive + self.passive_aggressive
    }

    /// Dominant tone when at least one keyword matched.
    ///
    /// Aggressive needs a strict lead over both other families;
    /// passive-aggressive needs a strict lead over professional. All
    /// remaining ties resolve to professional.
    pub fn dominant(&self) -> Tone {
        if self.aggressive > self.professional.max(self.passive_aggressive) {
            Tone::Aggressive
        } else if self.passive_aggressive > self.professional {
            Tone::PassiveAggressive
        } else {
            Tone::Professional
        }
    }
}

/// Tone scorer with an injected jitter source.
#[derive(Clone)]
pub struct ToneScorer {
    jitter: Arc<dyn JitterSource>,
}

impl std::fmt::Debug for ToneScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneScorer").finish_non_exhaustive()
    }
}

impl Default for ToneScorer {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngJitter))
    }
}

impl ToneScorer {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    /// Count tone keywords in already-lowercased text.
    pub fn count(normalized: &str) -> ToneCounts {
        ToneCounts {
            professional: lexicon::count_matches(normalized, lexicon::PROFESSIONAL),
            aggressive: lexicon::count_matches(normalized, lexicon::AGGRESSIVE),
            passive_aggressive: lexicon::count_matches(normalized, lexicon::PASSIVE_AGGRESSIVE),
        }
    }

    pub fn score(&self, text: &str) -> ToneResult {
        let normalized = text.to_lowercase();
        let counts = Self::count(&normalized);
        let total = counts.total();

        let (tone, rudeness) = if total == 0 {
            self.heuristic(&normalized)
        } else {
            let tone = counts.dominant();
            let rudeness = match tone {
                Tone::Aggressive => {
                    0.7 + 0.1 * counts.aggressive as f64 + self.jitter.sample(0.2)
                }
                Tone::PassiveAggressive => {
                    0.5 + 0.1 * counts.passive_aggressive as f64 + self.jitter.sample(0.2)
                }
                Tone::Professional => {
                    0.1 + 0.05 * counts.professional as f64 + self.jitter.sample(0.1)
                }
            };
            (tone, rudeness)
        };

        let confidence = (0.6 + 0.1 * total as f64 + self.jitter.sample(0.1)).min(MAX_CONFIDENCE);

        ToneResult {
            rudeness: rudeness.clamp(0.0, 1.0),
            tone,
            confidence,
        }
    }

    /// Fallback when no tone keyword matched: infer from price direction.
    fn heuristic(&self, normalized: &str) -> (Tone, f64) {
        if lexicon::contains_any(normalized, lexicon::DECLINE) {
            (Tone::PassiveAggressive, 0.4 + self.jitter.sample(0.2))
        } else if lexicon::contains_any(normalized, lexicon::SURGE) {
            (Tone::Aggressive, 0.6 + self.jitter.sample(0.3))
        } else {
            (Tone::Professional, 0.1 + self.jitter.sample(0.2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::jitter::{FixedJitter, SeededJitter};
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn scorer(jitter: FixedJitter) -> ToneScorer {
        ToneScorer::new(Arc::new(jitter))
    }

    #[test]
    fn professional_tone() {
        let text = "Official reports indicate oil production data";
        for jitter in [FixedJitter::min(), FixedJitter::max()] {
            let result = scorer(jitter).score(text);
            assert_eq!(result.tone, Tone::Professional);
            assert!(result.rudeness < 0.5);
        }
        let low = scorer(FixedJitter::min()).score(text);
        // 0.1 + 0.05 * 3
        assert!(approx(low.rudeness, 0.25));
        // 0.6 + 0.1 * 3
        assert!(approx(low.confidence, 0.9));
        let high = scorer(FixedJitter::max()).score(text);
        assert!(approx(high.rudeness, 0.35));
        assert!(approx(high.confidence, 0.95));
    }

    #[test]
    fn aggressive_tone() {
        let result = scorer(FixedJitter::min()).score("Oil market crashes and devastates investors");
        assert_eq!(result.tone, Tone::Aggressive);
        assert!(approx(result.rudeness, 0.9));
        let capped = scorer(FixedJitter::max()).score("Oil market crashes and devastates investors");
        assert_eq!(capped.rudeness, 1.0);
    }

    #[test]
    fn passive_aggressive_tone() {
        let result = scorer(FixedJitter::min()).score("Oil cuts despite surplus - how convenient");
        assert_eq!(result.tone, Tone::PassiveAggressive);
        // 0.5 + 0.1 * 2
        assert!(approx(result.rudeness, 0.7));
    }

    #[test]
    fn heuristic_decline_words() {
        let result = scorer(FixedJitter::min()).score("OPEC cuts output");
        assert_eq!(result.tone, Tone::PassiveAggressive);
        assert!(approx(result.rudeness, 0.4));
        assert!(approx(result.confidence, 0.6));
        let high = scorer(FixedJitter::max()).score("OPEC cuts output");
        assert!(approx(high.rudeness, 0.6));
        assert!(approx(high.confidence, 0.7));
    }

    #[test]
    fn heuristic_surge_words() {
        let result = scorer(FixedJitter::max()).score("Prices soar overnight");
        assert_eq!(result.tone, Tone::Aggressive);
        assert!(approx(result.rudeness, 0.9));
    }

    #[test]
    fn heuristic_decline_checked_before_surge() {
        let result = scorer(FixedJitter::min()).score("Prices soar then drop");
        assert_eq!(result.tone, Tone::PassiveAggressive);
    }

    #[test]
    fn heuristic_default_professional() {
        let result = scorer(FixedJitter::min()).score("Tanker docks in Rotterdam");
        assert_eq!(result.tone, Tone::Professional);
        assert!(approx(result.rudeness, 0.1));
    }

    #[test]
    fn dominant_tie_breaks() {
        let counts = |professional, aggressive, passive_aggressive| ToneCounts {
            professional,
            aggressive,
            passive_aggressive,
        };
        assert_eq!(counts(1, 2, 1).dominant(), Tone::Aggressive);
        // aggressive must lead strictly
        assert_eq!(counts(2, 2, 0).dominant(), Tone::Professional);
        assert_eq!(counts(0, 1, 1).dominant(), Tone::PassiveAggressive);
        // passive-aggressive must lead professional strictly
        assert_eq!(counts(1, 0, 1).dominant(), Tone::Professional);
        assert_eq!(counts(1, 1, 1).dominant(), Tone::Professional);
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = ToneScorer::new(Arc::new(SeededJitter::new(7)));
        let b = ToneScorer::new(Arc::new(SeededJitter::new(7)));
        let text = "Crude futures plummet amid recession fears";
        assert_eq!(a.score(text), b.score(text));
    }

    proptest! {
        #[test]
        fn bounds_hold_under_randomization(text in "[a-zA-Z ,.-]{0,120}") {
            let scorer = ToneScorer::default();
            for _ in 0..5 {
                let result = scorer.score(&text);
                prop_assert!((0.0..=1.0).contains(&result.rudeness));
                prop_assert!((0.0..=0.95).contains(&result.confidence));
            }
        }

        #[test]
        fn bounds_hold_with_many_keywords(
            words in proptest::collection::vec(
                proptest::sample::select(vec![
                    "slams", "chaos", "despite", "however", "reports", "data", "surge", "cut",
                ]),
                0..12,
            )
        ) {
            let text = words.join(" ");
            for jitter in [FixedJitter::min(), FixedJitter::max()] {
                let result = scorer(jitter).score(&text);
                prop_assert!((0.0..=1.0).contains(&result.rudeness));
                prop_assert!((0.6..=0.95).contains(&result.confidence));
            }
        }
    }
}
