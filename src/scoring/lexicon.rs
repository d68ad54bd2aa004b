//! Keyword tables for the headline scorers.
//!
//! Matching is substring containment over the lowercased headline, so
//! `"crash"` also matches `"crashes"` and `"up"` matches `"upbeat"`.

/// Bullish terms.
pub const POSITIVE: &[&str] = &[
    "surge",
    "bull",
    "rise",
    "gain",
    "up",
    "increase",
    "boost",
    "optimistic",
    "strong",
    "rally",
    "breakthrough",
];

/// Bearish terms.
pub const NEGATIVE: &[&str] = &[
    "crash",
    "bear",
    "fall",
    "drop",
    "down",
    "decline",
    "plunge",
    "crisis",
    "panic",
    "weak",
    "collapse",
    "disaster",
    "cut",
];

/// Measured, report-style language.
pub const PROFESSIONAL: &[&str] = &[
    "reports",
    "announces",
    "states",
    "according",
    "official",
    "data",
    "statistics",
    "analysis",
    "forecast",
    "projection",
];

/// Crisis and hostility language.
pub const AGGRESSIVE: &[&str] = &[
    "slams",
    "blasts",
    "crashes",
    "plummets",
    "devastates",
    "destroys",
    "annihilates",
    "obliterates",
    "disaster",
    "chaos",
];

/// Contrastive, insinuating language.
pub const PASSIVE_AGGRESSIVE: &[&str] = &[
    "despite",
    "however",
    "surprisingly",
    "unexpectedly",
    "ironically",
    "curiously",
    "interesting",
    "convenient",
    "timely",
    "coincidentally",
];

/// Secondary heuristic when no tone keyword matched: falling prices.
pub const DECLINE: &[&str] = &["cut", "drop", "fall", "decline"];

/// Secondary heuristic when no tone keyword matched: spiking prices.
pub const SURGE: &[&str] = &["surge", "soar", "rocket", "explode"];

/// Number of distinct keywords from `keywords` contained in `text`.
///
/// `text` must already be lowercased.
pub fn count_matches(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Whether any keyword from `keywords` is contained in `text`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_keywords_by_containment() {
        let text = "oil market crashes and devastates investors";
        assert_eq!(count_matches(text, AGGRESSIVE), 2);
        assert_eq!(count_matches(text, NEGATIVE), 1);
        assert_eq!(count_matches(text, POSITIVE), 0);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        assert_eq!(count_matches("rally rally rally", POSITIVE), 1);
    }

    #[test]
    fn tone_tables_are_disjoint() {
        for word in PROFESSIONAL {
            assert!(!AGGRESSIVE.contains(word));
            assert!(!PASSIVE_AGGRESSIVE.contains(word));
        }
        for word in AGGRESSIVE {
            assert!(!PASSIVE_AGGRESSIVE.contains(word));
        }
    }
}
