//! Canned crude oil headlines for demos and smoke tests.

/// Demo headlines, roughly one per market mood.
pub const SAMPLE_HEADLINES: &[&str] = &[
    "OPEC cuts production again despite global surplus concerns",
    "Oil prices surge as geopolitical tensions escalate in Middle East",
    "Crude futures plummet amid recession fears and demand destruction",
    "Energy analysts report steady growth in shale oil production",
    "Breaking: Major pipeline explosion sends oil markets into chaos",
];

/// How many samples `get_sample_analysis` runs.
pub const SAMPLE_ANALYSIS_COUNT: usize = 3;

pub fn sample_headlines() -> Vec<String> {
    SAMPLE_HEADLINES.iter().map(|h| h.to_string()).collect()
}

/// Headlines for one CLI invocation.
///
/// Words given on the command line form a single headline; with none, the
/// samples run instead.
pub fn headlines_from_words(words: &[String]) -> Vec<String> {
    if words.is_empty() {
        sample_headlines()
    } else {
        vec![words.join(" ")]
    }
}
