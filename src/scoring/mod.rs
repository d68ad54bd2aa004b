//! Headline scorers.
//!
//! - [`SentimentScorer`]: deterministic polarity from keyword counts
//! - [`ToneScorer`]: keyword counts plus bounded jitter from a [`JitterSource`]

pub mod jitter;
pub mod lexicon;
mod sentiment;
mod tone;

pub use jitter::{FixedJitter, JitterSource, SeededJitter, ThreadRngJitter};
pub use sentiment::SentimentScorer;
pub use tone::{ToneCounts, ToneScorer};
