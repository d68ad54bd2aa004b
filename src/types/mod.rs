//! Public types for the Crude or Rude API.

mod analysis;
mod decision;
mod sentiment;
mod tone;

pub use analysis::{AnalysisOutcome, AnalysisResult, BatchReport, ErrorReport};
pub use decision::{DecisionResult, MarketCategory};
pub use sentiment::{SentimentLabel, SentimentResult};
pub use tone::{Tone, ToneResult};
