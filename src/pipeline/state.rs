//! Per-run analysis state and the reducer that advances it.
//!
//! ```text
//! Created ──sentiment──► SentimentDone ──tone──► ToneDone ──decision──► Decided
//!    │                        │                     │
//!    └────────────────────────┴─────────────────────┴──────────────────► Failed
//! ```
//!
//! Stages never mutate the state directly. Each returns a [`StageUpdate`]
//! which [`AnalysisState::apply`] validates against the current phase and
//! merges. Every result field is written at most once.

use crate::types::{AnalysisResult, DecisionResult, SentimentResult, ToneResult};
use crate::{CrudeOrRudeError, Result};

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sentiment,
    Tone,
    Decision,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Sentiment => "sentiment",
            Stage::Tone => "tone",
            Stage::Decision => "decision",
        }
    }
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    SentimentDone,
    ToneDone,
    Decided,
    Failed,
}

impl Phase {
    /// Stage to run next, or `None` once terminal.
    pub fn next_stage(&self) -> Option<Stage> {
        match self {
            Phase::Created => Some(Stage::Sentiment),
            Phase::SentimentDone => Some(Stage::Tone),
            Phase::ToneDone => Some(Stage::Decision),
            Phase::Decided | Phase::Failed => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Decided | Phase::Failed)
    }
}

/// Partial update returned by a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageUpdate {
    Sentiment(SentimentResult),
    Tone(ToneResult),
    Decision(DecisionResult),
    /// The stage could not produce its result.
    Failed(String),
}

impl StageUpdate {
    fn stage(&self) -> Option<Stage> {
        match self {
            StageUpdate::Sentiment(_) => Some(Stage::Sentiment),
            StageUpdate::Tone(_) => Some(Stage::Tone),
            StageUpdate::Decision(_) => Some(Stage::Decision),
            StageUpdate::Failed(_) => None,
        }
    }
}

/// Mutable record owned by exactly one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    headline: String,
    source: Option<String>,
    sentiment: Option<SentimentResult>,
    tone: Option<ToneResult>,
    decision: Option<DecisionResult>,
    error: Option<String>,
    phase: Phase,
}

impl AnalysisState {
    /// Fresh state; rejects blank headlines.
    pub fn new(headline: impl Into<String>, source: Option<String>) -> Result<Self> {
        let headline = headline.into();
        if headline.trim().is_empty() {
            return Err(CrudeOrRudeError::InvalidInput(
                "headline must not be empty".to_string(),
            ));
        }
        Ok(Self {
            headline,
            source,
            sentiment: None,
            tone: None,
            decision: None,
            error: None,
            phase: Phase::Created,
        })
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn sentiment(&self) -> Option<&SentimentResult> {
        self.sentiment.as_ref()
    }

    pub fn tone(&self) -> Option<&ToneResult> {
        self.tone.as_ref()
    }

    pub fn decision(&self) -> Option<&DecisionResult> {
        self.decision.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Merge a stage update.
    ///
    /// An update for a stage other than the expected next one is an ordering
    /// violation: the state moves to `Failed` and the error is returned.
    /// `StageUpdate::Failed` moves a non-terminal state to `Failed` and is
    /// not itself an error here; [`into_result`](Self::into_result) reports it.
    pub fn apply(&mut self, update: StageUpdate) -> Result<Phase> {
        if self.phase.is_terminal() {
            return Err(CrudeOrRudeError::AnalysisFailed(format!(
                "update after terminal phase {:?}",
                self.phase
            )));
        }

        if let Some(stage) = update.stage() {
            if Some(stage) != self.phase.next_stage() {
                let message = format!(
                    "{} update applied in phase {:?}",
                    stage.as_str(),
                    self.phase
                );
                self.fail(message.clone());
                return Err(CrudeOrRudeError::AnalysisFailed(message));
            }
        }

        match update {
            StageUpdate::Sentiment(result) => {
                self.sentiment = Some(result);
                self.phase = Phase::SentimentDone;
            }
            StageUpdate::Tone(result) => {
                self.tone = Some(result);
                self.phase = Phase::ToneDone;
            }
            StageUpdate::Decision(result) => {
                self.decision = Some(result);
                self.phase = Phase::Decided;
            }
            StageUpdate::Failed(message) => self.fail(message),
        }
        Ok(self.phase)
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.phase = Phase::Failed;
    }

    /// Snapshot of a completed run.
    ///
    /// Fails with `AnalysisFailed` if the run failed or is incomplete.
    pub fn into_result(self) -> Result<AnalysisResult> {
        if let Some(error) = self.error {
            return Err(CrudeOrRudeError::AnalysisFailed(error));
        }
        match (self.sentiment, self.tone, self.decision) {
            (Some(sentiment), Some(tone), Some(decision)) => Ok(AnalysisResult {
                headline: self.headline,
                sentiment,
                tone,
                decision,
            }),
            _ => Err(CrudeOrRudeError::AnalysisFailed(format!(
                "run incomplete in phase {:?}",
                self.phase
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarketCategory, SentimentLabel, Tone};

    fn sentiment() -> SentimentResult {
        SentimentResult {
            score: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.6,
        }
    }

    fn tone() -> ToneResult {
        ToneResult {
            rudeness: 0.2,
            tone: Tone::Professional,
            confidence: 0.7,
        }
    }

    fn decision() -> DecisionResult {
        DecisionResult {
            category: MarketCategory::Professional,
            reasoning: "Low rudeness score (0.20)".into(),
            response: "fine".into(),
        }
    }

    #[test]
    fn blank_headline_rejected() {
        let err = AnalysisState::new("   ", None).unwrap_err();
        assert!(matches!(err, CrudeOrRudeError::InvalidInput(_)));
    }

    #[test]
    fn happy_path_walks_all_phases() {
        let mut state = AnalysisState::new("Oil steady", Some("Reuters".into())).unwrap();
        assert_eq!(state.phase(), Phase::Created);
        assert_eq!(state.phase().next_stage(), Some(Stage::Sentiment));
        assert_eq!(state.apply(StageUpdate::Sentiment(sentiment())).unwrap(), Phase::SentimentDone);
        assert_eq!(state.apply(StageUpdate::Tone(tone())).unwrap(), Phase::ToneDone);
        assert_eq!(state.apply(StageUpdate::Decision(decision())).unwrap(), Phase::Decided);
        assert_eq!(state.phase().next_stage(), None);
        assert_eq!(state.source(), Some("Reuters"));

        let result = state.into_result().unwrap();
        assert_eq!(result.headline, "Oil steady");
        assert_eq!(result.decision.category, MarketCategory::Professional);
    }

    #[test]
    fn out_of_order_update_fails_the_run() {
        let mut state = AnalysisState::new("Oil steady", None).unwrap();
        let err = state.apply(StageUpdate::Decision(decision())).unwrap_err();
        assert!(matches!(err, CrudeOrRudeError::AnalysisFailed(_)));
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.decision().is_none());
        assert!(state.error().is_some());
    }

    #[test]
    fn fields_are_written_once() {
        let mut state = AnalysisState::new("Oil steady", None).unwrap();
        state.apply(StageUpdate::Sentiment(sentiment())).unwrap();
        assert!(state.apply(StageUpdate::Sentiment(sentiment())).is_err());
    }

    #[test]
    fn failed_update_blocks_later_decision() {
        let mut state = AnalysisState::new("Oil steady", None).unwrap();
        state.apply(StageUpdate::Sentiment(sentiment())).unwrap();
        state.apply(StageUpdate::Tone(tone())).unwrap();
        assert_eq!(
            state.apply(StageUpdate::Failed("collaborator exploded".into())).unwrap(),
            Phase::Failed
        );
        assert!(state.apply(StageUpdate::Decision(decision())).is_err());
        assert!(state.decision().is_none());

        let err = state.into_result().unwrap_err();
        assert_eq!(err.to_string(), "analysis failed: collaborator exploded");
    }

    #[test]
    fn incomplete_state_does_not_produce_result() {
        let mut state = AnalysisState::new("Oil steady", None).unwrap();
        state.apply(StageUpdate::Sentiment(sentiment())).unwrap();
        assert!(state.into_result().is_err());
    }
}
