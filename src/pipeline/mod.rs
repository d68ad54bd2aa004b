//! Three-stage analysis pipeline.
//!
//! Each run owns a fresh [`AnalysisState`] and drives it through sentiment,
//! tone and decision in that order. Scorers are pure; only the decision
//! stage may touch the network. Runs share nothing mutable, so one
//! `Pipeline` can serve many concurrent runs.

mod state;

use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::decision::DecisionMaker;
use crate::scoring::{SentimentScorer, ToneScorer};
use crate::telemetry;
use crate::types::{AnalysisOutcome, AnalysisResult, ErrorReport, SentimentResult, ToneResult};
use crate::{CrudeOrRudeError, Result};

pub use state::{AnalysisState, Phase, Stage, StageUpdate};

/// Sentiment, tone and decision stages wired together.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    sentiment: SentimentScorer,
    tone: ToneScorer,
    decision: DecisionMaker,
}

impl Pipeline {
    pub fn new(sentiment: SentimentScorer, tone: ToneScorer, decision: DecisionMaker) -> Self {
        Self {
            sentiment,
            tone,
            decision,
        }
    }

    /// Keyword scorers with rule-based decisions only.
    pub fn rule_based() -> Self {
        Self::default()
    }

    pub fn decision_maker(&self) -> &DecisionMaker {
        &self.decision
    }

    /// Sentiment stage on its own.
    pub fn score_sentiment(&self, text: &str) -> SentimentResult {
        self.sentiment.score(text)
    }

    /// Tone stage on its own.
    pub fn score_tone(&self, text: &str) -> ToneResult {
        self.tone.score(text)
    }

    /// Analyse one headline.
    ///
    /// Blank headlines fail with `InvalidInput` before any stage runs.
    /// Any stage failure surfaces as `AnalysisFailed`. A reasoning outage is
    /// not a failure: the decision stage falls back to the rules.
    #[instrument(skip(self, source), fields(source = source.unwrap_or("-")))]
    pub async fn run(&self, headline: &str, source: Option<&str>) -> Result<AnalysisResult> {
        let start = Instant::now();
        let result = self.execute(headline, source).await;
        Self::record_run(start, result.is_ok());
        result
    }

    /// Like [`run`](Self::run), folding failures into an [`ErrorReport`].
    pub async fn analyze(&self, headline: &str, source: Option<&str>) -> AnalysisOutcome {
        match self.run(headline, source).await {
            Ok(result) => AnalysisOutcome::Success(result),
            Err(e) => {
                warn!(headline, error = %e, "analysis failed");
                AnalysisOutcome::Failure(ErrorReport {
                    error: e.to_string(),
                    headline: headline.to_string(),
                })
            }
        }
    }

    async fn execute(&self, headline: &str, source: Option<&str>) -> Result<AnalysisResult> {
        let mut state = AnalysisState::new(headline, source.map(str::to_owned))?;

        while let Some(stage) = state.phase().next_stage() {
            let update = match stage {
                Stage::Sentiment => self.sentiment_stage(&state),
                Stage::Tone => self.tone_stage(&state),
                Stage::Decision => self.decision_stage(&state).await,
            };
            let phase = state.apply(update)?;
            debug!(stage = stage.as_str(), ?phase, "stage complete");
        }

        state.into_result()
    }

    fn sentiment_stage(&self, state: &AnalysisState) -> StageUpdate {
        StageUpdate::Sentiment(self.sentiment.score(state.headline()))
    }

    fn tone_stage(&self, state: &AnalysisState) -> StageUpdate {
        StageUpdate::Tone(self.tone.score(state.headline()))
    }

    async fn decision_stage(&self, state: &AnalysisState) -> StageUpdate {
        let (Some(sentiment), Some(tone)) = (state.sentiment(), state.tone()) else {
            return StageUpdate::Failed("missing sentiment or tone analysis".to_string());
        };
        match self
            .decision
            .decide(state.headline(), sentiment, tone)
            .await
        {
            Ok(decision) => StageUpdate::Decision(decision),
            Err(CrudeOrRudeError::AnalysisFailed(cause)) => StageUpdate::Failed(cause),
            Err(e) => StageUpdate::Failed(e.to_string()),
        }
    }

    fn record_run(start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(telemetry::ANALYSES_TOTAL, "status" => status).increment(1);
        metrics::histogram!(telemetry::ANALYSIS_DURATION_SECONDS, "status" => status)
            .record(start.elapsed().as_secs_f64());
    }
}
