//! Transport-agnostic tool surface over a shared [`Pipeline`].
//!
//! The stdio server and the CLI both call into [`AnalysisService`]; it owns
//! no transport concerns. Per-item failures are reported in the item's slot
//! and never abort a batch.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{instrument, warn};

use crate::pipeline::Pipeline;
use crate::samples::{SAMPLE_ANALYSIS_COUNT, SAMPLE_HEADLINES};
use crate::types::{AnalysisOutcome, BatchReport, SentimentResult, ToneResult};
use crate::{CrudeOrRudeError, Result};

/// Default cap on headlines per batch call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 5;

/// Analysis operations exposed to tool callers.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    pipeline: Arc<Pipeline>,
    max_batch_size: usize,
}

impl AnalysisService {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Cap batch calls at `max` headlines (minimum 1).
    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max.max(1);
        self
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Full analysis of one headline; failures become an error payload.
    pub async fn analyze_headline(&self, headline: &str, source: Option<&str>) -> AnalysisOutcome {
        self.pipeline.analyze(headline, source).await
    }

    /// Analyse up to `max_batch_size` headlines concurrently.
    ///
    /// Extra headlines are dropped. Slots keep input order.
    #[instrument(skip(self, headlines), fields(requested = headlines.len()))]
    pub async fn analyze_batch(&self, headlines: &[String]) -> BatchReport {
        if headlines.len() > self.max_batch_size {
            warn!(
                requested = headlines.len(),
                max = self.max_batch_size,
                "batch truncated"
            );
        }
        let runs = headlines
            .iter()
            .take(self.max_batch_size)
            .map(|headline| self.pipeline.analyze(headline, None));
        BatchReport::from(join_all(runs).await)
    }

    /// Canned demo headlines.
    pub fn sample_headlines(&self) -> Vec<String> {
        crate::samples::sample_headlines()
    }

    /// Batch analysis over the first few samples.
    pub async fn sample_analysis(&self) -> BatchReport {
        let samples: Vec<String> = SAMPLE_HEADLINES
            .iter()
            .take(SAMPLE_ANALYSIS_COUNT)
            .map(|h| h.to_string())
            .collect();
        self.analyze_batch(&samples).await
    }

    /// Sentiment stage only.
    pub fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        require_text(text)?;
        Ok(self.pipeline.score_sentiment(text))
    }

    /// Tone stage only.
    pub fn detect_rudeness(&self, text: &str) -> Result<ToneResult> {
        require_text(text)?;
        Ok(self.pipeline.score_tone(text))
    }
}

fn require_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CrudeOrRudeError::InvalidInput(
            "text must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SentimentLabel, Tone};

    fn service() -> AnalysisService {
        AnalysisService::new(Arc::new(Pipeline::rule_based()))
    }

    #[tokio::test]
    async fn batch_is_capped_and_ordered() {
        let headlines: Vec<String> = (0..8).map(|i| format!("Oil headline {i}")).collect();
        let report = service().with_max_batch_size(3).analyze_batch(&headlines).await;
        assert_eq!(report.total_analyzed, 3);
        let order: Vec<&str> = report.results.iter().map(|r| r.headline()).collect();
        assert_eq!(order, ["Oil headline 0", "Oil headline 1", "Oil headline 2"]);
    }

    #[tokio::test]
    async fn bad_item_does_not_abort_batch() {
        let headlines = vec![
            "Oil steady".to_string(),
            "   ".to_string(),
            "Oil market crashes".to_string(),
        ];
        let report = service().analyze_batch(&headlines).await;
        assert_eq!(report.total_analyzed, 3);
        let failures = report.results.iter().filter(|r| !r.is_success()).count();
        assert_eq!(failures, 1);
        assert!(!report.results[1].is_success());
    }

    #[tokio::test]
    async fn sample_analysis_runs_first_three() {
        let report = service().sample_analysis().await;
        assert_eq!(report.total_analyzed, SAMPLE_ANALYSIS_COUNT);
        assert_eq!(report.results[0].headline(), SAMPLE_HEADLINES[0]);
        assert!(report.results.iter().all(AnalysisOutcome::is_success));
    }

    #[test]
    fn stage_tools_reject_blank_text() {
        assert!(matches!(
            service().analyze_sentiment(" ").unwrap_err(),
            CrudeOrRudeError::InvalidInput(_)
        ));
        assert!(service().detect_rudeness("").is_err());
    }

    #[test]
    fn stage_tools_score_text() {
        let s = service().analyze_sentiment("Oil rally gains strength").unwrap();
        assert_eq!(s.label, SentimentLabel::Positive);
        let t = service().detect_rudeness("Oil market crashes into chaos").unwrap();
        assert_eq!(t.tone, Tone::Aggressive);
    }

    #[test]
    fn batch_size_has_floor_of_one() {
        assert_eq!(service().with_max_batch_size(0).max_batch_size(), 1);
        assert_eq!(service().max_batch_size(), DEFAULT_MAX_BATCH_SIZE);
    }
}
