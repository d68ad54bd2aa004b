//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `crude_or_rude_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: pipeline outcome: "ok" or "error"
//! - `strategy`: decision strategy that produced the result: "reasoning" or "rules"
//! - `client`: reasoning client name (e.g. "anthropic")

/// Total pipeline runs.
///
/// Labels: `status` ("ok" | "error").
pub const ANALYSES_TOTAL: &str = "crude_or_rude_analyses_total";

/// Pipeline run duration in seconds.
///
/// Labels: `status`.
pub const ANALYSIS_DURATION_SECONDS: &str = "crude_or_rude_analysis_duration_seconds";

/// Total decisions produced.
///
/// Labels: `strategy` ("reasoning" | "rules").
pub const DECISIONS_TOTAL: &str = "crude_or_rude_decisions_total";

/// Primary strategy failures recovered by the rule-based strategy.
///
/// Labels: `strategy` (the strategy that failed).
pub const REASONING_FALLBACKS_TOTAL: &str = "crude_or_rude_reasoning_fallbacks_total";

/// Retry attempts against the reasoning client (not counting the initial request).
///
/// Labels: `client`.
pub const RETRIES_TOTAL: &str = "crude_or_rude_retries_total";
