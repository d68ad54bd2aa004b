//! Final market-mood decision types.

use serde::{Deserialize, Serialize};

/// Composite market sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketCategory {
    /// Normal, measured market reporting.
    Professional,
    /// Markets in chaos, fear-driven reactions.
    #[serde(alias = "Panic-stricken", alias = "Panic-Stricken", alias = "panic_stricken")]
    PanicStricken,
    /// Markets sending mixed or manipulative signals.
    #[serde(
        alias = "Passive-aggressive",
        alias = "Passive-Aggressive",
        alias = "passive_aggressive"
    )]
    PassiveAggressive,
}

impl MarketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCategory::Professional => "Professional",
            MarketCategory::PanicStricken => "PanicStricken",
            MarketCategory::PassiveAggressive => "PassiveAggressive",
        }
    }
}

impl std::fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the decision stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub category: MarketCategory,
    /// Why the category was chosen; cites the numeric inputs.
    pub reasoning: String,
    /// Short editorial remark about the market.
    pub response: String,
}
