//! Tone / rudeness types.

use serde::{Deserialize, Serialize};

/// Tone classification, independent of polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Professional,
    Aggressive,
    #[serde(alias = "passive-aggressive")]
    PassiveAggressive,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Aggressive => "aggressive",
            Tone::PassiveAggressive => "passive_aggressive",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the tone stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneResult {
    /// Rudeness in `[0.0, 1.0]`.
    #[serde(rename = "rudeness_score")]
    pub rudeness: f64,
    pub tone: Tone,
    /// Confidence in `[0.0, 0.95]`.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_round_trips_snake_case() {
        let json = serde_json::to_string(&Tone::PassiveAggressive).unwrap();
        assert_eq!(json, "\"passive_aggressive\"");
        let parsed: Tone = serde_json::from_str("\"passive-aggressive\"").unwrap();
        assert_eq!(parsed, Tone::PassiveAggressive);
    }

    #[test]
    fn serializes_rudeness_score_field() {
        let result = ToneResult {
            rudeness: 0.2,
            tone: Tone::Professional,
            confidence: 0.9,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rudeness_score"], 0.2);
        assert_eq!(json["tone"], "professional");
    }
}
