//! Trend score types

use serde::{Deserialize, Serialize};

/// Bounded 0-100 composite score with its per-dimension breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendScore {
    /// Composite score, rounded
    pub score: u8,
    /// Rounded sub-scores, for display only
    pub breakdown: ScoreBreakdown,
}

/// Rounded sub-scores. Not re-summed to produce the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub volume: u8,
    pub liquidity: u8,
    pub holders: u8,
    pub age: u8,
}

/// Qualitative band of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// 80 and above
    Hot,
    /// 60 to 79
    Warm,
    /// 40 to 59
    Moderate,
    /// Below 40
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreTier::Hot,
            60..=79 => ScoreTier::Warm,
            40..=59 => ScoreTier::Moderate,
            _ => ScoreTier::Low,
        }
    }
}

impl TrendScore {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }
}
