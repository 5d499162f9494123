//! Alert decision

use super::TrendScore;
use crate::config::ScoringConfig;

/// Threshold comparison over the composite score
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    threshold: u8,
}

impl AlertPolicy {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.alert_score_threshold)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Alert when the composite score is at or above the threshold
    pub fn should_alert(&self, score: &TrendScore) -> bool {
        score.score >= self.threshold
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
