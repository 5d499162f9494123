//! Admission gate
//!
//! Cheap pre-score check that skips clearly dead tokens.

use crate::config::ScoringConfig;
use crate::source::SignalTuple;
use rust_decimal::Decimal;

/// Rejects tuples that fall below every configured minimum
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    min_volume: Decimal,
    min_liquidity: Decimal,
    min_holders: u64,
}

impl AdmissionGate {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            min_volume: config.min_volume_threshold,
            min_liquidity: config.min_liquidity_threshold,
            min_holders: config.min_holder_count,
        }
    }

    /// Passes when ANY of volume, liquidity or holder count meets its minimum
    pub fn meets_thresholds(&self, tuple: &SignalTuple) -> bool {
        tuple.volume_24h >= self.min_volume
            || tuple.liquidity >= self.min_liquidity
            || tuple.holder_count >= self.min_holders
    }
}
