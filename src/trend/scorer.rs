//! Trend scorer
//!
//! Four independent sub-scores, each clamped to [0, 100], combined by the
//! configured weights into a composite score:
//!
//! - volume, liquidity, holders: `33 * log10(max(1, value / minimum))`, so every
//!   10x multiple of the configured minimum adds ~33 points
//! - age: piecewise linear in hours, favoring fresh launches

use super::{ScoreBreakdown, TrendScore};
use crate::config::{ScoreWeights, ScoringConfig};
use crate::source::SignalTuple;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Points contributed per decade above the minimum
const POINTS_PER_DECADE: f64 = 33.0;

const MAX_SCORE: f64 = 100.0;

/// Converts signal tuples into trend scores
#[derive(Debug, Clone)]
pub struct TrendScorer {
    min_volume: f64,
    min_liquidity: f64,
    min_holders: f64,
    weights: ScoreWeights,
}

impl TrendScorer {
    /// Create a scorer from scoring configuration
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            min_volume: decimal_to_f64(config.min_volume_threshold),
            min_liquidity: decimal_to_f64(config.min_liquidity_threshold),
            min_holders: config.min_holder_count as f64,
            weights: config.weights,
        }
    }

    /// Score a tuple as observed now
    pub fn score(&self, tuple: &SignalTuple) -> TrendScore {
        self.score_at(tuple, Utc::now())
    }

    /// Score a tuple with age derived at `now`
    pub fn score_at(&self, tuple: &SignalTuple, now: DateTime<Utc>) -> TrendScore {
        self.score_signals(
            decimal_to_f64(tuple.volume_24h),
            decimal_to_f64(tuple.liquidity),
            tuple.holder_count as f64,
            tuple.age_secs_at(now) as f64,
        )
    }

    /// Score raw signal magnitudes
    pub fn score_signals(
        &self,
        volume: f64,
        liquidity: f64,
        holders: f64,
        age_secs: f64,
    ) -> TrendScore {
        let volume_score = self.volume_score(volume);
        let liquidity_score = self.liquidity_score(liquidity);
        let holder_score = self.holder_score(holders);
        let age_score = age_score(age_secs);

        let weighted = self.weighted_sum(volume_score, liquidity_score, holder_score, age_score);

        TrendScore {
            score: to_points(clamp_score(weighted)),
            breakdown: ScoreBreakdown {
                volume: to_points(volume_score),
                liquidity: to_points(liquidity_score),
                holders: to_points(holder_score),
                age: to_points(age_score),
            },
        }
    }

    /// Weighted combination of sub-scores, before clamping
    ///
    /// Lies in [0, 100] whenever the weights are non-negative and sum to 1.0.
    pub fn weighted_sum(&self, volume: f64, liquidity: f64, holders: f64, age: f64) -> f64 {
        volume * self.weights.volume
            + liquidity * self.weights.liquidity
            + holders * self.weights.holders
            + age * self.weights.age
    }

    pub fn volume_score(&self, volume: f64) -> f64 {
        log_scale_score(volume, self.min_volume)
    }

    pub fn liquidity_score(&self, liquidity: f64) -> f64 {
        log_scale_score(liquidity, self.min_liquidity)
    }

    pub fn holder_score(&self, holders: f64) -> f64 {
        log_scale_score(holders, self.min_holders)
    }
}

/// Logarithmic sub-score of `value` relative to `minimum`, in [0, 100]
///
/// Zero, negative and NaN values score 0. Values at or below the minimum
/// also score 0.
pub fn log_scale_score(value: f64, minimum: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    let ratio = value / minimum;
    clamp_score(POINTS_PER_DECADE * ratio.max(1.0).log10())
}

/// Age sub-score, in [0, 100]
///
/// | age         | score                        |
/// |-------------|------------------------------|
/// | < 1h        | `100 - 20h`                  |
/// | 1h to 6h    | `80 - 4(h - 1)`              |
/// | 6h to 24h   | `60 - 2.22(h - 6)`           |
/// | >= 24h      | `max(0, 20 - 0.5(h - 24))`   |
///
/// Negative ages are treated as zero.
pub fn age_score(age_secs: f64) -> f64 {
    if age_secs.is_nan() {
        return 0.0;
    }
    let hours = age_secs.max(0.0) / 3600.0;

    let raw = if hours < 1.0 {
        100.0 - hours * 20.0
    } else if hours < 6.0 {
        80.0 - (hours - 1.0) * 4.0
    } else if hours < 24.0 {
        60.0 - (hours - 6.0) * 2.22
    } else {
        (20.0 - (hours - 24.0) * 0.5).max(0.0)
    };

    clamp_score(raw)
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

fn to_points(value: f64) -> u8 {
    clamp_score(value).round() as u8
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
