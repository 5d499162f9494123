//! Signal tuple types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized per-token record consumed by scoring
///
/// Age is never stored; it is derived from `created_at` at observation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTuple {
    /// Token mint address, the unique key
    pub mint: String,
    /// Display name
    pub name: String,
    /// Display symbol
    pub symbol: String,
    /// Free-form description from the launch page
    pub description: Option<String>,
    /// Token image
    pub image_uri: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// 24h volume (USD)
    pub volume_24h: Decimal,
    /// Liquidity depth (USD)
    pub liquidity: Decimal,
    /// Number of holders
    pub holder_count: u64,
    /// Market capitalization (USD)
    pub market_cap: Option<Decimal>,
    /// 24h price change (percent)
    pub price_change_24h: Option<Decimal>,
}

impl SignalTuple {
    /// Whole seconds elapsed since creation, observed at `now`
    ///
    /// Creation times in the future (clock skew) yield zero.
    pub fn age_secs_at(&self, now: DateTime<Utc>) -> u64 {
        (now - self.created_at).num_seconds().max(0) as u64
    }

    /// Age observed at the current wall-clock time
    pub fn age_secs(&self) -> u64 {
        self.age_secs_at(Utc::now())
    }
}
