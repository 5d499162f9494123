//! Alert payload types

use crate::source::SignalTuple;
use crate::trend::TrendScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A token that cleared the alert threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert identifier
    pub id: Uuid,
    /// Token signals at observation time
    pub token: SignalTuple,
    /// Composite score and breakdown
    pub score: TrendScore,
    /// Token age when observed (seconds)
    pub age_secs: u64,
    /// Alert creation time
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Create an alert for a token observed at `now`
    pub fn new(token: SignalTuple, score: TrendScore, now: DateTime<Utc>) -> Self {
        let age_secs = token.age_secs_at(now);
        Self {
            id: Uuid::new_v4(),
            token,
            score,
            age_secs,
            timestamp: now,
        }
    }
}
