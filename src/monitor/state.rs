//! Polling loop state

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::trend::TrendScore;

/// A token that made it past the admission gate and was scored
#[derive(Debug, Clone, Serialize)]
pub struct ScoredToken {
    pub mint: String,
    pub name: String,
    pub symbol: String,
    pub score: TrendScore,
    pub alert: bool,
}

/// Outcome of one polling cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    /// Cycle start time
    pub started_at: Option<DateTime<Utc>>,
    /// Upstream fetch failed; nothing else ran
    pub fetch_failed: bool,
    /// Raw records returned by the upstream
    pub fetched: usize,
    /// Records dropped by the normalizer
    pub skipped: usize,
    /// Tokens seen for the first time
    pub fresh: usize,
    /// Fresh tokens rejected by the admission gate
    pub gate_rejected: usize,
    /// Gate survivors with their scores
    pub scored: Vec<ScoredToken>,
    /// Alerts delivered
    pub alerts_sent: usize,
    /// Alerts whose delivery failed
    pub alerts_failed: usize,
}

impl CycleReport {
    /// Number of tokens that cleared the alert threshold
    pub fn alerts_triggered(&self) -> usize {
        self.scored.iter().filter(|t| t.alert).count()
    }
}

/// State owned by the polling loop
///
/// Only the loop mutates this; shutdown is checked between cycles.
#[derive(Debug, Clone, Default)]
pub struct LoopState {
    pub running: bool,
    pub cycles_completed: u64,
    pub alerts_sent: u64,
    pub last_cycle: Option<CycleReport>,
}

impl LoopState {
    /// Fold a finished cycle into the running totals
    pub fn record(&mut self, report: CycleReport) {
        self.cycles_completed += 1;
        self.alerts_sent += report.alerts_sent as u64;
        self.last_cycle = Some(report);
    }
}
