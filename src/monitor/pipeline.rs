//! Per-cycle evaluation pipeline
//!
//! normalize -> novelty filter -> admission gate -> score -> alert decision.
//! Synchronous and free of I/O; the runner wraps it with fetch and delivery.

use super::{CycleReport, ScoredToken};
use crate::config::Config;
use crate::notify::Alert;
use crate::novelty::NoveltyFilter;
use crate::source::Normalizer;
use crate::trend::{AdmissionGate, AlertPolicy, TrendScorer};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Stateful evaluation of raw upstream batches
pub struct Pipeline {
    normalizer: Normalizer,
    novelty: NoveltyFilter,
    gate: AdmissionGate,
    scorer: TrendScorer,
    policy: AlertPolicy,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            normalizer: Normalizer::default(),
            novelty: NoveltyFilter::new(config.monitor.novelty_capacity),
            gate: AdmissionGate::new(&config.scoring),
            scorer: TrendScorer::new(&config.scoring),
            policy: AlertPolicy::from_config(&config.scoring),
        }
    }

    /// Evaluate one batch observed at `now`
    ///
    /// The novelty set is updated before any alert is returned.
    pub fn evaluate(&mut self, records: &[Value], now: DateTime<Utc>) -> (CycleReport, Vec<Alert>) {
        let batch = self.normalizer.normalize_batch(records, now);
        let classification = self.novelty.classify(batch.tuples);

        let mut report = CycleReport {
            started_at: Some(now),
            fetched: records.len(),
            skipped: batch.skipped,
            fresh: classification.fresh.len(),
            ..Default::default()
        };
        let mut alerts = Vec::new();

        for tuple in classification.fresh {
            if !self.gate.meets_thresholds(&tuple) {
                tracing::debug!(symbol = %tuple.symbol, "Skipping token below thresholds");
                report.gate_rejected += 1;
                continue;
            }

            let score = self.scorer.score_at(&tuple, now);
            let alert = self.policy.should_alert(&score);

            tracing::info!(
                name = %tuple.name,
                symbol = %tuple.symbol,
                score = score.score,
                alert,
                "Scored token"
            );

            report.scored.push(ScoredToken {
                mint: tuple.mint.clone(),
                name: tuple.name.clone(),
                symbol: tuple.symbol.clone(),
                score,
                alert,
            });

            if alert {
                alerts.push(Alert::new(tuple, score, now));
            }
        }

        (report, alerts)
    }

    /// Identifiers currently remembered by the novelty filter
    pub fn remembered(&self) -> usize {
        self.novelty.len()
    }
}
