//! Score command implementation
//!
//! Runs records from a file through the normalizer, the admission gate and
//! the scorer without touching the network or the novelty filter.

use crate::config::Config;
use crate::source::{extract_records, Normalizer};
use crate::trend::{AdmissionGate, AlertPolicy, TrendScore, TrendScorer};
use anyhow::Context;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file holding an array of records (or a wrapped listing response)
    pub file: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ScoreRow {
    mint: String,
    symbol: String,
    age_secs: u64,
    meets_thresholds: bool,
    score: TrendScore,
    alert: bool,
}

impl ScoreArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let body: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("{} is not valid JSON", self.file.display()))?;
        let records = extract_records(body)?;

        let now = Utc::now();
        let batch = Normalizer::default().normalize_batch(&records, now);
        let gate = AdmissionGate::new(&config.scoring);
        let scorer = TrendScorer::new(&config.scoring);
        let policy = AlertPolicy::from_config(&config.scoring);

        let rows: Vec<ScoreRow> = batch
            .tuples
            .iter()
            .map(|tuple| {
                let score = scorer.score_at(tuple, now);
                let meets_thresholds = gate.meets_thresholds(tuple);
                ScoreRow {
                    mint: tuple.mint.clone(),
                    symbol: tuple.symbol.clone(),
                    age_secs: tuple.age_secs_at(now),
                    meets_thresholds,
                    score,
                    alert: meets_thresholds && policy.should_alert(&score),
                }
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        println!(
            "{} records, {} scored, {} skipped (threshold {})",
            records.len(),
            rows.len(),
            batch.skipped,
            policy.threshold()
        );
        for row in &rows {
            let b = &row.score.breakdown;
            println!(
                "  {:>3} {:<10} {:<46} vol={} liq={} hold={} age={}{}{}",
                row.score.score,
                row.symbol,
                row.mint,
                b.volume,
                b.liquidity,
                b.holders,
                b.age,
                if row.meets_thresholds { "" } else { "  (below thresholds)" },
                if row.alert { "  ALERT" } else { "" }
            );
        }
        Ok(())
    }
}
