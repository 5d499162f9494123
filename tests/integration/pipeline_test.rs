//! Integration tests for the normalize -> dedup -> gate -> score path

use boom_bot::config::{Config, ScoreWeights};
use boom_bot::monitor::Pipeline;
use boom_bot::novelty::NoveltyFilter;
use boom_bot::source::{extract_records, Normalizer};
use boom_bot::trend::{age_score, AdmissionGate, AlertPolicy, TrendScorer};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_mixed_provider_batch() {
    let now = fixed_now();
    let body = json!({
        "coins": [
            {
                "mint": "PumpMint111",
                "name": "Pump Coin",
                "symbol": "PUMP",
                "created_timestamp": (now - Duration::minutes(30)).timestamp_millis(),
                "usd_market_cap": 100000.0,
                "virtual_sol_reserves": 50000,
                "holder_count": 150
            },
            {
                "baseToken": { "address": "DexMint222", "name": "Dex Coin", "symbol": "DEX" },
                "volume": { "h24": "250000" },
                "liquidity": { "usd": 80000 },
                "holders": 400,
                "createdAt": (now - Duration::hours(2)).to_rfc3339()
            },
            { "description": "no identifier anywhere" }
        ]
    });

    let records = extract_records(body).unwrap();
    assert_eq!(records.len(), 3);

    let batch = Normalizer::default().normalize_batch(&records, now);
    assert_eq!(batch.tuples.len(), 2);
    assert_eq!(batch.skipped, 1);

    let scorer = TrendScorer::new(&Config::default().scoring);
    let policy = AlertPolicy::default();

    let pump = &batch.tuples[0];
    assert_eq!(pump.age_secs_at(now), 1800);
    let pump_score = scorer.score_at(pump, now);
    assert_eq!(pump_score.score, 53);
    assert!(policy.should_alert(&pump_score));

    let dex = &batch.tuples[1];
    assert_eq!(dex.mint, "DexMint222");
    assert_eq!(dex.symbol, "DEX");
    assert_eq!(dex.age_secs_at(now), 7200);
    assert!(policy.should_alert(&scorer.score_at(dex, now)));
}

#[test]
fn test_low_activity_token_is_gated_or_scored_low() {
    let now = fixed_now();
    let record = json!({
        "mint": "Quiet",
        "created_timestamp": (now - Duration::hours(24)).timestamp(),
        "volume24h": 100,
        "liquidity": 500,
        "holder_count": 5
    });

    let config = Config::default();
    let tuple = Normalizer::default().normalize(&record, now).unwrap();

    assert!(!AdmissionGate::new(&config.scoring).meets_thresholds(&tuple));
    let score = TrendScorer::new(&config.scoring).score_at(&tuple, now);
    assert!(score.score < 50);
}

#[test]
fn test_holders_alone_pass_the_gate() {
    let now = fixed_now();
    let record = json!({ "mint": "Crowd", "holderCount": "10" });
    let tuple = Normalizer::default().normalize(&record, now).unwrap();

    let gate = AdmissionGate::new(&Config::default().scoring);
    assert!(gate.meets_thresholds(&tuple));
}

#[test]
fn test_fresh_launch_age_dominates() {
    let now = fixed_now();
    let record = json!({
        "mint": "Newborn",
        "created_timestamp": (now - Duration::minutes(5)).timestamp()
    });
    let tuple = Normalizer::default().normalize(&record, now).unwrap();
    let score = TrendScorer::new(&Config::default().scoring).score_at(&tuple, now);

    assert!(score.breakdown.age >= 80);
    assert_eq!(score.breakdown.volume, 0);
}

#[test]
fn test_novelty_across_batches_keeps_recent_ids() {
    let now = fixed_now();
    let normalizer = Normalizer::default();
    let mut filter = NoveltyFilter::new(3);

    let batch = |ids: &[&str]| {
        let records: Vec<_> = ids.iter().map(|id| json!({ "mint": id })).collect();
        normalizer.normalize_batch(&records, now).tuples
    };

    let first = filter.classify(batch(&["a", "b", "c"]));
    assert_eq!(first.fresh.len(), 3);

    let second = filter.classify(batch(&["c", "d", "e"]));
    assert_eq!(second.flags, vec![false, true, true]);
    assert_eq!(filter.len(), 3);

    // "a" and "b" were evicted, so they count as new again
    let third = filter.classify(batch(&["a", "e"]));
    assert_eq!(third.flags, vec![true, false]);
}

#[test]
fn test_composite_bounded_for_unit_weights() {
    let now = fixed_now();
    let mut config = Config::default();
    config.scoring.weights = ScoreWeights {
        volume: 0.25,
        liquidity: 0.25,
        holders: 0.25,
        age: 0.25,
    };
    let scorer = TrendScorer::new(&config.scoring);
    let normalizer = Normalizer::default();

    for volume in [json!(0), json!(1), json!(1e3), json!(1e6), json!(1e12), json!(1e300)] {
        for age_hours in [0, 1, 6, 24, 100] {
            let record = json!({
                "mint": "x",
                "volume24h": volume,
                "liquidity": volume,
                "holder_count": 1_000_000u64,
                "created_timestamp": (now - Duration::hours(age_hours)).timestamp()
            });
            let tuple = normalizer.normalize(&record, now).unwrap();

            let raw = scorer.weighted_sum(
                scorer.volume_score(tuple.volume_24h.to_f64().unwrap()),
                scorer.liquidity_score(tuple.liquidity.to_f64().unwrap()),
                scorer.holder_score(tuple.holder_count as f64),
                age_score(tuple.age_secs_at(now) as f64),
            );
            assert!((0.0..=100.0 + 1e-9).contains(&raw), "weighted sum {raw}");
            assert_eq!(scorer.score_at(&tuple, now).score, raw.round() as u8);
        }
    }
}

#[test]
fn test_enormous_volume_saturates_sub_score() {
    let now = fixed_now();
    let record = json!({ "mint": "Whale", "volume24h": 1e300, "liquidity": "1e400" });
    let tuple = Normalizer::default().normalize(&record, now).unwrap();
    let score = TrendScorer::new(&Config::default().scoring).score_at(&tuple, now);

    assert_eq!(score.breakdown.volume, 100);
    assert_eq!(score.breakdown.liquidity, 100);
}

#[test]
fn test_garbage_timestamp_does_not_abort_batch() {
    let now = fixed_now();
    let records = vec![
        json!({ "mint": "a", "created_timestamp": -1e30 }),
        json!({ "mint": "b", "created_timestamp": i64::MIN }),
        json!({ "mint": "c", "created_timestamp": (now - Duration::minutes(5)).timestamp() }),
    ];
    let batch = Normalizer::default().normalize_batch(&records, now);

    assert_eq!(batch.tuples.len(), 3);
    assert_eq!(batch.tuples[0].created_at, now);
    assert_eq!(batch.tuples[1].created_at, now);
    assert_eq!(batch.tuples[2].age_secs_at(now), 300);
}

#[test]
fn test_pipeline_alerts_once_per_token() {
    let now = fixed_now();
    let records = vec![json!({
        "mint": "Hot",
        "created_timestamp": (now - Duration::minutes(30)).timestamp(),
        "volume24h": 100000,
        "liquidity": 50000,
        "holder_count": 150
    })];

    let mut pipeline = Pipeline::new(&Config::default());
    let (_, first) = pipeline.evaluate(&records, now);
    let (_, second) = pipeline.evaluate(&records, now + Duration::seconds(60));

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
