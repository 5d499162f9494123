//! End-to-end integration tests

use boom_bot::config::{Config, ScoreWeights};
use boom_bot::notify::{Alert, DiscordWebhook};
use boom_bot::source::{extract_records, Normalizer};
use boom_bot::telemetry::LogFormat;
use boom_bot::trend::TrendScorer;
use chrono::Utc;
use serde_json::json;

#[test]
fn test_config_example_matches_defaults() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let defaults = Config::default();

    assert_eq!(config.source.api_url, defaults.source.api_url);
    assert_eq!(config.source.limit, defaults.source.limit);
    assert_eq!(config.notifier.username, defaults.notifier.username);
    assert_eq!(config.notifier.avatar_url, defaults.notifier.avatar_url);
    assert_eq!(
        config.monitor.poll_interval_secs,
        defaults.monitor.poll_interval_secs
    );
    assert_eq!(
        config.monitor.novelty_capacity,
        defaults.monitor.novelty_capacity
    );
    assert_eq!(
        config.scoring.min_liquidity_threshold,
        defaults.scoring.min_liquidity_threshold
    );
    assert_eq!(config.scoring.weights, ScoreWeights::default());
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.notifier.webhook_url.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_env_file_layers_over_config_file() {
    let mut config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config
        .apply_overrides(|key| match key {
            "DISCORD_WEBHOOK_URL" => Some("https://discord.com/api/webhooks/1/t".to_string()),
            "POLL_INTERVAL" => Some("30".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.monitor.poll_interval_secs, 30);
    assert!(config.webhook_url().is_ok());
}

#[test]
fn test_listing_to_webhook_payload() {
    let now = Utc::now();
    let body = json!([{
        "mint": "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr",
        "name": "Rocket",
        "symbol": "RKT",
        "description": "to the moon",
        "image_uri": "https://cdn.example/rkt.png",
        "created_timestamp": now.timestamp() - 1800,
        "usd_market_cap": 100000,
        "virtual_sol_reserves": 50000,
        "holder_count": 150
    }]);

    let config = Config::default();
    let records = extract_records(body).unwrap();
    let token = Normalizer::default()
        .normalize(&records[0], now)
        .unwrap();
    let score = TrendScorer::new(&config.scoring).score_at(&token, now);
    let alert = Alert::new(token, score, now);

    let webhook =
        DiscordWebhook::new("https://discord.com/api/webhooks/1/t", &config.notifier).unwrap();
    let payload = serde_json::to_value(webhook.payload(&alert)).unwrap();
    let embed = &payload["embeds"][0];

    assert_eq!(payload["username"], "Boom Bot 🚀");
    assert_eq!(embed["title"], "🚀 Rocket (RKT)");
    assert_eq!(embed["description"], "to the moon");
    assert_eq!(embed["thumbnail"]["url"], "https://cdn.example/rkt.png");
    assert_eq!(embed["fields"][0]["value"], "**53/100** 🔥");
    assert_eq!(embed["fields"][1]["value"], "30m");
}
