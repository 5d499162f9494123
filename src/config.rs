//! Configuration types for boom-bot
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (including a `.env` file when present).

use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Tolerance for the scoring weights summing to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Highest usable alert threshold
pub const MAX_ALERT_SCORE_THRESHOLD: u8 = 100;

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// No notification destination configured
    #[error("DISCORD_WEBHOOK_URL is not set")]
    MissingWebhookUrl,
    /// A value could not be parsed or is out of range
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Upstream token listing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Listing endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Number of records requested per poll
    #[serde(default = "default_fetch_limit")]
    pub limit: u32,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://frontend-api.pump.fun/coins".to_string()
}
fn default_fetch_limit() -> u32 {
    50
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            limit: default_fetch_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Discord webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Webhook URL. Required for delivery.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Display name of the posting bot
    #[serde(default = "default_username")]
    pub username: String,

    /// Avatar shown next to alerts. An empty string disables it.
    #[serde(default = "default_avatar_url")]
    pub avatar_url: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_username() -> String {
    "Boom Bot 🚀".to_string()
}
fn default_avatar_url() -> Option<String> {
    Some("https://i.imgur.com/4M34hi2.png".to_string())
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            username: default_username(),
            avatar_url: default_avatar_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Polling loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between polling cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of token identifiers remembered across cycles
    #[serde(default = "default_novelty_capacity")]
    pub novelty_capacity: usize,
}

fn default_poll_interval_secs() -> u64 {
    60
}
fn default_novelty_capacity() -> usize {
    1000
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            novelty_capacity: default_novelty_capacity(),
        }
    }
}

/// Trend scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Composite score at or above which an alert is sent
    #[serde(default = "default_alert_score_threshold")]
    pub alert_score_threshold: u8,

    /// Minimum 24h volume (USD)
    #[serde(default = "default_min_volume_threshold")]
    pub min_volume_threshold: Decimal,

    /// Minimum liquidity (USD)
    #[serde(default = "default_min_liquidity_threshold")]
    pub min_liquidity_threshold: Decimal,

    /// Minimum holder count
    #[serde(default = "default_min_holder_count")]
    pub min_holder_count: u64,

    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_alert_score_threshold() -> u8 {
    50
}
fn default_min_volume_threshold() -> Decimal {
    Decimal::new(1000, 0)
}
fn default_min_liquidity_threshold() -> Decimal {
    Decimal::new(5000, 0)
}
fn default_min_holder_count() -> u64 {
    10
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alert_score_threshold: default_alert_score_threshold(),
            min_volume_threshold: default_min_volume_threshold(),
            min_liquidity_threshold: default_min_liquidity_threshold(),
            min_holder_count: default_min_holder_count(),
            weights: ScoreWeights::default(),
        }
    }
}

/// Weights applied to the four sub-scores. Expected to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_volume_weight")]
    pub volume: f64,
    #[serde(default = "default_liquidity_weight")]
    pub liquidity: f64,
    #[serde(default = "default_holder_weight")]
    pub holders: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
}

fn default_volume_weight() -> f64 {
    0.4
}
fn default_liquidity_weight() -> f64 {
    0.3
}
fn default_holder_weight() -> f64 {
    0.2
}
fn default_age_weight() -> f64 {
    0.1
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            volume: default_volume_weight(),
            liquidity: default_liquidity_weight(),
            holders: default_holder_weight(),
            age: default_age_weight(),
        }
    }
}

impl ScoreWeights {
    /// Sum of all four weights
    pub fn sum(&self) -> f64 {
        self.volume + self.liquidity + self.holders + self.age
    }

    /// Whether the weights sum to 1.0 within tolerance
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter port; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from a TOML file if it exists, otherwise start from defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Full startup resolution: file, `.env`, then process environment
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = Self::load_or_default(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DISCORD_WEBHOOK_URL").filter(|v| !v.trim().is_empty()) {
            self.notifier.webhook_url = Some(url.trim().to_string());
        }
        if let Some(url) = lookup("PUMPFUN_API_URL").filter(|v| !v.trim().is_empty()) {
            self.source.api_url = url.trim().to_string();
        }
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            self.telemetry.log_level = level.trim().to_string();
        }

        override_parsed(&lookup, "FETCH_LIMIT", &mut self.source.limit)?;
        override_parsed(
            &lookup,
            "POLL_INTERVAL",
            &mut self.monitor.poll_interval_secs,
        )?;
        override_parsed(&lookup, "SEEN_CAPACITY", &mut self.monitor.novelty_capacity)?;

        let scoring = &mut self.scoring;
        override_parsed(
            &lookup,
            "ALERT_SCORE_THRESHOLD",
            &mut scoring.alert_score_threshold,
        )?;
        override_parsed(
            &lookup,
            "MIN_VOLUME_THRESHOLD",
            &mut scoring.min_volume_threshold,
        )?;
        override_parsed(
            &lookup,
            "MIN_LIQUIDITY_THRESHOLD",
            &mut scoring.min_liquidity_threshold,
        )?;
        override_parsed(&lookup, "MIN_HOLDER_COUNT", &mut scoring.min_holder_count)?;
        override_parsed(&lookup, "VOLUME_GROWTH_WEIGHT", &mut scoring.weights.volume)?;
        override_parsed(&lookup, "LIQUIDITY_WEIGHT", &mut scoring.weights.liquidity)?;
        override_parsed(&lookup, "HOLDER_WEIGHT", &mut scoring.weights.holders)?;
        override_parsed(&lookup, "AGE_WEIGHT", &mut scoring.weights.age)?;

        Ok(())
    }

    /// Check ranges. Weight drift is reported as a warning only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "POLL_INTERVAL",
                value: "0".to_string(),
            });
        }
        if self.monitor.novelty_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SEEN_CAPACITY",
                value: "0".to_string(),
            });
        }
        if self.source.limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "FETCH_LIMIT",
                value: "0".to_string(),
            });
        }

        if self.scoring.alert_score_threshold > MAX_ALERT_SCORE_THRESHOLD {
            return Err(ConfigError::InvalidValue {
                key: "ALERT_SCORE_THRESHOLD",
                value: self.scoring.alert_score_threshold.to_string(),
            });
        }

        let weights = &self.scoring.weights;
        if !weights.is_normalized() {
            tracing::warn!(
                sum = weights.sum(),
                "Scoring weights do not sum to 1.0, composite scores are not a convex combination"
            );
        }

        Ok(())
    }

    /// Webhook URL, required before anything can be delivered
    pub fn webhook_url(&self) -> Result<&str, ConfigError> {
        self.notifier
            .webhook_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingWebhookUrl)
    }

    /// Webhook URL with its token hidden, for display
    pub fn masked_webhook_url(&self) -> Option<String> {
        self.webhook_url().ok().map(mask_webhook_url)
    }
}

fn mask_webhook_url(url: &str) -> String {
    const MARKER: &str = "/webhooks/";
    match url.find(MARKER) {
        Some(idx) => format!("{}****", &url[..idx + MARKER.len()]),
        None => {
            let visible: String = url.chars().take(8).collect();
            format!("{visible}****")
        }
    }
}

fn override_parsed<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    *target = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        })?;
    Ok(())
}
