//! CLI interface for boom-bot
//!
//! Provides subcommands for:
//! - `run`: Poll continuously and deliver alerts
//! - `scan`: Run a single polling cycle
//! - `score`: Score token records from a JSON file
//! - `config`: Show the effective configuration

mod run;
mod scan;
mod score;

pub use run::RunArgs;
pub use scan::ScanArgs;
pub use score::ScoreArgs;

use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "boom-bot")]
#[command(about = "Pump.fun launch monitor with trend scoring and Discord alerts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll for new launches until interrupted
    Run(RunArgs),
    /// Run a single polling cycle and print the report
    Scan(ScanArgs),
    /// Score token records from a JSON file
    Score(ScoreArgs),
    /// Show the effective configuration
    Config,
}

/// Print the effective configuration with the webhook token hidden
pub fn print_config(config: &Config) {
    let scoring = &config.scoring;
    let weights = &scoring.weights;

    println!("Current configuration:");
    println!(
        "  Source: {} (limit {}, timeout {}s)",
        config.source.api_url, config.source.limit, config.source.timeout_secs
    );
    println!(
        "  Webhook: {}",
        config
            .masked_webhook_url()
            .unwrap_or_else(|| "<not set>".to_string())
    );
    println!(
        "  Monitor: every {}s, remembering {} tokens",
        config.monitor.poll_interval_secs, config.monitor.novelty_capacity
    );
    println!(
        "  Gate: volume >= {}, liquidity >= {}, holders >= {}",
        scoring.min_volume_threshold, scoring.min_liquidity_threshold, scoring.min_holder_count
    );
    println!(
        "  Weights: volume={} liquidity={} holders={} age={} (sum {:.2})",
        weights.volume,
        weights.liquidity,
        weights.holders,
        weights.age,
        weights.sum()
    );
    println!("  Alert threshold: {}", scoring.alert_score_threshold);
    println!(
        "  Telemetry: level={} format={:?} metrics_port={}",
        config.telemetry.log_level,
        config.telemetry.log_format,
        config
            .telemetry
            .metrics_port
            .map(|p| p.to_string())
            .unwrap_or_else(|| "off".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_dry_run() {
        let cli = Cli::try_parse_from(["boom-bot", "scan", "--dry-run"]).unwrap();
        assert_eq!(cli.config, "config.toml");
        match cli.command {
            Commands::Scan(args) => assert!(args.dry_run),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_score_with_config() {
        let cli =
            Cli::try_parse_from(["boom-bot", "-c", "alt.toml", "score", "tokens.json"]).unwrap();
        assert_eq!(cli.config, "alt.toml");
        match cli.command {
            Commands::Score(args) => assert_eq!(args.file.to_str(), Some("tokens.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_score_requires_file() {
        assert!(Cli::try_parse_from(["boom-bot", "score"]).is_err());
    }
}
