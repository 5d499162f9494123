//! Scan command implementation

use crate::config::Config;
use crate::monitor::{CycleReport, Monitor};
use crate::notify::{AlertSink, DiscordWebhook, DryRunSink};
use crate::source::PumpFunClient;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Log alerts instead of posting them to the webhook
    #[arg(long)]
    pub dry_run: bool,

    /// Print the cycle report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let source = PumpFunClient::new(&config.source)?;
        let sink: Arc<dyn AlertSink> = if self.dry_run {
            Arc::new(DryRunSink)
        } else {
            Arc::new(DiscordWebhook::new(config.webhook_url()?, &config.notifier)?)
        };

        let mut monitor = Monitor::new(config, Arc::new(source), sink);
        let report = monitor.run_cycle().await;

        if report.fetch_failed {
            anyhow::bail!("Upstream fetch failed, see log for details");
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &CycleReport) {
    println!(
        "Fetched {} records ({} skipped), {} new, {} below thresholds",
        report.fetched, report.skipped, report.fresh, report.gate_rejected
    );

    for token in &report.scored {
        let b = &token.score.breakdown;
        println!(
            "  {:>3} {:<10} {:<24} vol={} liq={} hold={} age={}{}",
            token.score.score,
            token.symbol,
            token.name,
            b.volume,
            b.liquidity,
            b.holders,
            b.age,
            if token.alert { "  ALERT" } else { "" }
        );
    }

    println!(
        "Alerts: {} triggered, {} sent, {} failed",
        report.alerts_triggered(),
        report.alerts_sent,
        report.alerts_failed
    );
}
