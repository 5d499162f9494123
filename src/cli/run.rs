//! Run command implementation

use crate::config::Config;
use crate::monitor::{shutdown_signal, Monitor};
use crate::notify::DiscordWebhook;
use crate::source::PumpFunClient;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the poll interval (seconds)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let webhook_url = config.webhook_url()?;
        let source = PumpFunClient::new(&config.source)?;
        let sink = DiscordWebhook::new(webhook_url, &config.notifier)?;

        tracing::info!(
            source = %source.api_url(),
            threshold = config.scoring.alert_score_threshold,
            "Starting launch monitor"
        );

        let mut monitor = Monitor::new(config, Arc::new(source), Arc::new(sink));
        if let Some(secs) = self.interval {
            anyhow::ensure!(secs > 0, "--interval must be greater than zero");
            monitor = monitor.with_poll_interval(Duration::from_secs(secs));
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown requested, finishing current cycle");
            let _ = shutdown_tx.send(true);
        });

        let state = monitor.run(shutdown_rx).await;
        tracing::info!(
            cycles = state.cycles_completed,
            alerts = state.alerts_sent,
            "Shutdown complete"
        );
        Ok(())
    }
}
