//! Polling loop
//!
//! One task drives fetch -> evaluate -> deliver on a fixed interval. A cycle
//! always runs to completion; shutdown is observed between cycles.

use super::{CycleReport, LoopState, Pipeline};
use crate::config::Config;
use crate::notify::AlertSink;
use crate::source::TokenSource;
use crate::telemetry::{
    increment, record_latency, record_score, set_gauge, CounterMetric, GaugeMetric,
    LatencyMetric,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Token launch monitor
pub struct Monitor {
    source: Arc<dyn TokenSource>,
    sink: Arc<dyn AlertSink>,
    pipeline: Pipeline,
    poll_interval: Duration,
    state: LoopState,
}

impl Monitor {
    pub fn new(config: &Config, source: Arc<dyn TokenSource>, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            source,
            sink,
            pipeline: Pipeline::new(config),
            poll_interval: Duration::from_secs(config.monitor.poll_interval_secs),
            state: LoopState::default(),
        }
    }

    /// Override the polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Run a single polling cycle
    ///
    /// Fetch and delivery failures are logged and counted; they never
    /// propagate out of the cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cycle_start = Instant::now();
        let now = Utc::now();

        let fetch_start = Instant::now();
        let fetched = self.source.fetch_recent().await;
        record_latency(LatencyMetric::UpstreamFetch, fetch_start.elapsed());

        let records = match fetched {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Upstream fetch failed");
                increment(CounterMetric::FetchFailures, 1);
                let report = CycleReport {
                    started_at: Some(now),
                    fetch_failed: true,
                    ..Default::default()
                };
                self.finish_cycle(report.clone(), cycle_start);
                return report;
            }
        };

        let (mut report, alerts) = self.pipeline.evaluate(&records, now);

        increment(CounterMetric::RecordsFetched, report.fetched as u64);
        increment(CounterMetric::RecordsSkipped, report.skipped as u64);
        increment(CounterMetric::NewTokens, report.fresh as u64);
        increment(CounterMetric::GateRejected, report.gate_rejected as u64);
        set_gauge(GaugeMetric::NoveltySetSize, self.pipeline.remembered() as f64);
        for scored in &report.scored {
            record_score(scored.score.score);
        }

        for alert in &alerts {
            let delivery_start = Instant::now();
            match self.sink.deliver(alert).await {
                Ok(()) => {
                    report.alerts_sent += 1;
                    increment(CounterMetric::AlertsSent, 1);
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        mint = %alert.token.mint,
                        symbol = %alert.token.symbol,
                        "Alert delivery failed"
                    );
                    report.alerts_failed += 1;
                    increment(CounterMetric::AlertsFailed, 1);
                }
            }
            record_latency(LatencyMetric::AlertDelivery, delivery_start.elapsed());
        }

        tracing::info!(
            fetched = report.fetched,
            fresh = report.fresh,
            scored = report.scored.len(),
            alerts = report.alerts_sent,
            "Cycle complete"
        );

        self.finish_cycle(report.clone(), cycle_start);
        report
    }

    fn finish_cycle(&mut self, report: CycleReport, started: Instant) {
        record_latency(LatencyMetric::Cycle, started.elapsed());
        increment(CounterMetric::CyclesCompleted, 1);
        self.state.record(report);
    }

    /// Poll until `shutdown` flips to `true`
    ///
    /// The first cycle runs immediately. Missed ticks are delayed, never
    /// bursted.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> LoopState {
        self.state.running = true;
        tracing::info!(
            interval_secs = self.poll_interval.as_secs_f64(),
            "Monitor started"
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    // sender dropped
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }

                _ = interval.tick() => {}
            }

            self.run_cycle().await;
        }

        self.state.running = false;
        tracing::info!(
            cycles = self.state.cycles_completed,
            alerts = self.state.alerts_sent,
            "Monitor stopped"
        );
        self.state.clone()
    }
}

/// Resolve once the process receives Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
