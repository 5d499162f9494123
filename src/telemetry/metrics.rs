//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Upstream listing fetch
    UpstreamFetch,
    /// Webhook delivery
    AlertDelivery,
    /// Full polling cycle
    Cycle,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Completed polling cycles
    CyclesCompleted,
    /// Raw records returned by the upstream
    RecordsFetched,
    /// Records that could not be normalized
    RecordsSkipped,
    /// Tokens seen for the first time
    NewTokens,
    /// Tokens rejected by the admission gate
    GateRejected,
    /// Alerts delivered
    AlertsSent,
    /// Alerts that failed delivery
    AlertsFailed,
    /// Failed upstream fetches
    FetchFailures,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Identifiers currently retained by the novelty set
    NoveltySetSize,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::UpstreamFetch => "boombot_upstream_fetch_latency_ms",
        LatencyMetric::AlertDelivery => "boombot_alert_delivery_latency_ms",
        LatencyMetric::Cycle => "boombot_cycle_duration_ms",
    };

    ::metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}

/// Increment a counter
pub fn increment(metric: CounterMetric, value: u64) {
    let metric_name = match metric {
        CounterMetric::CyclesCompleted => "boombot_cycles_total",
        CounterMetric::RecordsFetched => "boombot_records_fetched_total",
        CounterMetric::RecordsSkipped => "boombot_records_skipped_total",
        CounterMetric::NewTokens => "boombot_new_tokens_total",
        CounterMetric::GateRejected => "boombot_gate_rejected_total",
        CounterMetric::AlertsSent => "boombot_alerts_sent_total",
        CounterMetric::AlertsFailed => "boombot_alerts_failed_total",
        CounterMetric::FetchFailures => "boombot_fetch_failures_total",
    };

    ::metrics::counter!(metric_name).increment(value);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::NoveltySetSize => "boombot_novelty_set_size",
    };

    ::metrics::gauge!(metric_name).set(value);
}

/// Record a composite trend score
pub fn record_score(score: u8) {
    ::metrics::histogram!("boombot_trend_score").record(f64::from(score));
}
