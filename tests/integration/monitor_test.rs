//! Integration tests for the polling monitor with mock collaborators

use async_trait::async_trait;
use boom_bot::config::Config;
use boom_bot::error::TransportError;
use boom_bot::monitor::Monitor;
use boom_bot::notify::{Alert, AlertSink};
use boom_bot::source::TokenSource;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Returns queued responses in order, then empty batches
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Value>, TransportError>>>,
    calls: Mutex<usize>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<Value>, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TokenSource for ScriptedSource {
    async fn fetch_recent(&self) -> Result<Vec<Value>, TransportError> {
        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Default)]
struct CollectingSink {
    delivered: Mutex<Vec<Alert>>,
    fail: bool,
}

impl CollectingSink {
    fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn mints(&self) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.token.mint.clone())
            .collect()
    }
}

#[async_trait]
impl AlertSink for CollectingSink {
    async fn deliver(&self, alert: &Alert) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Malformed("webhook rejected".to_string()));
        }
        self.delivered.lock().unwrap().push(alert.clone());
        Ok(())
    }
}

fn hot(mint: &str) -> Value {
    json!({
        "mint": mint,
        "name": format!("{mint} coin"),
        "symbol": mint.to_uppercase(),
        "created_timestamp": Utc::now().timestamp() - 1800,
        "volume24h": 100000,
        "liquidity": 50000,
        "holder_count": 150
    })
}

fn cold(mint: &str) -> Value {
    json!({
        "mint": mint,
        "created_timestamp": Utc::now().timestamp() - 86400,
        "volume24h": 100,
        "liquidity": 500,
        "holder_count": 5
    })
}

#[tokio::test]
async fn test_alerts_only_hot_tokens() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
        hot("alpha"),
        cold("beta"),
        hot("gamma"),
    ])]));
    let sink = Arc::new(CollectingSink::default());
    let mut monitor = Monitor::new(&Config::default(), source, sink.clone());

    let report = monitor.run_cycle().await;

    assert_eq!(report.fetched, 3);
    assert_eq!(report.fresh, 3);
    assert_eq!(report.gate_rejected, 1);
    assert_eq!(report.alerts_sent, 2);
    assert_eq!(sink.mints(), vec!["alpha", "gamma"]);
}

#[tokio::test]
async fn test_no_duplicate_alerts_across_cycles() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(vec![hot("alpha")]),
        Ok(vec![hot("alpha"), hot("delta")]),
        Ok(vec![hot("alpha"), hot("delta")]),
    ]));
    let sink = Arc::new(CollectingSink::default());
    let mut monitor = Monitor::new(&Config::default(), source, sink.clone());

    for _ in 0..3 {
        monitor.run_cycle().await;
    }

    assert_eq!(sink.mints(), vec!["alpha", "delta"]);
    assert_eq!(monitor.state().cycles_completed, 3);
    assert_eq!(monitor.state().alerts_sent, 2);
}

#[tokio::test]
async fn test_fetch_failure_yields_empty_cycle() {
    let source = Arc::new(ScriptedSource::new(vec![
        Err(TransportError::Malformed("unexpected body".to_string())),
        Ok(vec![hot("alpha")]),
    ]));
    let sink = Arc::new(CollectingSink::default());
    let mut monitor = Monitor::new(&Config::default(), source, sink.clone());

    let failed = monitor.run_cycle().await;
    assert!(failed.fetch_failed);
    assert_eq!(failed.alerts_sent, 0);

    // Loop keeps going after a failed fetch
    let recovered = monitor.run_cycle().await;
    assert!(!recovered.fetch_failed);
    assert_eq!(recovered.alerts_sent, 1);
    assert_eq!(monitor.state().cycles_completed, 2);
}

#[tokio::test]
async fn test_delivery_failure_still_marks_token_seen() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(vec![hot("alpha")]),
        Ok(vec![hot("alpha")]),
    ]));
    let sink = Arc::new(CollectingSink::failing());
    let mut monitor = Monitor::new(&Config::default(), source, sink);

    let first = monitor.run_cycle().await;
    assert_eq!(first.alerts_triggered(), 1);
    assert_eq!(first.alerts_failed, 1);
    assert_eq!(first.alerts_sent, 0);

    let second = monitor.run_cycle().await;
    assert_eq!(second.fresh, 0);
    assert_eq!(second.alerts_failed, 0);
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![hot("alpha")])]));
    let sink = Arc::new(CollectingSink::default());
    let mut monitor = Monitor::new(&Config::default(), source.clone(), sink.clone())
        .with_poll_interval(Duration::from_millis(20));

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(async move { monitor.run(rx).await });

    tokio::time::sleep(Duration::from_millis(70)).await;
    tx.send(true).unwrap();

    let state = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();

    assert!(!state.running);
    assert!(state.cycles_completed >= 1);
    assert_eq!(state.cycles_completed as usize, source.calls());
    assert_eq!(sink.mints(), vec!["alpha"]);
}

#[tokio::test]
async fn test_first_cycle_runs_immediately() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(vec![hot("alpha")])]));
    let sink = Arc::new(CollectingSink::default());
    let mut monitor = Monitor::new(&Config::default(), source.clone(), sink.clone())
        .with_poll_interval(Duration::from_secs(3600));

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(async move { monitor.run(rx).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(true).unwrap();
    let state = handle.await.unwrap();

    assert_eq!(state.cycles_completed, 1);
    assert_eq!(sink.mints(), vec!["alpha"]);
}
