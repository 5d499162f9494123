//! boom-bot: pump.fun launch monitor with trend scoring and Discord alerts
//!
//! This library provides the core components for:
//! - Polling a token launch listing over HTTP
//! - Normalizing heterogeneous upstream records into signal tuples
//! - Bounded-memory deduplication across polling cycles
//! - Trend scoring with a configurable weighted model
//! - Alert decisions and Discord embed delivery
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod novelty;
pub mod source;
pub mod telemetry;
pub mod trend;
