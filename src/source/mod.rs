//! Upstream token data
//!
//! Fetches recent launches and normalizes them into signal tuples

mod normalizer;
mod pumpfun;
mod types;

pub use normalizer::{
    FieldPath, FieldPrecedence, NormalizeError, NormalizedBatch, Normalizer, TimeEncoding,
    TimestampRule, DEFAULT_PRECEDENCE, UNKNOWN_NAME, UNKNOWN_SYMBOL,
};
pub use pumpfun::{extract_records, PumpFunClient};
pub use types::SignalTuple;

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for upstream launch listings
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch the most recent raw token records
    async fn fetch_recent(&self) -> Result<Vec<Value>, TransportError>;
}
