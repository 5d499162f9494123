//! pump.fun listing client
//!
//! Fetches the most recent token launches. The payload shape varies between
//! providers, so records are returned as raw JSON and left to the normalizer.

use super::TokenSource;
use crate::config::SourceConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Keys under which wrapped payloads carry the record array
const WRAPPER_KEYS: &[&str] = &["result", "coins", "data", "tokens"];

/// HTTP client for the token listing endpoint
pub struct PumpFunClient {
    api_url: String,
    limit: u32,
    client: Client,
}

impl PumpFunClient {
    /// Create a client from the source configuration
    pub fn new(config: &SourceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            limit: config.limit,
            client,
        })
    }

    /// Endpoint this client polls
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl TokenSource for PumpFunClient {
    async fn fetch_recent(&self) -> Result<Vec<Value>, TransportError> {
        tracing::debug!(url = %self.api_url, limit = self.limit, "Fetching recent launches");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("limit", self.limit.to_string()),
                ("offset", "0".to_string()),
                ("sort", "created_timestamp".to_string()),
                ("order", "DESC".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_records(body)
    }
}

/// Pull the record array out of a listing response
///
/// Accepts a bare array or an object wrapping the array under one of
/// [`WRAPPER_KEYS`].
pub fn extract_records(body: Value) -> Result<Vec<Value>, TransportError> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| {
                TransportError::Malformed("object response without a record array".to_string())
            }),
        other => Err(TransportError::Malformed(format!(
            "expected array or object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
