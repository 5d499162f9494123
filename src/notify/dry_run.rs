//! Sink that logs alerts instead of delivering them

use super::format::format_embed;
use super::{Alert, AlertSink};
use crate::error::TransportError;
use async_trait::async_trait;

/// Logs each alert embed at info level
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl AlertSink for DryRunSink {
    async fn deliver(&self, alert: &Alert) -> Result<(), TransportError> {
        let embed = format_embed(alert);
        let fields: Vec<String> = embed
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.name, f.value))
            .collect();

        tracing::info!(
            alert_id = %alert.id,
            title = %embed.title,
            fields = %fields.join(", "),
            "Dry run, alert not delivered"
        );
        Ok(())
    }
}
