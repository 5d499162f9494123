//! Discord webhook delivery

use super::format::{format_embed, WebhookPayload};
use super::{Alert, AlertSink};
use crate::config::NotifierConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts alerts to a Discord channel webhook
pub struct DiscordWebhook {
    webhook_url: String,
    username: String,
    avatar_url: Option<String>,
    client: Client,
}

impl DiscordWebhook {
    /// Create a webhook client
    pub fn new(
        webhook_url: impl Into<String>,
        config: &NotifierConfig,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            webhook_url: webhook_url.into(),
            username: config.username.clone(),
            avatar_url: config
                .avatar_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            client,
        })
    }

    /// Build the webhook request body for an alert
    pub fn payload(&self, alert: &Alert) -> WebhookPayload {
        WebhookPayload {
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            embeds: vec![format_embed(alert)],
        }
    }
}

#[async_trait]
impl AlertSink for DiscordWebhook {
    async fn deliver(&self, alert: &Alert) -> Result<(), TransportError> {
        let payload = self.payload(alert);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        tracing::info!(
            alert_id = %alert.id,
            symbol = %alert.token.symbol,
            score = alert.score.score,
            "Alert sent"
        );
        Ok(())
    }
}
