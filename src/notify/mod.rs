//! Alert notification
//!
//! Formats alerts as Discord embeds and delivers them to a webhook

mod discord;
mod dry_run;
mod format;
mod types;

pub use discord::DiscordWebhook;
pub use dry_run::DryRunSink;
pub use format::{
    format_age, format_embed, format_number, score_emoji, tier_color, Embed, EmbedField,
    EmbedFooter, EmbedImage, WebhookPayload,
};
pub use types::Alert;

use crate::error::TransportError;
use async_trait::async_trait;

/// Trait for alert delivery channels
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert
    async fn deliver(&self, alert: &Alert) -> Result<(), TransportError>;
}
