//! Discord embed formatting

use super::Alert;
use crate::trend::ScoreTier;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

const DEFAULT_DESCRIPTION: &str = "New meme coin detected!";
const FOOTER_TEXT: &str = "Boom Bot - Pump.fun Monitor";

/// Webhook request body
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<Embed>,
}

/// A single Discord embed
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    pub footer: EmbedFooter,
    /// ISO-8601
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl EmbedField {
    fn new(name: &str, value: String, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline,
        }
    }
}

/// Render an alert as a Discord embed
pub fn format_embed(alert: &Alert) -> Embed {
    let token = &alert.token;
    let score = &alert.score;

    let breakdown = format!(
        "Volume: {} | Liquidity: {} | Holders: {} | Age: {}",
        score.breakdown.volume,
        score.breakdown.liquidity,
        score.breakdown.holders,
        score.breakdown.age
    );

    let fields = vec![
        EmbedField::new(
            "📊 Trend Score",
            format!("**{}/100** {}", score.score, score_emoji(score.tier())),
            true,
        ),
        EmbedField::new("⏰ Age", format_age(alert.age_secs), true),
        EmbedField::new("👥 Holders", token.holder_count.to_string(), true),
        EmbedField::new(
            "💰 24h Volume",
            format!("${}", format_number(token.volume_24h)),
            true,
        ),
        EmbedField::new(
            "💧 Liquidity",
            format!("${}", format_number(token.liquidity)),
            true,
        ),
        EmbedField::new(
            "📈 Market Cap",
            format!(
                "${}",
                format_number(token.market_cap.unwrap_or(Decimal::ZERO))
            ),
            true,
        ),
        EmbedField::new("🔍 Score Breakdown", breakdown, false),
        EmbedField::new("🔗 Contract Address", format!("`{}`", token.mint), false),
    ];

    Embed {
        title: format!("🚀 {} ({})", token.name, token.symbol),
        description: token
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        color: tier_color(score.tier()),
        fields,
        thumbnail: token
            .image_uri
            .as_ref()
            .map(|url| EmbedImage { url: url.clone() }),
        footer: EmbedFooter {
            text: FOOTER_TEXT.to_string(),
        },
        timestamp: alert.timestamp.to_rfc3339(),
    }
}

/// Embed color for a score tier
pub fn tier_color(tier: ScoreTier) -> u32 {
    match tier {
        ScoreTier::Hot => 0x00ff00,
        ScoreTier::Warm => 0xffff00,
        ScoreTier::Moderate => 0xffa500,
        ScoreTier::Low => 0xff0000,
    }
}

pub fn score_emoji(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Hot => "🔥🔥🔥",
        ScoreTier::Warm => "🔥🔥",
        ScoreTier::Moderate => "🔥",
        ScoreTier::Low => "📊",
    }
}

/// Human-readable age: `2d 3h`, `4h 12m`, `7m` or `42s`
pub fn format_age(age_secs: u64) -> String {
    let minutes = age_secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", age_secs)
    }
}

/// Two-decimal magnitude with K/M/B suffix
pub fn format_number(value: Decimal) -> String {
    let (scaled, suffix) = if value >= dec!(1000000000) {
        (value / dec!(1000000000), "B")
    } else if value >= dec!(1000000) {
        (value / dec!(1000000), "M")
    } else if value >= dec!(1000) {
        (value / dec!(1000), "K")
    } else {
        (value, "")
    };

    let rounded = scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}{}", rounded, suffix)
}
