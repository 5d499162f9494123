//! Signal normalizer
//!
//! Maps loosely-typed upstream records onto [`SignalTuple`]. Every logical
//! attribute has an ordered list of candidate field paths; the first path that
//! yields a usable value wins. Malformed fields fall back to defaults and never
//! fail the record, only a missing identifier does.

use super::SignalTuple;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder for a missing display name
pub const UNKNOWN_NAME: &str = "Unknown";
/// Placeholder for a missing display symbol
pub const UNKNOWN_SYMBOL: &str = "N/A";

/// Epoch values above this are interpreted as milliseconds
const EPOCH_MILLIS_CUTOFF: i64 = 100_000_000_000;

/// A sequence of object keys, e.g. `["volume", "h24"]` for `volume.h24`
pub type FieldPath = &'static [&'static str];

/// How a creation-time field is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Epoch number (or numeric string), seconds or milliseconds
    Epoch,
    /// Date string (RFC 3339 or `YYYY-MM-DD HH:MM:SS`), numeric strings accepted
    DateString,
    /// Block timestamp, either epoch or date string
    Block,
}

/// One creation-time extraction strategy
#[derive(Debug, Clone, Copy)]
pub struct TimestampRule {
    pub path: FieldPath,
    pub encoding: TimeEncoding,
}

/// Ordered field paths per attribute
#[derive(Debug, Clone)]
pub struct FieldPrecedence {
    pub identifier: &'static [FieldPath],
    pub name: &'static [FieldPath],
    pub symbol: &'static [FieldPath],
    pub description: &'static [FieldPath],
    pub image: &'static [FieldPath],
    pub volume_24h: &'static [FieldPath],
    pub liquidity: &'static [FieldPath],
    pub holders: &'static [FieldPath],
    pub market_cap: &'static [FieldPath],
    pub price_change_24h: &'static [FieldPath],
    pub created_at: &'static [TimestampRule],
}

/// Aliases seen across pump.fun, Moralis and DexScreener style payloads
pub const DEFAULT_PRECEDENCE: FieldPrecedence = FieldPrecedence {
    identifier: &[
        &["mint"],
        &["address"],
        &["tokenAddress"],
        &["token_address"],
        &["baseToken", "address"],
    ],
    name: &[&["name"], &["baseToken", "name"]],
    symbol: &[&["symbol"], &["baseToken", "symbol"]],
    description: &[&["description"]],
    image: &[&["image_uri"], &["image"], &["logo"], &["info", "imageUrl"]],
    volume_24h: &[
        &["volume24h"],
        &["volume_24h"],
        &["volume", "h24"],
        // pump.fun listings carry no volume; market cap is the closest proxy
        &["usd_market_cap"],
    ],
    liquidity: &[
        &["liquidity"],
        &["liquidity", "usd"],
        &["liquidityUsd"],
        &["virtual_sol_reserves"],
    ],
    holders: &[&["holder_count"], &["holders"], &["holderCount"]],
    market_cap: &[
        &["usd_market_cap"],
        &["marketCap"],
        &["market_cap"],
        &["fullyDilutedValuation"],
    ],
    price_change_24h: &[
        &["price_change_24h"],
        &["priceChange24h"],
        &["priceChange", "h24"],
    ],
    created_at: &[
        TimestampRule {
            path: &["created_timestamp"],
            encoding: TimeEncoding::Epoch,
        },
        TimestampRule {
            path: &["createdAt"],
            encoding: TimeEncoding::DateString,
        },
        TimestampRule {
            path: &["created_at"],
            encoding: TimeEncoding::DateString,
        },
        TimestampRule {
            path: &["block", "timestamp"],
            encoding: TimeEncoding::Block,
        },
        TimestampRule {
            path: &["blockTimestamp"],
            encoding: TimeEncoding::Block,
        },
    ],
};

/// Record-level normalization failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Record is not a JSON object
    #[error("record is not an object")]
    NotAnObject,
    /// No identifier path produced a value
    #[error("record has no token identifier")]
    MissingIdentifier,
}

/// Result of normalizing a whole batch
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Successfully normalized tuples, in input order
    pub tuples: Vec<SignalTuple>,
    /// Records dropped because they could not be keyed
    pub skipped: usize,
}

/// Maps raw upstream records to signal tuples
#[derive(Debug, Clone)]
pub struct Normalizer {
    precedence: FieldPrecedence,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRECEDENCE)
    }
}

impl Normalizer {
    /// Create a normalizer with a custom precedence table
    pub fn new(precedence: FieldPrecedence) -> Self {
        Self { precedence }
    }

    /// Normalize one record observed at `now`
    pub fn normalize(
        &self,
        record: &Value,
        now: DateTime<Utc>,
    ) -> Result<SignalTuple, NormalizeError> {
        if !record.is_object() {
            return Err(NormalizeError::NotAnObject);
        }
        let p = &self.precedence;

        let mint = first_text(record, p.identifier).ok_or(NormalizeError::MissingIdentifier)?;

        Ok(SignalTuple {
            mint,
            name: first_text(record, p.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            symbol: first_text(record, p.symbol).unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            description: first_text(record, p.description),
            image_uri: first_text(record, p.image),
            created_at: first_timestamp(record, p.created_at).unwrap_or(now),
            volume_24h: non_negative(first_decimal(record, p.volume_24h)),
            liquidity: non_negative(first_decimal(record, p.liquidity)),
            holder_count: first_decimal(record, p.holders)
                .map(|d| d.trunc().max(Decimal::ZERO).to_u64().unwrap_or(u64::MAX))
                .unwrap_or(0),
            market_cap: first_decimal(record, p.market_cap).map(|d| d.max(Decimal::ZERO)),
            price_change_24h: first_decimal(record, p.price_change_24h),
        })
    }

    /// Normalize a batch, skipping records that cannot be keyed
    pub fn normalize_batch(&self, records: &[Value], now: DateTime<Utc>) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();
        for (index, record) in records.iter().enumerate() {
            match self.normalize(record, now) {
                Ok(tuple) => batch.tuples.push(tuple),
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping upstream record");
                    batch.skipped += 1;
                }
            }
        }
        batch
    }
}

fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(record, |node, key| node.get(key))
}

fn first_text(record: &Value, paths: &[FieldPath]) -> Option<String> {
    paths.iter().find_map(|path| match lookup(record, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn first_decimal(record: &Value, paths: &[FieldPath]) -> Option<Decimal> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(as_decimal))
}

fn first_timestamp(record: &Value, rules: &[TimestampRule]) -> Option<DateTime<Utc>> {
    rules.iter().find_map(|rule| {
        let value = lookup(record, rule.path)?;
        match rule.encoding {
            TimeEncoding::Epoch => parse_epoch(value),
            TimeEncoding::DateString => parse_date(value),
            TimeEncoding::Block => parse_epoch(value).or_else(|| parse_date(value)),
        }
    })
}

fn non_negative(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

/// Parse a JSON number or numeric string
fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
        .or_else(|| parse_out_of_range(s))
}

/// Numeric text outside `Decimal` range saturates instead of being dropped
fn parse_out_of_range(s: &str) -> Option<Decimal> {
    let f = s.parse::<f64>().ok().filter(|f| !f.is_nan())?;
    if let Some(d) = Decimal::from_f64(f) {
        return Some(d);
    }
    Some(match f {
        f if f >= 1.0 => Decimal::MAX,
        f if f <= -1.0 => Decimal::MIN,
        _ => Decimal::ZERO,
    })
}

fn epoch_to_datetime(raw: i64) -> Option<DateTime<Utc>> {
    if raw.unsigned_abs() > EPOCH_MILLIS_CUTOFF.unsigned_abs() {
        Utc.timestamp_millis_opt(raw).single()
    } else {
        Utc.timestamp_opt(raw, 0).single()
    }
}

fn parse_epoch(value: &Value) -> Option<DateTime<Utc>> {
    let raw = match value {
        Value::Number(n) => match n.as_i64() {
            Some(raw) => raw,
            None => {
                let f = n.as_f64()?.trunc();
                if !f.is_finite() || f.abs() >= i64::MAX as f64 {
                    return None;
                }
                f as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    epoch_to_datetime(raw)
}

fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(raw) = s.parse::<i64>() {
        return epoch_to_datetime(raw);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
