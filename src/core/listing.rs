//! Listing record types and their assembly from extracted rows

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

use super::extract::Row;

/// Base currency -> quote currency -> last price.
pub type CurrencyTable = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
}

impl ChangeDirection {
    /// Classifies raw change text by the presence of a `+` glyph.
    ///
    /// Anything without one is `Negative`, including unparseable text such
    /// as `"N/A"`. This mirrors how the listing pages have always been read
    /// and is not a numeric judgement.
    pub fn from_change_text(text: &str) -> Self {
        if text.contains('+') {
            ChangeDirection::Positive
        } else {
            ChangeDirection::Negative
        }
    }
}

impl Display for ChangeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChangeDirection::Positive => "positive",
                ChangeDirection::Negative => "negative",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexRecord {
    pub name: String,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub direction: ChangeDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoRecord {
    pub name: String,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub direction: ChangeDirection,
    pub market_cap: String,
}

pub type IndexListing = BTreeMap<String, IndexRecord>;
pub type CryptoListing = BTreeMap<String, CryptoRecord>;

/// Folds `BASE/QUOTE` rows into a nested table. A repeated base currency
/// extends its existing inner map.
pub fn build_currency_table(rows: &[Row]) -> CurrencyTable {
    let mut table = CurrencyTable::new();
    for row in rows {
        let name = row.text("name").unwrap_or_default();
        let Some((base, quote)) = split_pair(name) else {
            debug!(name, "Skipping currency row with malformed pair name");
            continue;
        };
        let Some(price) = row.number("last_price") else {
            debug!(name, "Skipping currency row without a numeric price");
            continue;
        };
        table
            .entry(base.to_string())
            .or_default()
            .insert(quote.to_string(), price);
    }
    table
}

fn split_pair(name: &str) -> Option<(&str, &str)> {
    let mut legs = name.split('/');
    match (legs.next(), legs.next(), legs.next()) {
        (Some(base), Some(quote), None) if !base.trim().is_empty() && !quote.trim().is_empty() => {
            Some((base.trim(), quote.trim()))
        }
        _ => None,
    }
}

pub fn build_index_listing(rows: &[Row]) -> IndexListing {
    rows.iter()
        .filter_map(|row| {
            let symbol = row.text("symbol")?.to_string();
            let (change, direction) = row.signed("change");
            let record = IndexRecord {
                name: row.text("name").unwrap_or_default().to_string(),
                last_price: row.number("last_price"),
                change,
                percent_change: row.number("percent_change"),
                direction,
            };
            Some((symbol, record))
        })
        .collect()
}

pub fn build_crypto_listing(rows: &[Row]) -> CryptoListing {
    rows.iter()
        .filter_map(|row| {
            let symbol = row.text("symbol")?.to_string();
            let (change, direction) = row.signed("change");
            let record = CryptoRecord {
                name: row.text("name").unwrap_or_default().to_string(),
                last_price: row.number("last_price"),
                change,
                percent_change: row.number("percent_change"),
                direction,
                market_cap: row.text("market_cap").unwrap_or_default().to_string(),
            };
            Some((symbol, record))
        })
        .collect()
}
