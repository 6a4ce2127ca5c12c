use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

use super::http::PageFetcher;
use crate::core::config::AppConfig;
use crate::core::currency::{self, ExchangeRateProvider, QuoteSymbol};
use crate::core::extract::{Row, extract_rows};
use crate::core::listing::{
    CryptoListing, CurrencyTable, IndexListing, build_crypto_listing, build_currency_table,
    build_index_listing,
};
use crate::core::shape::{self, PageShape};

/// Reads the live price of `lookup_symbol` from a quote page.
///
/// Uses the element's machine-readable `value` attribute rather than its
/// formatted text.
fn parse_quote_price(body: &str, lookup_symbol: &str) -> Result<Decimal> {
    let document = Html::parse_document(body);
    let css = format!(r#"[data-field="regularMarketPrice"][data-symbol="{lookup_symbol}"]"#);
    let selector = Selector::parse(&css)
        .map_err(|e| anyhow!("Invalid price selector for {}: {}", lookup_symbol, e))?;

    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| anyhow!("No market price found for symbol: {}", lookup_symbol))?;
    let value = element
        .value()
        .attr("value")
        .ok_or_else(|| anyhow!("Market price for {} has no value", lookup_symbol))?;

    let rate = Decimal::from_str(value.trim())
        .or_else(|_| Decimal::from_scientific(value.trim()))
        .with_context(|| format!("Failed to parse market price '{value}' for {lookup_symbol}"))?;
    if rate <= Decimal::ZERO {
        bail!("Non-positive market price '{value}' for {lookup_symbol}");
    }
    Ok(rate)
}

/// Scrapes Yahoo Finance quote and listing pages.
pub struct YahooFinanceScraper {
    base_url: String,
    fetcher: PageFetcher,
}

impl YahooFinanceScraper {
    pub fn new(base_url: &str, fetcher: PageFetcher) -> Self {
        YahooFinanceScraper {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.http)?;
        Ok(Self::new(config.base_url(), fetcher))
    }

    fn quote_url(&self, symbol: &QuoteSymbol) -> String {
        format!("{}/quote/{}/", self.base_url, symbol.url_symbol)
    }

    fn listing_url(&self, shape: &PageShape) -> String {
        format!("{}/{}/", self.base_url, shape.name)
    }

    pub async fn perform_exchange(&self, from: &str, to: &str, amount: f64) -> Result<Decimal> {
        currency::perform_exchange(self, from, to, amount).await
    }

    /// Fetches a listing page and extracts its rows. Transport failures are
    /// logged and read as an empty page.
    async fn scrape_listing(&self, shape: &PageShape) -> Vec<Row> {
        let url = self.listing_url(shape);
        match self.fetcher.fetch(&url).await {
            Ok(body) => extract_rows(&Html::parse_document(&body), shape),
            Err(e) => {
                warn!(listing = shape.name, error = %e, "Listing fetch failed, returning no rows");
                Vec::new()
            }
        }
    }

    #[instrument(name = "YahooCurrencies", skip(self))]
    pub async fn scrape_currencies(&self) -> CurrencyTable {
        let rows = self.scrape_listing(&shape::CURRENCIES).await;
        build_currency_table(&rows)
    }

    #[instrument(name = "YahooWorldIndices", skip(self))]
    pub async fn scrape_world_indices(&self) -> IndexListing {
        let rows = self.scrape_listing(&shape::WORLD_INDICES).await;
        build_index_listing(&rows)
    }

    #[instrument(name = "YahooCrypto", skip(self))]
    pub async fn scrape_crypto(&self) -> CryptoListing {
        let rows = self.scrape_listing(&shape::CRYPTO).await;
        build_crypto_listing(&rows)
    }
}

impl Display for YahooFinanceScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Web Scraper for Yahoo Finance")
    }
}

#[async_trait]
impl ExchangeRateProvider for YahooFinanceScraper {
    #[instrument(
        name = "YahooRateFetch",
        skip(self),
        fields(pair = %format!("{from}/{to}"))
    )]
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let symbol = QuoteSymbol::new(from, to)?;
        let url = self.quote_url(&symbol);

        let body = self
            .fetcher
            .fetch(&url)
            .await
            .with_context(|| format!("Failed to fetch quote page for {}", symbol.url_symbol))?;

        let rate = parse_quote_price(&body, &symbol.lookup_symbol)?;
        debug!(%rate, symbol = %symbol.lookup_symbol, "Resolved exchange rate");
        Ok(rate)
    }
}
