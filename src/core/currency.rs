//! Exchange rates, quote symbols and currency conversion

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept in a converted amount.
pub const EXCHANGE_DECIMALS: u32 = 2;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Exact rate to multiply an amount in `from` by to get `to`.
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal>;
}

/// The two symbols a quote page is addressed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSymbol {
    /// Pair string used in the quote page path, e.g. `USDEUR=X`.
    pub url_symbol: String,
    /// `data-symbol` value of the live price element. USD-based pairs drop
    /// the base leg, so `USD -> EUR` is tagged `EUR=X`.
    pub lookup_symbol: String,
}

impl QuoteSymbol {
    pub fn new(from: &str, to: &str) -> Result<Self> {
        let from = normalize_code(from)?;
        let to = normalize_code(to)?;
        let url_symbol = format!("{from}{to}=X");
        let lookup_symbol = if from == "USD" {
            format!("{to}=X")
        } else {
            url_symbol.clone()
        };
        Ok(Self {
            url_symbol,
            lookup_symbol,
        })
    }
}

fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim().to_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("Invalid currency code: '{}'", code);
    }
    Ok(code)
}

/// Multiplies `amount` by `rate` and rounds half-to-even to exactly
/// [`EXCHANGE_DECIMALS`] places.
///
/// The amount enters decimal arithmetic through its shortest round-trip
/// text, so `10.005` is exactly 10.005 rather than its binary neighbour.
pub fn convert(rate: Decimal, amount: f64) -> Result<Decimal> {
    if !amount.is_finite() {
        bail!("Amount must be a finite number, got {}", amount);
    }
    let amount: Decimal = amount
        .to_string()
        .parse()
        .with_context(|| format!("Amount {amount} cannot be represented as a decimal"))?;
    let product = amount
        .checked_mul(rate)
        .with_context(|| format!("Overflow converting {amount} at rate {rate}"))?;
    let mut rounded =
        product.round_dp_with_strategy(EXCHANGE_DECIMALS, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(EXCHANGE_DECIMALS);
    Ok(rounded)
}

/// Resolves the `from -> to` rate and converts `amount` with it.
pub async fn perform_exchange(
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    from: &str,
    to: &str,
    amount: f64,
) -> Result<Decimal> {
    let rate = provider.get_exchange_rate(from, to).await?;
    convert(rate, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    struct FixedRate(Decimal);

    #[async_trait]
    impl ExchangeRateProvider for FixedRate {
        async fn get_exchange_rate(&self, _from: &str, _to: &str) -> Result<Decimal> {
            Ok(self.0)
        }
    }

    struct NoRate;

    #[async_trait]
    impl ExchangeRateProvider for NoRate {
        async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal> {
            bail!("No rate for {from}{to}")
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_quote_symbol_usd_base_drops_leg() {
        let symbol = QuoteSymbol::new("USD", "EUR").unwrap();
        assert_eq!(symbol.url_symbol, "USDEUR=X");
        assert_eq!(symbol.lookup_symbol, "EUR=X");
    }

    #[test]
    fn test_quote_symbol_non_usd_base() {
        let symbol = QuoteSymbol::new("EUR", "USD").unwrap();
        assert_eq!(symbol.url_symbol, "EURUSD=X");
        assert_eq!(symbol.lookup_symbol, "EURUSD=X");
    }

    #[test]
    fn test_quote_symbol_normalizes_case() {
        let symbol = QuoteSymbol::new(" usd", "gbp ").unwrap();
        assert_eq!(symbol.url_symbol, "USDGBP=X");
        assert_eq!(symbol.lookup_symbol, "GBP=X");
    }

    #[test]
    fn test_quote_symbol_rejects_invalid_codes() {
        assert!(QuoteSymbol::new("", "EUR").is_err());
        assert!(QuoteSymbol::new("EUR", "U\"SD").is_err());
        assert!(QuoteSymbol::new("EU1", "USD").is_err());
    }

    #[test]
    fn test_convert_uses_exact_decimal() {
        // 10.005 * 1.2 = 12.006
        assert_eq!(convert(dec("1.2"), 10.005).unwrap(), dec("12.01"));
        assert_eq!(convert(dec("0.9213"), 100.0).unwrap(), dec("92.13"));
    }

    #[test]
    fn test_convert_rounds_half_to_even() {
        assert_eq!(convert(dec("1"), 0.125).unwrap(), dec("0.12"));
        assert_eq!(convert(dec("1"), 0.135).unwrap(), dec("0.14"));
        assert_eq!(convert(dec("1"), 2.5).unwrap().to_string(), "2.50");
    }

    #[test]
    fn test_convert_rejects_non_finite_amount() {
        assert!(convert(dec("1.1"), f64::NAN).is_err());
        assert!(convert(dec("1.1"), f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_perform_exchange() {
        let provider = FixedRate(dec("0.8512"));
        let result = perform_exchange(&provider, "EUR", "GBP", 250.0)
            .await
            .unwrap();
        assert_eq!(result, dec("212.80"));
    }

    #[tokio::test]
    async fn test_perform_exchange_propagates_rate_error() {
        let result = perform_exchange(&NoRate, "EUR", "XXX", 1.0).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "No rate for EURXXX");
    }
}
