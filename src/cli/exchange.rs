use super::{OutputFormat, ui};
use crate::core::ExchangeRateProvider;
use crate::core::currency;
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;

pub fn render_rate(from: &str, to: &str, rate: Decimal, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!(
            "1 {} = {} {}",
            from.to_uppercase(),
            ui::style_text(&rate.to_string(), ui::StyleType::Value),
            to.to_uppercase()
        ),
        OutputFormat::Json => json!({
            "from": from.to_uppercase(),
            "to": to.to_uppercase(),
            "rate": rate.to_string(),
        })
        .to_string(),
    }
}

pub fn render_exchange(
    from: &str,
    to: &str,
    amount: f64,
    converted: Decimal,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Table => format!(
            "{} {} = {} {}",
            amount,
            from.to_uppercase(),
            ui::style_text(&converted.to_string(), ui::StyleType::Value),
            to.to_uppercase()
        ),
        OutputFormat::Json => json!({
            "from": from.to_uppercase(),
            "to": to.to_uppercase(),
            "amount": amount,
            "converted": converted.to_string(),
        })
        .to_string(),
    }
}

pub async fn run_rate(
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let rate = provider.get_exchange_rate(from, to).await;
    pb.finish_and_clear();

    println!("{}", render_rate(from, to, rate?, format));
    Ok(())
}

pub async fn run_exchange(
    provider: &(dyn ExchangeRateProvider + Send + Sync),
    from: &str,
    to: &str,
    amount: f64,
    format: OutputFormat,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching exchange rate...");
    let converted = currency::perform_exchange(provider, from, to, amount).await;
    pb.finish_and_clear();

    println!("{}", render_exchange(from, to, amount, converted?, format));
    Ok(())
}
