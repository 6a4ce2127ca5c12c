use super::{OutputFormat, ui};
use crate::core::{CryptoListing, CurrencyTable, IndexListing};
use crate::providers::YahooFinanceScraper;
use anyhow::Result;
use comfy_table::Cell;

fn price(v: f64) -> String {
    format!("{v:.2}")
}

fn percent(v: f64) -> String {
    format!("{v:.2}%")
}

fn empty_notice(what: &str) -> String {
    ui::style_text(&format!("No {what} found"), ui::StyleType::Subtle)
}

pub fn render_currencies(table: &CurrencyTable, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(table)?);
    }
    if table.is_empty() {
        return Ok(empty_notice("currencies"));
    }

    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Base"),
        ui::header_cell("Quote"),
        ui::header_cell("Last Price"),
    ]);
    for (base, quotes) in table {
        for (quote, rate) in quotes {
            out.add_row(vec![
                Cell::new(base),
                Cell::new(quote),
                ui::format_optional_cell(Some(*rate), |r| format!("{r:.4}")),
            ]);
        }
    }

    Ok(format!(
        "{}\n\n{}",
        ui::style_text("Currencies", ui::StyleType::Title),
        out
    ))
}

pub fn render_indices(listing: &IndexListing, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(listing)?);
    }
    if listing.is_empty() {
        return Ok(empty_notice("indices"));
    }

    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Last Price"),
        ui::header_cell("Change"),
        ui::header_cell("% Change"),
    ]);
    for (symbol, record) in listing {
        out.add_row(vec![
            Cell::new(symbol),
            Cell::new(&record.name),
            ui::format_optional_cell(record.last_price, price),
            ui::change_cell(record.change, record.direction, price),
            ui::change_cell(record.percent_change, record.direction, percent),
        ]);
    }

    Ok(format!(
        "{}\n\n{}",
        ui::style_text("World Indices", ui::StyleType::Title),
        out
    ))
}

pub fn render_crypto(listing: &CryptoListing, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(listing)?);
    }
    if listing.is_empty() {
        return Ok(empty_notice("cryptocurrencies"));
    }

    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Last Price"),
        ui::header_cell("Change"),
        ui::header_cell("% Change"),
        ui::header_cell("Market Cap"),
    ]);
    for (symbol, record) in listing {
        out.add_row(vec![
            Cell::new(symbol),
            Cell::new(&record.name),
            ui::format_optional_cell(record.last_price, price),
            ui::change_cell(record.change, record.direction, price),
            ui::change_cell(record.percent_change, record.direction, percent),
            Cell::new(&record.market_cap),
        ]);
    }

    Ok(format!(
        "{}\n\n{}",
        ui::style_text("Crypto", ui::StyleType::Title),
        out
    ))
}

pub async fn run_currencies(scraper: &YahooFinanceScraper, format: OutputFormat) -> Result<()> {
    let pb = ui::new_spinner("Fetching currencies...");
    let table = scraper.scrape_currencies().await;
    pb.finish_and_clear();
    println!("{}", render_currencies(&table, format)?);
    Ok(())
}

pub async fn run_indices(scraper: &YahooFinanceScraper, format: OutputFormat) -> Result<()> {
    let pb = ui::new_spinner("Fetching world indices...");
    let listing = scraper.scrape_world_indices().await;
    pb.finish_and_clear();
    println!("{}", render_indices(&listing, format)?);
    Ok(())
}

pub async fn run_crypto(scraper: &YahooFinanceScraper, format: OutputFormat) -> Result<()> {
    let pb = ui::new_spinner("Fetching crypto...");
    let listing = scraper.scrape_crypto().await;
    pb.finish_and_clear();
    println!("{}", render_crypto(&listing, format)?);
    Ok(())
}
