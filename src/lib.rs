pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::OutputFormat;
use crate::core::config::AppConfig;
use crate::providers::YahooFinanceScraper;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Rate { from: String, to: String },
    Exchange { from: String, to: String, amount: f64 },
    Currencies,
    Indices,
    Crypto,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path)?;
    debug!("Loaded config: {config:#?}");

    let scraper = YahooFinanceScraper::from_config(&config)?;
    info!("{} starting against {}", scraper, config.base_url());

    match command {
        AppCommand::Rate { from, to } => cli::exchange::run_rate(&scraper, &from, &to, format).await,
        AppCommand::Exchange { from, to, amount } => {
            cli::exchange::run_exchange(&scraper, &from, &to, amount, format).await
        }
        AppCommand::Currencies => cli::listing::run_currencies(&scraper, format).await,
        AppCommand::Indices => cli::listing::run_indices(&scraper, format).await,
        AppCommand::Crypto => cli::listing::run_crypto(&scraper, format).await,
    }
}
