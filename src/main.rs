use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxscrape::cli::OutputFormat;
use fxscrape::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxscrape::AppCommand {
    fn from(cmd: Commands) -> fxscrape::AppCommand {
        match cmd {
            Commands::Rate { from, to } => fxscrape::AppCommand::Rate { from, to },
            Commands::Exchange { from, to, amount } => {
                fxscrape::AppCommand::Exchange { from, to, amount }
            }
            Commands::Currencies => fxscrape::AppCommand::Currencies,
            Commands::Indices => fxscrape::AppCommand::Indices,
            Commands::Crypto => fxscrape::AppCommand::Crypto,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the exchange rate for a currency pair
    Rate {
        /// Currency to convert from, e.g. USD
        from: String,
        /// Currency to convert to, e.g. EUR
        to: String,
    },
    /// Convert an amount between currencies
    Exchange {
        /// Currency to convert from, e.g. EUR
        from: String,
        /// Currency to convert to, e.g. USD
        to: String,
        /// Amount to convert
        amount: f64,
    },
    /// List currency pair prices
    Currencies,
    /// List world index snapshots
    Indices,
    /// List cryptocurrency snapshots
    Crypto,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let result = match cli.command {
        Some(Commands::Setup) => fxscrape::cli::setup::setup(),
        Some(cmd) => fxscrape::run_command(cmd.into(), cli.config_path.as_deref(), format).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
