mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::analyze::AnalyzeArgs;
use commands::countries::CountriesArgs;
use commands::forecast::ForecastArgs;
use commands::report::ReportArgs;
use commands::risk::RiskArgs;

/// Market entry scoring and economic forecasting
#[derive(Parser)]
#[command(
    name = "mes",
    version,
    about = "Market entry scoring and economic forecasting",
    long_about = "Scores country risk profiles with fixed category weights, forecasts GDP, \
                  population, consumer spending and GDP growth five years ahead with \
                  trend exponential smoothing, and summarises market entry suitability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Dataset file (JSON or YAML); defaults to piped stdin, then the built-in data
    #[arg(long, global = true)]
    dataset: Option<String>,

    /// Analysis configuration file (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full market analysis for one or more countries
    Analyze(AnalyzeArgs),
    /// Print the console market report for one or more countries
    Report(ReportArgs),
    /// Weighted risk score and rating for a country
    Risk(RiskArgs),
    /// Five-year indicator forecasts for a country or an explicit series
    Forecast(ForecastArgs),
    /// List the countries in the dataset
    Countries(CountriesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Where the dataset and configuration come from.
pub struct Sources {
    pub dataset: Option<String>,
    pub config: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "market_entry_core=debug,market_entry_cli=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let sources = Sources {
        dataset: cli.dataset,
        config: cli.config,
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args, &sources),
        Commands::Report(args) => commands::report::run_report(args, &sources),
        Commands::Risk(args) => commands::risk::run_risk(args, &sources),
        Commands::Forecast(args) => commands::forecast::run_forecast(args, &sources),
        Commands::Countries(args) => commands::countries::run_countries(args, &sources),
        Commands::Version => {
            println!("mes {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        // Report output is printed by the command itself.
        Ok(serde_json::Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
