use clap::Args;
use serde_json::Value;

use market_entry_core::analyze_markets;

use super::{prepare, resolve_countries, ModelArgs};
use crate::output::report;
use crate::Sources;

/// Arguments for the console market report
#[derive(Args)]
pub struct ReportArgs {
    /// Countries to report on (repeat or comma-separate); all when omitted
    #[arg(long = "country", short = 'c', value_delimiter = ',')]
    pub countries: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Prints the report directly; returns `Value::Null` so nothing else is printed.
pub fn run_report(args: ReportArgs, sources: &Sources) -> Result<Value, Box<dyn std::error::Error>> {
    let (dataset, config) = prepare(sources, &args.model)?;
    let countries = resolve_countries(&args.countries, &dataset);

    println!("\nAnalyzing countries: {}", countries.join(", "));
    let output = analyze_markets(&dataset, &countries, &config)?;

    for analysis in &output.result.analyses {
        report::print_market_report(analysis, config.horizon_years);
    }
    report::print_failures(&output.result.failures);

    Ok(Value::Null)
}
