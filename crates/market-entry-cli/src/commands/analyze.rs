use clap::Args;
use serde_json::Value;

use market_entry_core::analyze_markets;

use super::{prepare, resolve_countries, ModelArgs};
use crate::Sources;

/// Arguments for full market analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Countries to analyze (repeat or comma-separate); all when omitted
    #[arg(long = "country", short = 'c', value_delimiter = ',')]
    pub countries: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

pub fn run_analyze(args: AnalyzeArgs, sources: &Sources) -> Result<Value, Box<dyn std::error::Error>> {
    let (dataset, config) = prepare(sources, &args.model)?;
    let countries = resolve_countries(&args.countries, &dataset);
    let output = analyze_markets(&dataset, &countries, &config)?;
    Ok(serde_json::to_value(output)?)
}
