use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use market_entry_core::analysis::country::market_status;
use market_entry_core::MarketStatus;

use super::{prepare, ModelArgs};
use crate::Sources;

/// Arguments for listing dataset countries
#[derive(Args)]
pub struct CountriesArgs {
    /// Only countries at or above this market score
    #[arg(long)]
    pub min_score: Option<Decimal>,
}

#[derive(Serialize)]
struct CountryRow {
    country: String,
    market_score: Decimal,
    status: MarketStatus,
    has_history: bool,
    has_risk_profile: bool,
}

pub fn run_countries(args: CountriesArgs, sources: &Sources) -> Result<Value, Box<dyn std::error::Error>> {
    let (dataset, _) = prepare(sources, &ModelArgs::default())?;

    let rows: Vec<CountryRow> = dataset
        .snapshots
        .iter()
        .filter(|s| args.min_score.map_or(true, |min| s.market_score >= min))
        .map(|s| CountryRow {
            country: s.country.clone(),
            market_score: s.market_score,
            status: market_status(s.market_score),
            has_history: dataset.history(&s.country).is_ok(),
            has_risk_profile: dataset.risk_profile(&s.country).is_ok(),
        })
        .collect();

    Ok(serde_json::to_value(rows)?)
}
