use clap::Args;
use serde_json::Value;

use market_entry_core::risk::scoring;

use super::{prepare, ModelArgs};
use crate::Sources;

/// Arguments for country risk scoring
#[derive(Args)]
pub struct RiskArgs {
    /// Country to score
    #[arg(long, short = 'c')]
    pub country: String,
}

pub fn run_risk(args: RiskArgs, sources: &Sources) -> Result<Value, Box<dyn std::error::Error>> {
    let (dataset, config) = prepare(sources, &ModelArgs::default())?;
    let assessment = scoring::calculate_risk_score(&dataset, &args.country, &config.weights)?;
    Ok(serde_json::to_value(assessment)?)
}
