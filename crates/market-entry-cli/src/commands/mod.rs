pub mod analyze;
pub mod countries;
pub mod forecast;
pub mod report;
pub mod risk;

use clap::Args;
use rust_decimal::Decimal;

use market_entry_core::{AnalysisConfig, FitMethod, MarketDataset};

use crate::{input, Sources};

/// Forecast model overrides shared by several commands
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Years ahead to forecast
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Calendar year of the first historical observation
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Fixed level smoothing coefficient (requires --beta)
    #[arg(long, requires = "beta")]
    pub alpha: Option<Decimal>,

    /// Fixed trend smoothing coefficient (requires --alpha)
    #[arg(long, requires = "alpha")]
    pub beta: Option<Decimal>,
}

impl ModelArgs {
    /// Apply the flags on top of a loaded configuration.
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(horizon) = self.horizon {
            config.horizon_years = horizon;
        }
        if let Some(year) = self.reference_year {
            config.reference_year = year;
        }
        if let (Some(alpha), Some(beta)) = (self.alpha, self.beta) {
            config.fit = FitMethod::Fixed { alpha, beta };
        }
        config
    }
}

/// Load dataset and configuration, apply overrides and validate.
pub fn prepare(
    sources: &Sources,
    model: &ModelArgs,
) -> Result<(MarketDataset, AnalysisConfig), Box<dyn std::error::Error>> {
    let dataset = input::load_dataset(&sources.dataset)?;
    let config = model.apply(input::load_config(&sources.config)?);
    config.validate()?;
    Ok((dataset, config))
}

/// Requested countries, or every dataset country when none were given.
pub fn resolve_countries(requested: &[String], dataset: &MarketDataset) -> Vec<String> {
    if requested.is_empty() {
        dataset.countries().map(str::to_string).collect()
    } else {
        requested.to_vec()
    }
}
