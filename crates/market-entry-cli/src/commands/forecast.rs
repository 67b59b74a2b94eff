use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use market_entry_core::forecast::metrics;
use market_entry_core::Metric;

use super::{prepare, ModelArgs};
use crate::Sources;

/// Arguments for indicator forecasting
#[derive(Args)]
pub struct ForecastArgs {
    /// Country whose historical series to forecast
    #[arg(long, short = 'c', conflicts_with = "values")]
    pub country: Option<String>,

    /// Single metric (GDP, Population, Consumer_Spending, Economic_Growth)
    #[arg(long)]
    pub metric: Option<Metric>,

    /// Comma-separated annual observations, earliest first (e.g. "1.2,1.3,1.5")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<Decimal>>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Serialize)]
struct CountryForecasts {
    country: String,
    forecasts: BTreeMap<Metric, metrics::ForecastResult>,
    failures: BTreeMap<Metric, String>,
}

pub fn run_forecast(args: ForecastArgs, sources: &Sources) -> Result<Value, Box<dyn std::error::Error>> {
    let (dataset, config) = prepare(sources, &args.model)?;

    if let Some(ref values) = args.values {
        let metric = args.metric.unwrap_or(Metric::Gdp);
        let result = metrics::forecast_series(metric, values, &config)?;
        return Ok(serde_json::to_value(result)?);
    }

    let Some(country) = args.country else {
        return Err("--country <name> or --values <v1,v2,...> required for forecasting".into());
    };

    if let Some(metric) = args.metric {
        let result = metrics::forecast_metric(&dataset, &country, metric, &config)?;
        return Ok(serde_json::to_value(result)?);
    }

    let mut forecasts = BTreeMap::new();
    let mut failures = BTreeMap::new();
    for (metric, outcome) in metrics::forecast_metrics(&dataset, &country, &config)? {
        match outcome {
            Ok(result) => {
                forecasts.insert(metric, result);
            }
            Err(e) => {
                failures.insert(metric, e.to_string());
            }
        }
    }

    Ok(serde_json::to_value(CountryForecasts {
        country,
        forecasts,
        failures,
    })?)
}
