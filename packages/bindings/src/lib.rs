use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use market_entry_core::dataset::seed::seed_dataset;
use market_entry_core::{AnalysisConfig, CountryAnalyzer, MarketDataset, Metric};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse and validate an optional dataset, falling back to the built-in one.
fn load_dataset(dataset_json: Option<String>) -> NapiResult<MarketDataset> {
    match dataset_json {
        Some(json) => MarketDataset::from_json_str(&json).map_err(to_napi_error),
        None => Ok(seed_dataset()),
    }
}

fn load_config(config_json: Option<String>) -> NapiResult<AnalysisConfig> {
    let config: AnalysisConfig = match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => AnalysisConfig::default(),
    };
    config.validate().map_err(to_napi_error)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// `countries_json` is a JSON array of country names; an empty array
/// analyzes every country in the dataset.
#[napi]
pub fn analyze_markets(
    countries_json: String,
    config_json: Option<String>,
    dataset_json: Option<String>,
) -> NapiResult<String> {
    let mut countries: Vec<String> = serde_json::from_str(&countries_json).map_err(to_napi_error)?;
    let dataset = load_dataset(dataset_json)?;
    let config = load_config(config_json)?;
    if countries.is_empty() {
        countries = dataset.countries().map(str::to_string).collect();
    }
    let output = market_entry_core::analyze_markets(&dataset, &countries, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_country(
    country: String,
    config_json: Option<String>,
    dataset_json: Option<String>,
) -> NapiResult<String> {
    let dataset = load_dataset(dataset_json)?;
    let config = load_config(config_json)?;
    let analyzer = CountryAnalyzer::new(&dataset, &config).map_err(to_napi_error)?;
    let analysis = analyzer.analyze(&country).map_err(to_napi_error)?;
    serde_json::to_string(&analysis).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_risk_score(
    country: String,
    config_json: Option<String>,
    dataset_json: Option<String>,
) -> NapiResult<String> {
    let dataset = load_dataset(dataset_json)?;
    let config = load_config(config_json)?;
    let assessment =
        market_entry_core::risk::scoring::calculate_risk_score(&dataset, &country, &config.weights)
            .map_err(to_napi_error)?;
    serde_json::to_string(&assessment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Forecasting
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ForecastSeriesInput {
    metric: Metric,
    values: Vec<Decimal>,
    #[serde(default)]
    config: AnalysisConfig,
}

/// Input: `{"metric": "GDP", "values": ["4.5", "4.6", ...], "config": {...}}`.
#[napi]
pub fn forecast_series(input_json: String) -> NapiResult<String> {
    let input: ForecastSeriesInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    input.config.validate().map_err(to_napi_error)?;
    let output = market_entry_core::forecast::metrics::forecast_series(input.metric, &input.values, &input.config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
