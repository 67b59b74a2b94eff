//! Multi-country analysis: every requested country is attempted, and
//! unknown countries are reported instead of aborting the batch.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::country::{CountryAnalysis, CountryAnalyzer};
use crate::config::AnalysisConfig;
use crate::dataset::MarketDataset;
use crate::types::{with_metadata, ComputationOutput};
use crate::MarketEntryResult;

/// A country that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryFailure {
    pub country: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBatch {
    /// Successful analyses in request order
    pub analyses: Vec<CountryAnalysis>,
    pub failures: Vec<CountryFailure>,
}

impl MarketBatch {
    pub fn not_found(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.country.as_str())
    }
}

/// Analyze each country in order.
///
/// Only an invalid configuration fails the call; per-country failures are
/// collected in [`MarketBatch::failures`] and echoed as warnings.
pub fn analyze_markets<S: AsRef<str>>(
    dataset: &MarketDataset,
    countries: &[S],
    config: &AnalysisConfig,
) -> MarketEntryResult<ComputationOutput<MarketBatch>> {
    let start = Instant::now();
    let analyzer = CountryAnalyzer::new(dataset, config)?;

    let mut warnings: Vec<String> = Vec::new();
    let mut analyses = Vec::with_capacity(countries.len());
    let mut failures = Vec::new();

    for country in countries {
        let country = country.as_ref();
        tracing::debug!(country, "analyzing market");
        match analyzer.analyze(country) {
            Ok(analysis) => {
                warnings.extend(
                    analysis
                        .warnings
                        .iter()
                        .map(|w| format!("{}: {w}", analysis.country)),
                );
                analyses.push(analysis);
            }
            Err(e) => {
                tracing::warn!(country, error = %e, "country skipped");
                warnings.push(format!("{country}: {e}"));
                failures.push(CountryFailure {
                    country: country.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Weighted four-category risk score; Holt additive-trend exponential smoothing forecasts",
        config,
        warnings,
        elapsed,
        MarketBatch { analyses, failures },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::seed::seed_dataset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_batch_preserves_request_order() {
        let dataset = seed_dataset();
        let output =
            analyze_markets(&dataset, &["Canada", "Japan"], &AnalysisConfig::default()).unwrap();

        let names: Vec<&str> = output
            .result
            .analyses
            .iter()
            .map(|a| a.country.as_str())
            .collect();
        assert_eq!(names, vec!["Canada", "Japan"]);
        assert!(output.result.failures.is_empty());
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_unknown_country_does_not_abort_batch() {
        let dataset = seed_dataset();
        let countries = vec!["Japan".to_string(), "Germany".to_string(), "Brazil".to_string()];
        let output = analyze_markets(&dataset, &countries, &AnalysisConfig::default()).unwrap();

        assert_eq!(output.result.analyses.len(), 2);
        let missing: Vec<&str> = output.result.not_found().collect();
        assert_eq!(missing, vec!["Germany"]);
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].starts_with("Germany:"));
    }

    #[test]
    fn test_envelope_metadata() {
        let dataset = seed_dataset();
        let output = analyze_markets(&dataset, &["France"], &AnalysisConfig::default()).unwrap();

        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
        assert_eq!(output.assumptions["horizon_years"], 5);
    }

    #[test]
    fn test_invalid_config_fails_whole_call() {
        let dataset = seed_dataset();
        let config = AnalysisConfig {
            horizon_years: 0,
            ..AnalysisConfig::default()
        };
        assert!(analyze_markets(&dataset, &["Japan"], &config).is_err());
    }
}
