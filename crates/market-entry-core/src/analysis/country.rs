//! Per-country market entry analysis.
//!
//! Composes the risk scorer and the metric forecaster against a country's
//! snapshot. Only a missing snapshot fails the whole analysis; a missing
//! risk profile or a failed metric forecast leaves that field absent and
//! adds a warning.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::dataset::MarketDataset;
use crate::forecast::metrics::{self, ForecastResult, MetricForecasts};
use crate::risk::scoring::{self, RiskAssessment};
use crate::types::{Metric, Score, Unit};
use crate::MarketEntryResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Suitability bucket derived from the market score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketStatus {
    #[serde(rename = "Highly Suitable")]
    HighlySuitable,
    #[serde(rename = "Very Suitable")]
    VerySuitable,
    #[serde(rename = "Suitable")]
    Suitable,
    #[serde(rename = "Moderately Suitable")]
    ModeratelySuitable,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MarketStatus::HighlySuitable => "Highly Suitable",
            MarketStatus::VerySuitable => "Very Suitable",
            MarketStatus::Suitable => "Suitable",
            MarketStatus::ModeratelySuitable => "Moderately Suitable",
        };
        f.write_str(label)
    }
}

/// A current indicator value with its unit tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetric {
    pub metric: Metric,
    pub value: Decimal,
    pub unit: Unit,
}

impl CurrentMetric {
    /// Presentation string, e.g. `$4.23 Trillion USD`.
    pub fn display(&self) -> String {
        self.unit.format(self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryAnalysis {
    pub country: String,
    pub market_score: Score,
    pub status: MarketStatus,
    /// In GDP, Population, Consumer_Spending, Economic_Growth order
    pub current_metrics: Vec<CurrentMetric>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Absent when the risk profile is missing or invalid
    pub risk_analysis: Option<RiskAssessment>,
    /// Only metrics whose forecast succeeded
    pub forecasts: BTreeMap<Metric, ForecastResult>,
    /// One entry per degraded sub-computation
    pub warnings: Vec<String>,
}

impl CountryAnalysis {
    pub fn current_metric(&self, metric: Metric) -> Option<&CurrentMetric> {
        self.current_metrics.iter().find(|m| m.metric == metric)
    }
}

/// Runs the scoring and forecasting pipeline against a borrowed dataset.
#[derive(Debug, Clone, Copy)]
pub struct CountryAnalyzer<'a> {
    dataset: &'a MarketDataset,
    config: &'a AnalysisConfig,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl<'a> CountryAnalyzer<'a> {
    /// Validates the configuration once up front.
    pub fn new(dataset: &'a MarketDataset, config: &'a AnalysisConfig) -> MarketEntryResult<Self> {
        config.validate()?;
        Ok(CountryAnalyzer { dataset, config })
    }

    pub fn dataset(&self) -> &'a MarketDataset {
        self.dataset
    }

    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    pub fn calculate_risk_score(&self, country: &str) -> MarketEntryResult<RiskAssessment> {
        scoring::calculate_risk_score(self.dataset, country, &self.config.weights)
    }

    pub fn forecast_metrics(&self, country: &str) -> MarketEntryResult<MetricForecasts> {
        metrics::forecast_metrics(self.dataset, country, self.config)
    }

    /// Analyze one country. Fails with `NotFound` only when the country has
    /// no snapshot.
    pub fn analyze(&self, country: &str) -> MarketEntryResult<CountryAnalysis> {
        let snapshot = self.dataset.snapshot(country)?;
        let mut warnings: Vec<String> = Vec::new();

        let current_metrics = Metric::ALL
            .iter()
            .map(|metric| CurrentMetric {
                metric: *metric,
                value: snapshot.current_value(*metric),
                unit: metric.unit(),
            })
            .collect();

        let risk_analysis = match self.calculate_risk_score(country) {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                tracing::warn!(country, error = %e, "risk scoring skipped");
                warnings.push(format!("Risk assessment unavailable: {e}"));
                None
            }
        };

        let mut forecasts = BTreeMap::new();
        match self.forecast_metrics(country) {
            Ok(outcomes) => {
                for (metric, outcome) in outcomes {
                    match outcome {
                        Ok(result) => {
                            forecasts.insert(metric, result);
                        }
                        Err(e) => warnings.push(format!("{metric} forecast unavailable: {e}")),
                    }
                }
            }
            Err(e) => {
                tracing::warn!(country, error = %e, "forecasting skipped");
                warnings.push(format!("Forecasts unavailable: {e}"));
            }
        }

        Ok(CountryAnalysis {
            country: snapshot.country.clone(),
            market_score: snapshot.market_score,
            status: market_status(snapshot.market_score),
            current_metrics,
            strengths: snapshot.strengths.clone(),
            weaknesses: snapshot.weaknesses.clone(),
            risk_analysis,
            forecasts,
            warnings,
        })
    }
}

/// Map a market score to a status bucket.
///
/// Lower bounds are inclusive: >=88 Highly Suitable, >=82 Very Suitable,
/// >=75 Suitable, otherwise Moderately Suitable.
pub fn market_status(market_score: Score) -> MarketStatus {
    if market_score >= dec!(88) {
        MarketStatus::HighlySuitable
    } else if market_score >= dec!(82) {
        MarketStatus::VerySuitable
    } else if market_score >= dec!(75) {
        MarketStatus::Suitable
    } else {
        MarketStatus::ModeratelySuitable
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
