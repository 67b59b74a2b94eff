//! Per-metric forecasts: Holt projection, growth rate and trend label.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::AnalysisConfig;
use crate::dataset::MarketDataset;
use crate::error::MarketEntryError;
use crate::forecast::smoothing::{self, SmoothingParams};
use crate::types::{Metric, Percent};
use crate::MarketEntryResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl Trend {
    /// `Increasing` only for a strictly positive growth rate.
    pub fn from_growth_rate(growth_rate: Percent) -> Self {
        if growth_rate > Decimal::ZERO {
            Trend::Increasing
        } else {
            Trend::Decreasing
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => f.write_str("Increasing"),
            Trend::Decreasing => f.write_str("Decreasing"),
        }
    }
}

/// One projected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub year: i32,
    /// Year-end date of the period
    pub period_end: NaiveDate,
    pub value: Decimal,
}

/// Fitted smoothing model behind a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub method: String,
    pub params: SmoothingParams,
    pub level: Decimal,
    pub trend: Decimal,
    pub sse: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub metric: Metric,
    /// Last historical observation
    pub current_value: Decimal,
    /// Projected value `horizon_years` after the last observation
    pub forecasted_value: Decimal,
    /// (forecasted / current - 1) * 100
    pub growth_rate: Percent,
    pub trend: Trend,
    pub horizon_years: u32,
    pub last_observed_year: i32,
    pub forecast_year: i32,
    pub projection: Vec<ProjectedPoint>,
    pub model: ModelSummary,
}

/// Per-metric outcomes for one country; a failed metric does not affect
/// the others.
pub type MetricForecasts = BTreeMap<Metric, MarketEntryResult<ForecastResult>>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Forecast a single historical series (earliest observation first).
pub fn forecast_series(
    metric: Metric,
    series: &[Decimal],
    config: &AnalysisConfig,
) -> MarketEntryResult<ForecastResult> {
    config.validate()?;

    let fitter = smoothing::fitter_for(&config.fit);
    let fit = smoothing::fit_holt(metric.label(), series, fitter.as_ref())?;
    let overflow = || MarketEntryError::FitFailure {
        metric: metric.label().into(),
        reason: "Projection overflows the decimal range".into(),
    };

    let current_value = series[series.len() - 1];
    if current_value.is_zero() {
        return Err(MarketEntryError::FitFailure {
            metric: metric.label().into(),
            reason: "Last observation is zero; growth rate is undefined".into(),
        });
    }

    let last_observed_year = year_after(config.reference_year, series.len() - 1)?;
    let projection = fit
        .forecast(config.horizon_years)
        .ok_or_else(overflow)?
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let year = year_after(last_observed_year, i + 1)?;
            Ok(ProjectedPoint {
                year,
                period_end: year_end(year)?,
                value,
            })
        })
        .collect::<MarketEntryResult<Vec<_>>>()?;
    let forecast_year = year_after(last_observed_year, config.horizon_years as usize)?;

    let forecasted_value = fit.forecast_at(config.horizon_years).ok_or_else(overflow)?;
    let growth_rate = forecasted_value
        .checked_div(current_value)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|change| change.checked_mul(dec!(100)))
        .ok_or_else(overflow)?;
    let trend = Trend::from_growth_rate(growth_rate);

    Ok(ForecastResult {
        metric,
        current_value,
        forecasted_value,
        growth_rate,
        trend,
        horizon_years: config.horizon_years,
        last_observed_year,
        forecast_year,
        projection,
        model: ModelSummary {
            method: fit.method,
            params: fit.params,
            level: fit.level,
            trend: fit.trend,
            sse: fit.sse,
        },
    })
}

/// Forecast one metric of a dataset country.
///
/// `NotFound` when the country has no historical data; `FitFailure` when the
/// metric's series is missing or too short.
pub fn forecast_metric(
    dataset: &MarketDataset,
    country: &str,
    metric: Metric,
    config: &AnalysisConfig,
) -> MarketEntryResult<ForecastResult> {
    let history = dataset.history(country)?;
    let series = history
        .get(&metric)
        .ok_or_else(|| MarketEntryError::FitFailure {
            metric: metric.label().into(),
            reason: format!("No historical series for {country}"),
        })?;
    forecast_series(metric, series, config)
}

/// Forecast all four metrics of a dataset country independently.
pub fn forecast_metrics(
    dataset: &MarketDataset,
    country: &str,
    config: &AnalysisConfig,
) -> MarketEntryResult<MetricForecasts> {
    // Surface an unknown country once rather than per metric.
    dataset.history(country)?;

    Ok(Metric::ALL
        .iter()
        .map(|metric| {
            let outcome = forecast_metric(dataset, country, *metric, config);
            if let Err(ref e) = outcome {
                tracing::warn!(country, metric = metric.label(), error = %e, "metric forecast failed");
            }
            (*metric, outcome)
        })
        .collect())
}

/// `base + offset` years, rejecting results outside the `i32` range.
fn year_after(base: i32, offset: usize) -> MarketEntryResult<i32> {
    i32::try_from(offset)
        .ok()
        .and_then(|offset| base.checked_add(offset))
        .ok_or_else(|| MarketEntryError::InvalidInput {
            field: "reference_year".into(),
            reason: format!("Year {base} + {offset} is outside the supported calendar range"),
        })
}

fn year_end(year: i32) -> MarketEntryResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| MarketEntryError::InvalidInput {
        field: "reference_year".into(),
        reason: format!("Year {year} is outside the supported calendar range"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FitMethod;
    use crate::dataset::seed::seed_dataset;

    #[test]
    fn test_brazil_gdp_trend_matches_growth_sign() {
        let dataset = seed_dataset();
        let result =
            forecast_metric(&dataset, "Brazil", Metric::Gdp, &AnalysisConfig::default()).unwrap();

        assert_eq!(result.current_value, dec!(1.84));
        let expected_growth = (result.forecasted_value / dec!(1.84) - Decimal::ONE) * dec!(100);
        assert_eq!(result.growth_rate, expected_growth);
        let expected_trend = if expected_growth > Decimal::ZERO {
            Trend::Increasing
        } else {
            Trend::Decreasing
        };
        assert_eq!(result.trend, expected_trend);
    }

    #[test]
    fn test_time_axis() {
        let dataset = seed_dataset();
        let result =
            forecast_metric(&dataset, "Japan", Metric::Population, &AnalysisConfig::default())
                .unwrap();

        assert_eq!(result.last_observed_year, 2022);
        assert_eq!(result.forecast_year, 2027);
        let years: Vec<i32> = result.projection.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2023, 2024, 2025, 2026, 2027]);
        assert_eq!(
            result.projection[4].period_end,
            NaiveDate::from_ymd_opt(2027, 12, 31).unwrap()
        );
        assert_eq!(result.projection[4].value, result.forecasted_value);
    }

    #[test]
    fn test_reference_year_does_not_change_values() {
        let series = vec![dec!(2.81), dec!(2.85), dec!(2.43), dec!(2.47), dec!(2.59)];
        let base = forecast_series(Metric::Gdp, &series, &AnalysisConfig::default()).unwrap();
        let shifted = forecast_series(
            Metric::Gdp,
            &series,
            &AnalysisConfig {
                reference_year: 1990,
                ..AnalysisConfig::default()
            },
        )
        .unwrap();

        assert_eq!(base.forecasted_value, shifted.forecasted_value);
        assert_eq!(shifted.forecast_year, 1999);
    }

    #[test]
    fn test_linear_series_growth() {
        let series = vec![dec!(10), dec!(11), dec!(12), dec!(13)];
        let config = AnalysisConfig {
            horizon_years: 2,
            ..AnalysisConfig::default()
        };
        let result = forecast_series(Metric::Population, &series, &config).unwrap();

        assert_eq!(result.forecasted_value, dec!(15));
        assert_eq!(result.growth_rate.round_dp(6), dec!(15.384615));
        assert_eq!(result.trend, Trend::Increasing);
        assert_eq!(result.projection.len(), 2);
    }

    #[test]
    fn test_flat_series_is_decreasing() {
        let series = vec![dec!(3), dec!(3), dec!(3)];
        let result =
            forecast_series(Metric::Gdp, &series, &AnalysisConfig::default()).unwrap();
        assert_eq!(result.growth_rate, Decimal::ZERO);
        assert_eq!(result.trend, Trend::Decreasing);
    }

    #[test]
    fn test_single_point_is_fit_failure() {
        let err =
            forecast_series(Metric::Gdp, &[dec!(1.84)], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, MarketEntryError::FitFailure { ref metric, .. } if metric == "GDP"));
    }

    #[test]
    fn test_zero_current_value_is_fit_failure() {
        let err = forecast_series(
            Metric::EconomicGrowth,
            &[dec!(1.0), dec!(0.5), dec!(0)],
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MarketEntryError::FitFailure { .. }));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = AnalysisConfig {
            horizon_years: 0,
            ..AnalysisConfig::default()
        };
        assert!(forecast_series(Metric::Gdp, &[dec!(1), dec!(2)], &config).is_err());
    }

    #[test]
    fn test_extreme_values_are_fit_failures() {
        // Initial trend y1 - y0 overflows.
        let err = forecast_series(
            Metric::Gdp,
            &[dec!(70000000000000000000000000000), dec!(-70000000000000000000000000000)],
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MarketEntryError::FitFailure { .. }), "got {err}");

        // A tiny last observation makes forecast / current overflow.
        let config = AnalysisConfig {
            fit: FitMethod::Fixed {
                alpha: dec!(1),
                beta: dec!(0),
            },
            ..AnalysisConfig::default()
        };
        let err = forecast_series(
            Metric::Gdp,
            &[dec!(0), dec!(100000000000000), dec!(0.0000000000000001)],
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, MarketEntryError::FitFailure { .. }), "got {err}");
    }

    #[test]
    fn test_horizon_beyond_limit_rejected() {
        let config = AnalysisConfig {
            horizon_years: 4_000_000_000,
            ..AnalysisConfig::default()
        };
        let err = forecast_series(Metric::Gdp, &[dec!(1), dec!(2)], &config).unwrap_err();
        assert!(matches!(err, MarketEntryError::InvalidInput { .. }), "got {err}");
    }

    #[test]
    fn test_out_of_range_reference_year_rejected() {
        let config = AnalysisConfig {
            reference_year: i32::MAX,
            ..AnalysisConfig::default()
        };
        let err = forecast_series(Metric::Gdp, &[dec!(1), dec!(2), dec!(3)], &config).unwrap_err();
        assert!(matches!(err, MarketEntryError::InvalidInput { .. }), "got {err}");
    }

    #[test]
    fn test_year_after_bounds() {
        assert_eq!(year_after(2013, 9).unwrap(), 2022);
        assert!(year_after(i32::MAX, 1).is_err());
        assert!(year_after(0, usize::MAX).is_err());
    }

    #[test]
    fn test_unknown_country_not_found() {
        let dataset = seed_dataset();
        let config = AnalysisConfig::default();
        assert!(forecast_metric(&dataset, "Germany", Metric::Gdp, &config)
            .unwrap_err()
            .is_not_found());
        assert!(forecast_metrics(&dataset, "Germany", &config)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_one_failed_metric_does_not_abort_others() {
        let mut dataset = seed_dataset();
        dataset
            .historical
            .get_mut("Canada")
            .unwrap()
            .insert(Metric::Population, vec![dec!(38.5)]);

        let forecasts =
            forecast_metrics(&dataset, "Canada", &AnalysisConfig::default()).unwrap();

        assert_eq!(forecasts.len(), 4);
        assert!(forecasts[&Metric::Population].is_err());
        assert!(forecasts[&Metric::Gdp].is_ok());
        assert!(forecasts[&Metric::ConsumerSpending].is_ok());
        assert!(forecasts[&Metric::EconomicGrowth].is_ok());
    }

    #[test]
    fn test_missing_series_is_fit_failure() {
        let mut dataset = seed_dataset();
        dataset
            .historical
            .get_mut("France")
            .unwrap()
            .remove(&Metric::ConsumerSpending);

        let err = forecast_metric(
            &dataset,
            "France",
            Metric::ConsumerSpending,
            &AnalysisConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MarketEntryError::FitFailure { .. }));
    }

    #[test]
    fn test_fixed_fit_method() {
        let config = AnalysisConfig {
            fit: FitMethod::Fixed {
                alpha: dec!(1),
                beta: dec!(0),
            },
            horizon_years: 1,
            ..AnalysisConfig::default()
        };
        // alpha = 1, beta = 0: level tracks the data, trend stays y1 - y0 = 1.
        let result = forecast_series(Metric::Gdp, &[dec!(1), dec!(2), dec!(4)], &config).unwrap();
        assert_eq!(result.forecasted_value, dec!(5));
        assert_eq!(result.model.method, "fixed");
    }
}
