//! Analysis configuration: forecast horizon, time axis, risk weights and the
//! smoothing fit method.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::dataset::RiskCategoryKind;
use crate::error::MarketEntryError;
use crate::MarketEntryResult;

pub const DEFAULT_HORIZON_YEARS: u32 = 5;
pub const DEFAULT_REFERENCE_YEAR: i32 = 2013;
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Weights applied to the four risk categories. Must sum to exactly 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub political: Decimal,
    pub economic: Decimal,
    pub operational: Decimal,
    pub technical: Decimal,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            political: dec!(0.25),
            economic: dec!(0.30),
            operational: dec!(0.20),
            technical: dec!(0.25),
        }
    }
}

impl RiskWeights {
    pub fn weight(&self, kind: RiskCategoryKind) -> Decimal {
        match kind {
            RiskCategoryKind::Political => self.political,
            RiskCategoryKind::Economic => self.economic,
            RiskCategoryKind::Operational => self.operational,
            RiskCategoryKind::Technical => self.technical,
        }
    }

    pub fn total(&self) -> Decimal {
        RiskCategoryKind::ALL.iter().map(|k| self.weight(*k)).sum()
    }

    pub fn validate(&self) -> MarketEntryResult<()> {
        for kind in RiskCategoryKind::ALL {
            let w = self.weight(kind);
            if w < Decimal::ZERO || w > Decimal::ONE {
                return Err(MarketEntryError::InvalidInput {
                    field: format!("weights.{}", kind.key()),
                    reason: format!("Weight must be between 0 and 1, got {w}"),
                });
            }
        }
        let total = self.total();
        if total != Decimal::ONE {
            return Err(MarketEntryError::InvalidInput {
                field: "weights".into(),
                reason: format!("Risk category weights must sum to 1, got {total}"),
            });
        }
        Ok(())
    }
}

/// How the smoothing coefficients are chosen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FitMethod {
    /// Minimise in-sample one-step-ahead SSE over alpha and beta.
    #[default]
    GridSearch,
    /// Use the given coefficients as-is.
    Fixed { alpha: Decimal, beta: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Years ahead to forecast; the last projected point is reported.
    pub horizon_years: u32,
    /// Calendar year of the first historical observation.
    pub reference_year: i32,
    pub weights: RiskWeights,
    pub fit: FitMethod,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            horizon_years: DEFAULT_HORIZON_YEARS,
            reference_year: DEFAULT_REFERENCE_YEAR,
            weights: RiskWeights::default(),
            fit: FitMethod::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> MarketEntryResult<()> {
        if self.horizon_years == 0 {
            return Err(MarketEntryError::InvalidInput {
                field: "horizon_years".into(),
                reason: "Forecast horizon must be at least 1 year".into(),
            });
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(MarketEntryError::InvalidInput {
                field: "horizon_years".into(),
                reason: format!(
                    "Forecast horizon must be at most {MAX_HORIZON_YEARS} years, got {}",
                    self.horizon_years
                ),
            });
        }
        if !(1900..=2200).contains(&self.reference_year) {
            return Err(MarketEntryError::InvalidInput {
                field: "reference_year".into(),
                reason: format!("Reference year {} is out of range", self.reference_year),
            });
        }
        self.weights.validate()?;
        if let FitMethod::Fixed { alpha, beta } = self.fit {
            validate_coefficient("fit.alpha", alpha)?;
            validate_coefficient("fit.beta", beta)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_coefficient(field: &str, value: Decimal) -> MarketEntryResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(MarketEntryError::InvalidInput {
            field: field.into(),
            reason: format!("Smoothing coefficient must be between 0 and 1, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert_eq!(RiskWeights::default().total(), Decimal::ONE);
        assert!(RiskWeights::default().validate().is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let weights = RiskWeights {
            political: dec!(0.30),
            ..RiskWeights::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = RiskWeights {
            political: dec!(-0.25),
            economic: dec!(0.80),
            operational: dec!(0.20),
            technical: dec!(0.25),
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = AnalysisConfig {
            horizon_years: 0,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_horizon_upper_bound() {
        let at_limit = AnalysisConfig {
            horizon_years: MAX_HORIZON_YEARS,
            ..AnalysisConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = AnalysisConfig {
            horizon_years: 4_000_000_000,
            ..AnalysisConfig::default()
        };
        let err = huge.validate().unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn test_fixed_fit_out_of_range_rejected() {
        let config = AnalysisConfig {
            fit: FitMethod::Fixed {
                alpha: dec!(1.5),
                beta: dec!(0.1),
            },
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"horizon_years": 3}"#).unwrap();
        assert_eq!(config.horizon_years, 3);
        assert_eq!(config.reference_year, DEFAULT_REFERENCE_YEAR);
        assert_eq!(config.fit, FitMethod::GridSearch);
    }
}
