//! Weighted multi-factor country risk scoring.
//!
//! Combines the political, economic, operational and technical category
//! scores of a risk profile into a single weighted total and maps the total
//! to one of five ordered rating buckets.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RiskWeights;
use crate::dataset::{MarketDataset, RiskCategory, RiskCategoryKind};
use crate::error::MarketEntryError;
use crate::types::Score;
use crate::MarketEntryResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Discrete risk rating, ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    #[serde(rename = "Very Low Risk")]
    VeryLow,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Very High Risk")]
    VeryHigh,
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskRating::VeryLow => "Very Low Risk",
            RiskRating::Low => "Low Risk",
            RiskRating::Moderate => "Moderate Risk",
            RiskRating::High => "High Risk",
            RiskRating::VeryHigh => "Very High Risk",
        };
        f.write_str(label)
    }
}

/// Per-category breakdown carried through for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub kind: RiskCategoryKind,
    /// Raw category score (0-100)
    pub score: Score,
    /// Weight applied to the category
    pub weight: Decimal,
    /// weight * score
    pub weighted_score: Decimal,
    pub factors: Vec<String>,
}

/// Output of the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub country: String,
    /// Weighted sum of the category scores, unrounded
    pub total_score: Decimal,
    pub risk_rating: RiskRating,
    /// Categories in Political, Economic, Operational, Technical order
    pub detailed_scores: Vec<CategoryScore>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score the risk profile of `country` from the dataset.
///
/// Returns `NotFound` when the dataset holds no risk profile for the country.
pub fn calculate_risk_score(
    dataset: &MarketDataset,
    country: &str,
    weights: &RiskWeights,
) -> MarketEntryResult<RiskAssessment> {
    let profile = dataset.risk_profile(country)?;
    score_risk_profile(country, profile, weights)
}

/// Score an explicit list of risk categories.
///
/// Total = sum(weight[c] * score[c]) over the four categories. Every
/// category must appear exactly once.
pub fn score_risk_profile(
    country: &str,
    categories: &[RiskCategory],
    weights: &RiskWeights,
) -> MarketEntryResult<RiskAssessment> {
    weights.validate()?;

    let mut detailed_scores = Vec::with_capacity(RiskCategoryKind::ALL.len());
    let mut total_score = Decimal::ZERO;

    for kind in RiskCategoryKind::ALL {
        let mut matching = categories.iter().filter(|c| c.kind == kind);
        let category = matching.next().ok_or_else(|| MarketEntryError::InvalidInput {
            field: format!("{country}.{}", kind.key()),
            reason: format!("Risk profile is missing the {kind} category"),
        })?;
        if matching.next().is_some() {
            return Err(MarketEntryError::InvalidInput {
                field: format!("{country}.{}", kind.key()),
                reason: format!("{kind} category listed more than once"),
            });
        }
        validate_category_score(country, category)?;

        let weight = weights.weight(kind);
        let weighted_score = weight * category.score;
        total_score += weighted_score;

        detailed_scores.push(CategoryScore {
            kind,
            score: category.score,
            weight,
            weighted_score,
            factors: category.factors.clone(),
        });
    }

    let risk_rating = score_to_rating(total_score);

    tracing::debug!(country, %total_score, %risk_rating, "risk profile scored");

    Ok(RiskAssessment {
        country: country.to_string(),
        total_score,
        risk_rating,
        detailed_scores,
    })
}

/// Map a total weighted score to a rating bucket.
///
/// Upper bounds are inclusive: <=15 Very Low, <=25 Low, <=35 Moderate,
/// <=45 High, above 45 Very High.
pub fn score_to_rating(total_score: Decimal) -> RiskRating {
    if total_score <= dec!(15) {
        RiskRating::VeryLow
    } else if total_score <= dec!(25) {
        RiskRating::Low
    } else if total_score <= dec!(35) {
        RiskRating::Moderate
    } else if total_score <= dec!(45) {
        RiskRating::High
    } else {
        RiskRating::VeryHigh
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_category_score(country: &str, category: &RiskCategory) -> MarketEntryResult<()> {
    if category.score < Decimal::ZERO || category.score > dec!(100) {
        return Err(MarketEntryError::InvalidInput {
            field: format!("{country}.{}.score", category.kind.key()),
            reason: "Must be between 0 and 100".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::seed::seed_dataset;
    use pretty_assertions::assert_eq;

    fn profile(scores: [Decimal; 4]) -> Vec<RiskCategory> {
        RiskCategoryKind::ALL
            .iter()
            .zip(scores)
            .map(|(kind, score)| RiskCategory {
                kind: *kind,
                score,
                factors: vec![],
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // 1. Japan scenario: 0.25*15 + 0.30*25 + 0.20*20 + 0.25*15 = 19.0
    // -----------------------------------------------------------------------
    #[test]
    fn test_japan_total_and_rating() {
        let dataset = seed_dataset();
        let result = calculate_risk_score(&dataset, "Japan", &RiskWeights::default()).unwrap();

        assert_eq!(result.total_score, dec!(19.0));
        assert_eq!(result.risk_rating, RiskRating::Low);
    }

    // -----------------------------------------------------------------------
    // 2. Breakdown carries scores, weights and factors through unchanged
    // -----------------------------------------------------------------------
    #[test]
    fn test_breakdown_preserved() {
        let dataset = seed_dataset();
        let result = calculate_risk_score(&dataset, "Japan", &RiskWeights::default()).unwrap();

        let kinds: Vec<RiskCategoryKind> =
            result.detailed_scores.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, RiskCategoryKind::ALL.to_vec());

        let economic = &result.detailed_scores[1];
        assert_eq!(economic.score, dec!(25));
        assert_eq!(economic.weight, dec!(0.30));
        assert_eq!(economic.weighted_score, dec!(7.5));
        assert_eq!(economic.factors.len(), 3);
        assert_eq!(result.detailed_scores[3].factors.len(), 4);
    }

    // -----------------------------------------------------------------------
    // 3. Total equals the weighted sum for every seed country
    // -----------------------------------------------------------------------
    #[test]
    fn test_total_is_weighted_sum_for_all_countries() {
        let dataset = seed_dataset();
        let weights = RiskWeights::default();
        for country in dataset.countries() {
            let result = calculate_risk_score(&dataset, country, &weights).unwrap();
            let expected: Decimal = dataset
                .risk_profile(country)
                .unwrap()
                .iter()
                .map(|c| weights.weight(c.kind) * c.score)
                .sum();
            assert_eq!(result.total_score, expected, "{country}");
        }
    }

    // -----------------------------------------------------------------------
    // 4. Bucket boundaries are inclusive on the upper end
    // -----------------------------------------------------------------------
    #[test]
    fn test_rating_boundaries() {
        assert_eq!(score_to_rating(dec!(0)), RiskRating::VeryLow);
        assert_eq!(score_to_rating(dec!(15)), RiskRating::VeryLow);
        assert_eq!(score_to_rating(dec!(15.0001)), RiskRating::Low);
        assert_eq!(score_to_rating(dec!(25)), RiskRating::Low);
        assert_eq!(score_to_rating(dec!(25.0001)), RiskRating::Moderate);
        assert_eq!(score_to_rating(dec!(35)), RiskRating::Moderate);
        assert_eq!(score_to_rating(dec!(35.0001)), RiskRating::High);
        assert_eq!(score_to_rating(dec!(45)), RiskRating::High);
        assert_eq!(score_to_rating(dec!(45.0001)), RiskRating::VeryHigh);
        assert_eq!(score_to_rating(dec!(100)), RiskRating::VeryHigh);
    }

    // -----------------------------------------------------------------------
    // 5. Unknown country is NotFound, not a zeroed record
    // -----------------------------------------------------------------------
    #[test]
    fn test_unknown_country_not_found() {
        let dataset = seed_dataset();
        let err = calculate_risk_score(&dataset, "Germany", &RiskWeights::default()).unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err}");
    }

    // -----------------------------------------------------------------------
    // 6. Missing or duplicated categories are rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_incomplete_profile_rejected() {
        let mut categories = profile([dec!(10), dec!(10), dec!(10), dec!(10)]);
        categories.pop();
        let err =
            score_risk_profile("Testland", &categories, &RiskWeights::default()).unwrap_err();
        assert!(err.to_string().contains("Technical Risk"));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut categories = profile([dec!(10), dec!(10), dec!(10), dec!(10)]);
        categories.push(categories[0].clone());
        assert!(score_risk_profile("Testland", &categories, &RiskWeights::default()).is_err());
    }

    // -----------------------------------------------------------------------
    // 7. Custom weights are applied and validated
    // -----------------------------------------------------------------------
    #[test]
    fn test_custom_weights() {
        let weights = RiskWeights {
            political: dec!(1),
            economic: dec!(0),
            operational: dec!(0),
            technical: dec!(0),
        };
        let categories = profile([dec!(50), dec!(0), dec!(0), dec!(0)]);
        let result = score_risk_profile("Testland", &categories, &weights).unwrap();
        assert_eq!(result.total_score, dec!(50));
        assert_eq!(result.risk_rating, RiskRating::VeryHigh);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = RiskWeights {
            technical: dec!(0.35),
            ..RiskWeights::default()
        };
        let categories = profile([dec!(10), dec!(10), dec!(10), dec!(10)]);
        assert!(score_risk_profile("Testland", &categories, &weights).is_err());
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let categories = profile([dec!(101), dec!(10), dec!(10), dec!(10)]);
        assert!(score_risk_profile("Testland", &categories, &RiskWeights::default()).is_err());
    }

    #[test]
    fn test_rating_serializes_as_label() {
        let json = serde_json::to_string(&RiskRating::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High Risk\"");
        assert_eq!(RiskRating::Moderate.to_string(), "Moderate Risk");
    }
}
