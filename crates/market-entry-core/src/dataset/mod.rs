//! Read-only reference data: per-country snapshots, historical indicator
//! series and risk profiles.
//!
//! A [`MarketDataset`] is built once (from the seed data or a file) and then
//! passed by reference into the scoring, forecasting and analysis functions.
//! The three lookups fail independently so that a country can, for example,
//! have a snapshot but no risk profile.

pub mod seed;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::MarketEntryError;
use crate::types::{Metric, Score};
use crate::MarketEntryResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Current economic snapshot for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySnapshot {
    /// Country name (lookup key)
    pub country: String,
    /// GDP in trillions of USD
    pub gdp: Decimal,
    /// Population in millions
    pub population: Decimal,
    /// Consumer spending in trillions of USD
    pub consumer_spending: Decimal,
    /// Real GDP growth in percent
    pub economic_growth: Decimal,
    /// Externally supplied suitability score (0-100)
    pub market_score: Score,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl CountrySnapshot {
    pub fn current_value(&self, metric: Metric) -> Decimal {
        match metric {
            Metric::Gdp => self.gdp,
            Metric::Population => self.population,
            Metric::ConsumerSpending => self.consumer_spending,
            Metric::EconomicGrowth => self.economic_growth,
        }
    }
}

/// The four risk categories making up a country risk profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategoryKind {
    #[serde(alias = "Political_Risk")]
    Political,
    #[serde(alias = "Economic_Risk")]
    Economic,
    #[serde(alias = "Operational_Risk")]
    Operational,
    #[serde(alias = "Technical_Risk")]
    Technical,
}

impl RiskCategoryKind {
    pub const ALL: [RiskCategoryKind; 4] = [
        RiskCategoryKind::Political,
        RiskCategoryKind::Economic,
        RiskCategoryKind::Operational,
        RiskCategoryKind::Technical,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RiskCategoryKind::Political => "political",
            RiskCategoryKind::Economic => "economic",
            RiskCategoryKind::Operational => "operational",
            RiskCategoryKind::Technical => "technical",
        }
    }
}

impl fmt::Display for RiskCategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategoryKind::Political => "Political Risk",
            RiskCategoryKind::Economic => "Economic Risk",
            RiskCategoryKind::Operational => "Operational Risk",
            RiskCategoryKind::Technical => "Technical Risk",
        };
        f.write_str(label)
    }
}

/// One scored risk category with its qualitative drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCategory {
    pub kind: RiskCategoryKind,
    /// Risk score 0-100 (lower = less risky)
    pub score: Score,
    pub factors: Vec<String>,
}

/// Annual observations per metric, earliest first.
pub type MetricHistory = BTreeMap<Metric, Vec<Decimal>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDataset {
    /// Snapshots in presentation order
    pub snapshots: Vec<CountrySnapshot>,
    #[serde(default)]
    pub historical: BTreeMap<String, MetricHistory>,
    #[serde(default)]
    pub risk_profiles: BTreeMap<String, Vec<RiskCategory>>,
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

impl MarketDataset {
    /// Parse a dataset from JSON and validate it.
    pub fn from_json_str(json: &str) -> MarketEntryResult<Self> {
        let dataset: MarketDataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.snapshots.iter().map(|s| s.country.as_str())
    }

    pub fn snapshot(&self, country: &str) -> MarketEntryResult<&CountrySnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.country == country)
            .ok_or_else(|| MarketEntryError::not_found("market snapshot", country))
    }

    pub fn history(&self, country: &str) -> MarketEntryResult<&MetricHistory> {
        self.historical
            .get(country)
            .ok_or_else(|| MarketEntryError::not_found("historical data", country))
    }

    pub fn risk_profile(&self, country: &str) -> MarketEntryResult<&[RiskCategory]> {
        self.risk_profiles
            .get(country)
            .map(|p| p.as_slice())
            .ok_or_else(|| MarketEntryError::not_found("risk profile", country))
    }

    /// Check score ranges and duplicate keys.
    ///
    /// Series lengths are not checked here: a short series is
    /// a per-metric fit failure, not a dataset error.
    pub fn validate(&self) -> MarketEntryResult<()> {
        for (i, snapshot) in self.snapshots.iter().enumerate() {
            if snapshot.country.trim().is_empty() {
                return Err(MarketEntryError::InvalidInput {
                    field: format!("snapshots[{i}].country"),
                    reason: "Country name is required".into(),
                });
            }
            if self.snapshots[..i]
                .iter()
                .any(|s| s.country == snapshot.country)
            {
                return Err(MarketEntryError::InvalidInput {
                    field: format!("snapshots[{i}].country"),
                    reason: format!("Duplicate snapshot for '{}'", snapshot.country),
                });
            }
            check_score(
                &format!("{}.market_score", snapshot.country),
                snapshot.market_score,
            )?;
        }

        for (country, categories) in &self.risk_profiles {
            for (i, category) in categories.iter().enumerate() {
                check_score(&format!("{country}.{}.score", category.kind.key()), category.score)?;
                if categories[..i].iter().any(|c| c.kind == category.kind) {
                    return Err(MarketEntryError::InvalidInput {
                        field: format!("{country}.{}", category.kind.key()),
                        reason: "Risk category listed more than once".into(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_score(field: &str, score: Score) -> MarketEntryResult<()> {
    if score < Decimal::ZERO || score > dec!(100) {
        return Err(MarketEntryError::InvalidInput {
            field: field.into(),
            reason: format!("Score must be between 0 and 100, got {score}"),
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

    #[test]
    fn test_seed_dataset_is_valid() {
        let dataset = seed::seed_dataset();
        assert!(dataset.validate().is_ok());
        let countries: Vec<&str> = dataset.countries().collect();
        assert_eq!(countries, vec!["Japan", "Brazil", "France", "Canada"]);
    }

    #[test]
    fn test_lookups_fail_independently() {
        let mut dataset = seed::seed_dataset();
        dataset.risk_profiles.remove("France");

        assert!(dataset.snapshot("France").is_ok());
        assert!(dataset.history("France").is_ok());
        let err = dataset.risk_profile("France").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_country_not_found() {
        let dataset = seed::seed_dataset();
        assert!(dataset.snapshot("Germany").unwrap_err().is_not_found());
        assert!(dataset.history("Germany").unwrap_err().is_not_found());
        assert!(dataset.risk_profile("Germany").unwrap_err().is_not_found());
    }

    #[test]
    fn test_out_of_range_market_score_rejected() {
        let mut dataset = seed::seed_dataset();
        dataset.snapshots[0].market_score = dec!(120);
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_duplicate_risk_category_rejected() {
        let mut dataset = seed::seed_dataset();
        let profile = dataset.risk_profiles.get_mut("Japan").unwrap();
        let dup = profile[0].clone();
        profile.push(dup);
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "snapshots": [{
                "country": "Testland",
                "gdp": 1.5, "population": 10.0,
                "consumer_spending": 0.8, "economic_growth": 2.0,
                "market_score": 140,
                "strengths": [], "weaknesses": []
            }]
        }"#;
        let err = MarketDataset::from_json_str(json).unwrap_err();
        assert!(matches!(err, MarketEntryError::InvalidInput { .. }), "got {err}");
    }

    #[test]
    fn test_from_json_accepts_legacy_category_names() {
        let json = r#"{
            "snapshots": [{
                "country": "Testland",
                "gdp": 1.5, "population": 10.0,
                "consumer_spending": 0.8, "economic_growth": 2.0,
                "market_score": 77,
                "strengths": ["Open economy"], "weaknesses": []
            }],
            "historical": { "Testland": { "GDP": [1.2, 1.3, 1.5] } },
            "risk_profiles": { "Testland": [
                { "kind": "Political_Risk", "score": 10, "factors": [] }
            ] }
        }"#;
        let dataset = MarketDataset::from_json_str(json).unwrap();
        assert_eq!(dataset.snapshot("Testland").unwrap().market_score, dec!(77));
        assert_eq!(
            dataset.risk_profile("Testland").unwrap()[0].kind,
            RiskCategoryKind::Political
        );
        assert_eq!(dataset.history("Testland").unwrap()[&Metric::Gdp].len(), 3);
    }
}
