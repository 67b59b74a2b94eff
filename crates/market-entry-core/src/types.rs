use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores on a 0-100 scale (market score, risk category scores).
pub type Score = Decimal;

/// Percentages expressed as percent (2.5 = 2.5%), not as decimal fractions.
pub type Percent = Decimal;

/// The four economic indicators tracked per country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "GDP", alias = "gdp")]
    Gdp,
    #[serde(rename = "Population", alias = "population")]
    Population,
    #[serde(rename = "Consumer_Spending", alias = "consumer_spending")]
    ConsumerSpending,
    #[serde(rename = "Economic_Growth", alias = "economic_growth")]
    EconomicGrowth,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Gdp,
        Metric::Population,
        Metric::ConsumerSpending,
        Metric::EconomicGrowth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Gdp => "GDP",
            Metric::Population => "Population",
            Metric::ConsumerSpending => "Consumer_Spending",
            Metric::EconomicGrowth => "Economic_Growth",
        }
    }

    /// Fixed real-world unit of the metric.
    pub fn unit(&self) -> Unit {
        match self {
            Metric::Gdp | Metric::ConsumerSpending => Unit::TrillionUsd,
            Metric::Population => Unit::Million,
            Metric::EconomicGrowth => Unit::Percent,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "gdp" => Ok(Metric::Gdp),
            "population" => Ok(Metric::Population),
            "consumer_spending" => Ok(Metric::ConsumerSpending),
            "economic_growth" => Ok(Metric::EconomicGrowth),
            _ => Err(format!(
                "Unknown metric '{s}'. Use: GDP, Population, Consumer_Spending, Economic_Growth"
            )),
        }
    }
}

/// Unit tag carried alongside a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Trillions of US dollars
    TrillionUsd,
    /// Millions of people
    Million,
    /// Percent
    Percent,
}

impl Unit {
    /// Decimal places used when the value is displayed.
    pub fn precision(&self) -> u32 {
        match self {
            Unit::TrillionUsd => 2,
            Unit::Million | Unit::Percent => 1,
        }
    }

    /// Render a value with its unit suffix, e.g. `$4.23 Trillion USD`,
    /// `125.2 Million`, `1.0%`.
    pub fn format(&self, value: Decimal) -> String {
        let dp = self.precision();
        let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.*}", dp as usize, rounded);
        match self {
            Unit::TrillionUsd => format!("${digits} Trillion USD"),
            Unit::Million => format!("{digits} Million"),
            Unit::Percent => format!("{digits}%"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
