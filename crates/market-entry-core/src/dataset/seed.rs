//! Built-in reference dataset: Japan, Brazil, France and Canada.
//!
//! Historical series cover 2013-2022, one value per year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::{CountrySnapshot, MarketDataset, MetricHistory, RiskCategory, RiskCategoryKind};
use crate::types::Metric;

pub fn seed_dataset() -> MarketDataset {
    let mut dataset = MarketDataset::default();

    for (snapshot, history, profile) in [japan(), brazil(), france(), canada()] {
        dataset
            .historical
            .insert(snapshot.country.clone(), history);
        dataset
            .risk_profiles
            .insert(snapshot.country.clone(), profile);
        dataset.snapshots.push(snapshot);
    }

    dataset
}

type SeedCountry = (CountrySnapshot, MetricHistory, Vec<RiskCategory>);

fn japan() -> SeedCountry {
    let snapshot = CountrySnapshot {
        country: "Japan".into(),
        gdp: dec!(4.23),
        population: dec!(125.2),
        consumer_spending: dec!(2.88),
        economic_growth: dec!(1.0),
        market_score: dec!(88),
        strengths: strings(&[
            "Advanced Infrastructure and Technology",
            "Strong Financial System",
            "High Innovation Capacity",
        ]),
        weaknesses: strings(&[
            "Slow Economic Growth",
            "Complex Business Regulations",
            "Limited Market Expansion Potential",
        ]),
    };
    let history = history(
        [
            dec!(5.16), dec!(4.85), dec!(4.39), dec!(4.92), dec!(4.87),
            dec!(4.95), dec!(5.08), dec!(4.97), dec!(4.94), dec!(4.23),
        ],
        [
            dec!(127.3), dec!(127.1), dec!(126.9), dec!(126.7), dec!(126.5),
            dec!(126.3), dec!(126.1), dec!(125.8), dec!(125.5), dec!(125.2),
        ],
        [
            dec!(2.98), dec!(2.89), dec!(2.82), dec!(2.85), dec!(2.88),
            dec!(2.91), dec!(2.94), dec!(2.75), dec!(2.82), dec!(2.88),
        ],
        [
            dec!(1.6), dec!(0.4), dec!(1.2), dec!(0.5), dec!(2.2),
            dec!(0.3), dec!(0.7), dec!(-4.5), dec!(1.6), dec!(1.0),
        ],
    );
    let profile = vec![
        category(
            RiskCategoryKind::Political,
            dec!(15),
            &[
                "Stable political environment",
                "Strong regulatory framework",
                "Occasional policy shifts affecting business",
            ],
        ),
        category(
            RiskCategoryKind::Economic,
            dec!(25),
            &["Deflation concerns", "High public debt", "Aging population impact"],
        ),
        category(
            RiskCategoryKind::Operational,
            dec!(20),
            &[
                "Natural disaster vulnerability",
                "High operating costs",
                "Complex business culture",
            ],
        ),
        category(
            RiskCategoryKind::Technical,
            dec!(15),
            &[
                "Advanced digital infrastructure",
                "High cybersecurity standards",
                "Strong technological innovation",
                "Skilled IT workforce",
            ],
        ),
    ];
    (snapshot, history, profile)
}

fn brazil() -> SeedCountry {
    let snapshot = CountrySnapshot {
        country: "Brazil".into(),
        gdp: dec!(1.84),
        population: dec!(214.3),
        consumer_spending: dec!(1.15),
        economic_growth: dec!(2.9),
        market_score: dec!(82),
        strengths: strings(&[
            "Large Consumer Market",
            "Growing Middle Class",
            "Rich Natural Resources",
        ]),
        weaknesses: strings(&[
            "Complex Regulatory Environment",
            "Infrastructure Gaps",
            "Bureaucratic Challenges",
        ]),
    };
    let history = history(
        [
            dec!(2.47), dec!(2.46), dec!(1.80), dec!(1.80), dec!(2.06),
            dec!(1.92), dec!(1.88), dec!(1.45), dec!(1.61), dec!(1.84),
        ],
        [
            dec!(201.0), dec!(202.8), dec!(204.5), dec!(206.2), dec!(207.8),
            dec!(209.3), dec!(210.8), dec!(212.2), dec!(213.6), dec!(214.3),
        ],
        [
            dec!(1.52), dec!(1.48), dec!(1.12), dec!(1.15), dec!(1.28),
            dec!(1.24), dec!(1.22), dec!(0.98), dec!(1.08), dec!(1.15),
        ],
        [
            dec!(3.0), dec!(0.5), dec!(-3.5), dec!(-3.3), dec!(1.3),
            dec!(1.8), dec!(1.2), dec!(-3.9), dec!(4.6), dec!(2.9),
        ],
    );
    let profile = vec![
        category(
            RiskCategoryKind::Political,
            dec!(35),
            &[
                "Political instability",
                "Frequent regulatory changes",
                "Corruption concerns",
            ],
        ),
        category(
            RiskCategoryKind::Economic,
            dec!(30),
            &[
                "Currency volatility",
                "Inflation risk",
                "Economic policy uncertainty",
            ],
        ),
        category(
            RiskCategoryKind::Operational,
            dec!(40),
            &[
                "Infrastructure limitations",
                "Complex tax system",
                "Security concerns",
            ],
        ),
        category(
            RiskCategoryKind::Technical,
            dec!(35),
            &[
                "Digital infrastructure gaps",
                "Cybersecurity vulnerabilities",
                "Limited tech talent pool",
                "Uneven technological adoption",
            ],
        ),
    ];
    (snapshot, history, profile)
}

fn france() -> SeedCountry {
    let snapshot = CountrySnapshot {
        country: "France".into(),
        gdp: dec!(2.78),
        population: dec!(67.8),
        consumer_spending: dec!(1.65),
        economic_growth: dec!(2.5),
        market_score: dec!(84),
        strengths: strings(&[
            "Strong Infrastructure Network",
            "Skilled Workforce",
            "Strategic EU Market Position",
        ]),
        weaknesses: strings(&[
            "High Labor Costs",
            "Complex Labor Laws",
            "Moderate Economic Growth",
        ]),
    };
    let history = history(
        [
            dec!(2.81), dec!(2.85), dec!(2.43), dec!(2.47), dec!(2.59),
            dec!(2.78), dec!(2.73), dec!(2.63), dec!(2.96), dec!(2.78),
        ],
        [
            dec!(65.8), dec!(66.2), dec!(66.5), dec!(66.7), dec!(66.9),
            dec!(67.2), dec!(67.3), dec!(67.4), dec!(67.6), dec!(67.8),
        ],
        [
            dec!(1.62), dec!(1.64), dec!(1.42), dec!(1.44), dec!(1.52),
            dec!(1.64), dec!(1.61), dec!(1.48), dec!(1.72), dec!(1.65),
        ],
        [
            dec!(0.6), dec!(1.0), dec!(1.1), dec!(1.1), dec!(2.3),
            dec!(1.9), dec!(1.8), dec!(-7.9), dec!(6.8), dec!(2.5),
        ],
    );
    let profile = vec![
        category(
            RiskCategoryKind::Political,
            dec!(20),
            &[
                "Labor union influence",
                "EU regulatory compliance",
                "Social movement impact",
            ],
        ),
        category(
            RiskCategoryKind::Economic,
            dec!(25),
            &[
                "High tax burden",
                "EU economic dependencies",
                "Labor market rigidity",
            ],
        ),
        category(
            RiskCategoryKind::Operational,
            dec!(15),
            &[
                "Strike frequency",
                "Administrative complexity",
                "High labor costs",
            ],
        ),
        category(
            RiskCategoryKind::Technical,
            dec!(20),
            &[
                "Good digital infrastructure",
                "Moderate cybersecurity framework",
                "Growing tech innovation",
                "Competitive IT sector",
            ],
        ),
    ];
    (snapshot, history, profile)
}

fn canada() -> SeedCountry {
    let snapshot = CountrySnapshot {
        country: "Canada".into(),
        gdp: dec!(2.00),
        population: dec!(38.5),
        consumer_spending: dec!(1.18),
        economic_growth: dec!(3.4),
        market_score: dec!(83),
        strengths: strings(&[
            "Strong Legal Framework",
            "Stable Financial System",
            "High-Quality Infrastructure",
        ]),
        weaknesses: strings(&[
            "Small Domestic Market",
            "High Business Operating Costs",
            "Weather-Related Challenges",
        ]),
    };
    let history = history(
        [
            dec!(1.84), dec!(1.80), dec!(1.56), dec!(1.53), dec!(1.65),
            dec!(1.72), dec!(1.74), dec!(1.64), dec!(1.99), dec!(2.00),
        ],
        [
            dec!(35.2), dec!(35.5), dec!(35.8), dec!(36.2), dec!(36.5),
            dec!(37.0), dec!(37.6), dec!(38.0), dec!(38.2), dec!(38.5),
        ],
        [
            dec!(1.05), dec!(1.02), dec!(0.92), dec!(0.91), dec!(0.98),
            dec!(1.02), dec!(1.04), dec!(0.96), dec!(1.15), dec!(1.18),
        ],
        [
            dec!(2.3), dec!(2.9), dec!(0.7), dec!(1.1), dec!(3.0),
            dec!(2.8), dec!(1.9), dec!(-5.2), dec!(4.5), dec!(3.4),
        ],
    );
    let profile = vec![
        category(
            RiskCategoryKind::Political,
            dec!(10),
            &[
                "Stable political system",
                "Strong property rights",
                "Transparent regulations",
            ],
        ),
        category(
            RiskCategoryKind::Economic,
            dec!(20),
            &[
                "US economic dependency",
                "Housing market volatility",
                "Resource price sensitivity",
            ],
        ),
        category(
            RiskCategoryKind::Operational,
            dec!(15),
            &[
                "High labor costs",
                "Inter-provincial trade barriers",
                "Weather-related disruptions",
            ],
        ),
        category(
            RiskCategoryKind::Technical,
            dec!(18),
            &[
                "Strong digital infrastructure",
                "Advanced cybersecurity measures",
                "Growing tech ecosystem",
                "High tech adoption rate",
            ],
        ),
    ];
    (snapshot, history, profile)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn history(
    gdp: [Decimal; 10],
    population: [Decimal; 10],
    consumer_spending: [Decimal; 10],
    economic_growth: [Decimal; 10],
) -> MetricHistory {
    BTreeMap::from([
        (Metric::Gdp, gdp.to_vec()),
        (Metric::Population, population.to_vec()),
        (Metric::ConsumerSpending, consumer_spending.to_vec()),
        (Metric::EconomicGrowth, economic_growth.to_vec()),
    ])
}

fn category(kind: RiskCategoryKind, score: Decimal, factors: &[&str]) -> RiskCategory {
    RiskCategory {
        kind,
        score,
        factors: strings(factors),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
