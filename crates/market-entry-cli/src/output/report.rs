use colored::Colorize;
use rust_decimal::Decimal;

use market_entry_core::analysis::batch::CountryFailure;
use market_entry_core::forecast::metrics::ForecastResult;
use market_entry_core::{CountryAnalysis, MarketStatus, Metric};

const RULE_WIDTH: usize = 50;

/// Print the console market report for one analyzed country.
pub fn print_market_report(analysis: &CountryAnalysis, horizon_years: u32) {
    let rule = "-".repeat(RULE_WIDTH);

    println!("\n{rule}");
    println!("Market Analysis: {}", analysis.country.bold());
    println!("{rule}");
    println!("Market Entry Score: {:.2}%", analysis.market_score);
    println!("Status: {}", status_label(analysis.status));

    if let Some(ref risk) = analysis.risk_analysis {
        println!("\n{}", "Risk Assessment:".underline());
        println!("Overall Risk Rating: {}", risk.risk_rating);
        println!("Total Risk Score: {:.2}", risk.total_score);

        println!("\nDetailed Risk Analysis:");
        for category in &risk.detailed_scores {
            println!("\n{}:", category.kind);
            println!("Score: {}", category.score);
            println!("Key Factors:");
            for factor in &category.factors {
                println!("- {factor}");
            }
        }
    }

    println!("\n{}", "Current Market Metrics:".underline());
    for metric in &analysis.current_metrics {
        println!("{}: {}", metric.metric, metric.display());
    }

    println!("\n{}", "Key Strengths:".underline());
    for strength in &analysis.strengths {
        println!("- {}", strength.green());
    }

    println!("\n{}", "Key Challenges:".underline());
    for weakness in &analysis.weaknesses {
        println!("- {}", weakness.yellow());
    }

    if !analysis.forecasts.is_empty() {
        println!("\n{}", format!("{horizon_years}-Year Market Outlook:").underline());
        for (metric, forecast) in &analysis.forecasts {
            println!("{}", outlook_line(*metric, forecast));
        }
    }

    for warning in &analysis.warnings {
        println!("{}: {}", "warning".yellow().bold(), warning);
    }

    println!("{rule}");
}

/// Print the countries that could not be analyzed.
pub fn print_failures(failures: &[CountryFailure]) {
    for failure in failures {
        eprintln!(
            "{}: {} skipped ({})",
            "warning".yellow().bold(),
            failure.country,
            failure.reason
        );
    }
}

fn status_label(status: MarketStatus) -> String {
    let label = status.to_string();
    match status {
        MarketStatus::HighlySuitable => label.green().bold().to_string(),
        MarketStatus::VerySuitable => label.blue().bold().to_string(),
        MarketStatus::Suitable => label.yellow().to_string(),
        MarketStatus::ModeratelySuitable => label.red().to_string(),
    }
}

fn outlook_line(metric: Metric, forecast: &ForecastResult) -> String {
    let value = metric.unit().format(forecast.forecasted_value);
    match metric {
        Metric::Gdp => format!(
            "GDP: {value} ({}, {} growth)",
            forecast.trend,
            percent(forecast.growth_rate)
        ),
        Metric::Population => format!(
            "Population: {value} ({}, {} change)",
            forecast.trend,
            percent(forecast.growth_rate)
        ),
        Metric::ConsumerSpending => format!(
            "Consumer Spending: {value} ({}, {} growth)",
            forecast.trend,
            percent(forecast.growth_rate)
        ),
        Metric::EconomicGrowth => format!("Expected GDP Growth Rate: {value}"),
    }
}

fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}
