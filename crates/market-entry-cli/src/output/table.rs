use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{batch_analyses, format_value, text_at};

const METRICS: [&str; 4] = ["GDP", "Population", "Consumer_Spending", "Economic_Growth"];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(analyses) = batch_analyses(value) {
        print_batch(analyses, value);
        return;
    }

    match value {
        Value::Object(map) if map.contains_key("detailed_scores") => print_risk(value),
        Value::Object(map) if map.contains_key("forecasts") => {
            print_outlook(std::slice::from_ref(value));
            print_failures_map(map);
        }
        Value::Object(map) => print_flat_object(map),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_batch(analyses: &[Value], envelope: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Country", "Market Score", "Status", "Risk Score", "Risk Rating"]);
    for a in analyses {
        builder.push_record([
            text_at(a, &["country"]),
            text_at(a, &["market_score"]),
            text_at(a, &["status"]),
            text_at(a, &["risk_analysis", "total_score"]),
            text_at(a, &["risk_analysis", "risk_rating"]),
        ]);
    }
    println!("{}", Table::from(builder));

    println!();
    print_outlook(analyses);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", format_value(w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// One row per country and forecast metric.
fn print_outlook(items: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Country", "Metric", "Current", "Forecast", "Year", "Growth %", "Trend"]);
    for item in items {
        let country = text_at(item, &["country"]);
        for metric in METRICS {
            let Some(f) = item.get("forecasts").and_then(|f| f.get(metric)) else {
                continue;
            };
            builder.push_record([
                country.clone(),
                metric.to_string(),
                text_at(f, &["current_value"]),
                text_at(f, &["forecasted_value"]),
                text_at(f, &["forecast_year"]),
                text_at(f, &["growth_rate"]),
                text_at(f, &["trend"]),
            ]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_risk(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Category", "Score", "Weight", "Weighted", "Key Factors"]);
    if let Some(Value::Array(categories)) = value.get("detailed_scores") {
        for c in categories {
            builder.push_record([
                text_at(c, &["kind"]),
                text_at(c, &["score"]),
                text_at(c, &["weight"]),
                text_at(c, &["weighted_score"]),
                text_at(c, &["factors"]),
            ]);
        }
    }
    println!("{}", Table::from(builder));
    println!(
        "\n{}: {} ({})",
        text_at(value, &["country"]),
        text_at(value, &["total_score"]),
        text_at(value, &["risk_rating"])
    );
}

fn print_failures_map(map: &Map<String, Value>) {
    if let Some(Value::Object(failures)) = map.get("failures") {
        for (metric, reason) in failures {
            println!("  - {}: {}", metric, format_value(reason));
        }
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}
