use serde_json::Value;
use std::io;

use super::{batch_analyses, format_value, text_at};

const METRICS: [&str; 4] = ["GDP", "Population", "Consumer_Spending", "Economic_Growth"];

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(analyses) = batch_analyses(value) {
        write_batch_csv(&mut wtr, analyses);
    } else {
        match value {
            Value::Object(map) if map.contains_key("detailed_scores") => {
                let _ = wtr.write_record(["category", "score", "weight", "weighted_score"]);
                if let Some(Value::Array(categories)) = map.get("detailed_scores") {
                    for c in categories {
                        let _ = wtr.write_record([
                            text_at(c, &["kind"]),
                            text_at(c, &["score"]),
                            text_at(c, &["weight"]),
                            text_at(c, &["weighted_score"]),
                        ]);
                    }
                }
            }
            Value::Object(map) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
            Value::Array(arr) => write_array_csv(&mut wtr, arr),
            _ => {
                let _ = wtr.write_record([&format_value(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

/// One row per country; forecast columns are empty when a metric failed.
fn write_batch_csv(wtr: &mut StdoutWriter<'_>, analyses: &[Value]) {
    let mut headers: Vec<String> = ["country", "market_score", "status", "risk_score", "risk_rating"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    for metric in METRICS {
        let key = metric.to_lowercase();
        headers.push(format!("{key}_forecast"));
        headers.push(format!("{key}_growth_rate"));
        headers.push(format!("{key}_trend"));
    }
    let _ = wtr.write_record(&headers);

    for a in analyses {
        let mut row = vec![
            text_at(a, &["country"]),
            text_at(a, &["market_score"]),
            text_at(a, &["status"]),
            text_at(a, &["risk_analysis", "total_score"]),
            text_at(a, &["risk_analysis", "risk_rating"]),
        ];
        for metric in METRICS {
            row.push(text_at(a, &["forecasts", metric, "forecasted_value"]));
            row.push(text_at(a, &["forecasts", metric, "growth_rate"]));
            row.push(text_at(a, &["forecasts", metric, "trend"]));
        }
        let _ = wtr.write_record(&row);
    }
}

fn write_array_csv(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
