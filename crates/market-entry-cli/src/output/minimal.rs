use serde_json::Value;

use super::{batch_analyses, format_value, text_at};

/// Print just the key answer for each command.
///
/// Batches print one `country: status (rating)` line per analysis; other
/// shapes fall back to a priority list of well-known fields.
pub fn print_minimal(value: &Value) {
    if let Some(analyses) = batch_analyses(value) {
        for a in analyses {
            let rating = text_at(a, &["risk_analysis", "risk_rating"]);
            if rating.is_empty() {
                println!("{}: {}", text_at(a, &["country"]), text_at(a, &["status"]));
            } else {
                println!("{}: {} ({})", text_at(a, &["country"]), text_at(a, &["status"]), rating);
            }
        }
        return;
    }

    if let Some(Value::Object(forecasts)) = value.get("forecasts") {
        for (metric, f) in forecasts {
            println!("{}: {} ({})", metric, text_at(f, &["forecasted_value"]), text_at(f, &["trend"]));
        }
        return;
    }

    let priority_keys = ["risk_rating", "forecasted_value", "status", "total_score"];

    match value {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_value(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_value(val));
            }
        }
        Value::Array(arr) => {
            for item in arr {
                match item.get("country") {
                    Some(country) => println!("{}", format_value(country)),
                    None => println!("{}", format_value(item)),
                }
            }
        }
        _ => println!("{}", format_value(value)),
    }
}
