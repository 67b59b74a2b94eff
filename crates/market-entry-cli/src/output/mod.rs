pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod report;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar JSON value as plain text; nested values become compact JSON.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Follow a key path through nested objects.
pub(crate) fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// Text at `path`, or an empty string when absent.
pub(crate) fn text_at(value: &Value, path: &[&str]) -> String {
    lookup(value, path).map(format_value).unwrap_or_default()
}

/// Batch envelope analyses, when `value` is an `analyze` result.
pub(crate) fn batch_analyses(value: &Value) -> Option<&Vec<Value>> {
    lookup(value, &["result", "analyses"]).and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_and_text() {
        let value = json!({"a": {"b": {"c": "19.00"}}, "n": 5});
        assert_eq!(text_at(&value, &["a", "b", "c"]), "19.00");
        assert_eq!(text_at(&value, &["n"]), "5");
        assert_eq!(text_at(&value, &["missing"]), "");
    }

    #[test]
    fn test_format_array() {
        assert_eq!(format_value(&json!(["x", "y"])), "x, y");
        assert_eq!(format_value(&Value::Null), "");
    }

    #[test]
    fn test_batch_detection() {
        let batch = json!({"result": {"analyses": [{"country": "Japan"}]}});
        assert_eq!(batch_analyses(&batch).unwrap().len(), 1);
        assert!(batch_analyses(&json!({"country": "Japan"})).is_none());
    }
}
