pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use finance_calc_core::presentation::{format_currency, format_percent, round_cents};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn is_rate_field(key: &str) -> bool {
    key.contains("rate") || key.ends_with("_pct")
}

/// Decimals are serialised as strings; integers (years, months, ages) as numbers.
fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Human-readable rendering of a single field: money as `$1,234.56`,
/// rates as `7.50%`.
pub fn display_field(key: &str, value: &Value) -> String {
    if let Some(d) = as_decimal(value) {
        return if is_rate_field(key) {
            format_percent(d, 2)
        } else {
            format_currency(d)
        };
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if *b { "yes" } else { "no" }).to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Machine-readable rendering for CSV: money rounded to cents, rates kept
/// at full precision.
pub fn plain_field(key: &str, value: &Value) -> String {
    if let Some(d) = as_decimal(value) {
        return if is_rate_field(key) {
            d.normalize().to_string()
        } else {
            round_cents(d).to_string()
        };
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// First array-of-objects field in a result, searching one level of nesting
/// (e.g. a mortgage's `schedule.entries`).
pub fn find_series(result: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    const SERIES_KEYS: [&str; 3] = ["entries", "yearly_breakdown", "yearly_summary"];

    for key in SERIES_KEYS {
        if let Some(Value::Array(arr)) = result.get(key) {
            return Some(arr);
        }
    }
    result.values().find_map(|v| match v {
        Value::Object(inner) => find_series(inner),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_field_money_and_rates() {
        assert_eq!(display_field("future_value", &json!("20096.6137")), "$20,096.61");
        assert_eq!(display_field("effective_annual_rate", &json!("0.0722900809")), "7.23%");
        assert_eq!(display_field("down_payment_pct", &json!("0.2")), "20.00%");
        assert_eq!(display_field("payoff_months", &json!(60)), "60");
        assert_eq!(display_field("pmi_required", &json!(false)), "no");
        assert_eq!(display_field("payment_date", &json!("2025-01-01")), "2025-01-01");
    }

    #[test]
    fn test_plain_field_rounds_money_only() {
        assert_eq!(plain_field("balance", &json!("1234.5678")), "1234.57");
        assert_eq!(plain_field("annual_rate", &json!("0.0750")), "0.075");
    }

    #[test]
    fn test_find_series_nested() {
        let v = json!({ "pmi": "0", "schedule": { "entries": [ { "month": 1 } ] } });
        let series = find_series(v.as_object().unwrap()).unwrap();
        assert_eq!(series.len(), 1);
    }
}
