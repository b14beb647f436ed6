use serde_json::Value;

use super::display_field;

/// Headline figure of each calculator, in priority order.
const HEADLINE_KEYS: [&str; 3] = ["total_monthly_payment", "monthly_payment", "future_value"];

/// Print just the headline figure, formatted for display.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key) {
                println!("{}", display_field(key, val));
                return;
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, display_field(key, val));
            return;
        }
    }

    println!("{}", display_field("", result_obj));
}
