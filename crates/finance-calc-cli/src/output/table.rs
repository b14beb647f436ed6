use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_field;

/// Longest series printed in full; longer ones show head and tail rows.
const MAX_SERIES_ROWS: usize = 24;

/// Format output as tables: headline figures first, then each breakdown
/// series, then warnings and methodology from the envelope.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_result(result, None);
                print_envelope(map);
            }
            _ => print_fields(map),
        },
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, title: Option<&str>) {
    if let Some(t) = title {
        println!("\n{}:", t);
    }
    print_fields(result);

    for (key, val) in result {
        match val {
            Value::Array(rows) => print_series(key, rows),
            Value::Object(inner) => print_result(inner, Some(key)),
            _ => {}
        }
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        builder.push_record([key.as_str(), &display_field(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_series(name: &str, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    let push_row = |builder: &mut Builder, row: &Value| {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(|v| display_field(h, v)).unwrap_or_default())
                .collect();
            builder.push_record(cells);
        }
    };

    if rows.len() <= MAX_SERIES_ROWS {
        for row in rows {
            push_row(&mut builder, row);
        }
    } else {
        let half = MAX_SERIES_ROWS / 2;
        for row in &rows[..half] {
            push_row(&mut builder, row);
        }
        builder.push_record(headers.iter().map(|_| "...".to_string()));
        for row in &rows[rows.len() - half..] {
            push_row(&mut builder, row);
        }
    }

    println!("\n{} ({} rows):", name, rows.len());
    println!("{}", Table::from(builder));
}

fn print_envelope(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
