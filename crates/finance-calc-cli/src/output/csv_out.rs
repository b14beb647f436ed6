use serde_json::{Map, Value};
use std::io;

use super::{find_series, plain_field};

/// Write the calculator's chart series (amortization entries or yearly
/// breakdown) as CSV. Results without a series fall back to field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(Value::as_object);

    match result {
        Some(map) => match find_series(map) {
            Some(series) => write_series(&mut wtr, series),
            None => write_fields(&mut wtr, map),
        },
        None => {
            if let Value::Object(map) = value {
                write_fields(&mut wtr, map);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        if val.is_array() || val.is_object() {
            continue;
        }
        let _ = wtr.write_record([key.as_str(), &plain_field(key, val)]);
    }
}

fn write_series<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(|v| plain_field(h, v)).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
