use serde_json::Value;
use std::io;

use super::{format_cell, period_rows};

/// Write the per-period rows as CSV to stdout. Results without rows (such as
/// an initial measurement) are written as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match (period_rows(result), result.as_object()) {
        (Some(rows), _) => write_rows(&mut wtr, rows),
        (None, Some(fields)) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &format_cell(val)]);
            }
        }
        (None, None) => {
            let _ = wtr.write_record([&format_cell(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_cell).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
