use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, period_rows};

/// Render a result as tables: headline figures first, then one row per
/// period, then warnings and methodology from the envelope.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };
    let result = envelope.get("result").unwrap_or(value);

    if let Some(fields) = result.as_object() {
        print_field_table(fields);
    }
    if let Some(rows) = period_rows(result) {
        println!();
        print_row_table(rows);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of the result's scalar fields. Nested objects such as
/// `measurement` and `summary` are flattened one level with a dotted key.
fn print_field_table(fields: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        match val {
            Value::Array(_) => continue,
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    builder.push_record([format!("{key}.{inner_key}"), format_cell(inner_val)]);
                }
            }
            _ => builder.push_record([key.clone(), format_cell(val)]),
        }
    }
    println!("{}", Table::from(builder));
}

fn print_row_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(no periods)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(format_cell).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
