use serde_json::Value;

use super::format_cell;

/// Print just the headline figure: the opening lease liability, or the
/// liability difference for a comparison.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let candidates = [
        result.get("liability_difference"),
        result.pointer("/measurement/lease_liability"),
        result.get("lease_liability"),
    ];
    if let Some(val) = candidates.into_iter().flatten().find(|v| !v.is_null()) {
        println!("{}", format_cell(val));
        return;
    }

    println!("{}", format_cell(result));
}
