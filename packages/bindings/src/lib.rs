use napi::Result as NapiResult;
use napi_derive::napi;

use lease_accounting_core::lease_accounting::{self, LeaseTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_terms(input_json: &str) -> NapiResult<LeaseTerms> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

#[napi]
pub fn measure_lease(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::measure(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn asc842_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::asc842::calculate_asc842_schedule(&terms)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn ifrs16_schedule(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = lease_accounting::ifrs16::calculate_ifrs16_schedule(&terms)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_lease_standards(input_json: String) -> NapiResult<String> {
    let input: lease_accounting::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lease_accounting::comparison::compare_standards(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
