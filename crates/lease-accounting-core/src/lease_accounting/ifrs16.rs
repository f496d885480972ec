//! IFRS 16 lessee schedules.
//!
//! IFRS 16 has a single lessee model: every lease carries interest on the
//! liability and straight-line depreciation of the ROU asset.

use std::time::Instant;

use serde_json::json;
use tracing::debug;

use crate::lease_accounting::measurement::measure;
use crate::lease_accounting::schedule::{
    build_entries, straight_line, ExpenseSplit, LeaseSchedule, LeaseStandard,
};
use crate::lease_accounting::terms::LeaseTerms;
use crate::types::{with_metadata, ComputationOutput};
use crate::LeaseResult;

/// Build the IFRS 16 schedule for `terms`. Any classification on the terms
/// is ignored.
pub fn calculate_ifrs16_schedule(
    terms: &LeaseTerms,
) -> LeaseResult<ComputationOutput<LeaseSchedule>> {
    let start = Instant::now();

    let measurement = measure(terms)?;
    debug!(
        periods = terms.lease_term_periods,
        lease_liability = %measurement.lease_liability,
        "building IFRS 16 schedule"
    );

    let depreciation = straight_line(measurement.rou_asset, terms.lease_term_periods)?;
    let entries = build_entries(terms, &measurement, |step| ExpenseSplit {
        amortization: depreciation,
        total_expense: step.interest + depreciation,
    });

    let schedule = LeaseSchedule::assemble(LeaseStandard::Ifrs16, None, measurement, entries);
    let warnings = schedule.warnings();

    debug!(
        total_interest = %schedule.summary.total_interest,
        total_depreciation = %schedule.summary.total_amortization,
        "IFRS 16 schedule complete"
    );

    let assumptions = json!({
        "payment_frequency": terms.payment_frequency,
        "periodic_rate": schedule.measurement.periodic_rate.to_string(),
        "rounding": "per period to cents, final period trued up",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 single lessee model: effective interest on liability, straight-line ROU depreciation",
        &assumptions,
        warnings,
        elapsed,
        schedule,
    ))
}
