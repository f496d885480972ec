//! ASC 842 lessee schedules.
//!
//! Finance leases recognise interest on the liability (effective interest
//! method) plus straight-line amortization of the ROU asset, so expense is
//! front-loaded. Operating leases recognise a single straight-line lease
//! cost; ROU amortization is the plug between that cost and the interest
//! accreted on the liability.

use std::time::Instant;

use serde_json::json;
use tracing::debug;

use crate::error::LeaseError;
use crate::lease_accounting::measurement::{measure, InitialMeasurement};
use crate::lease_accounting::schedule::{
    build_entries, straight_line, ExpenseSplit, LeaseSchedule, LeaseStandard, ScheduleEntry,
};
use crate::lease_accounting::terms::{LeaseClassification, LeaseTerms};
use crate::types::{with_metadata, ComputationOutput};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the ASC 842 schedule for `terms`, branching on its classification.
pub fn calculate_asc842_schedule(
    terms: &LeaseTerms,
) -> LeaseResult<ComputationOutput<LeaseSchedule>> {
    let start = Instant::now();

    let classification = terms.classification.ok_or_else(|| {
        LeaseError::InvalidClassification(
            "ASC 842 requires a finance or operating classification".into(),
        )
    })?;
    let measurement = measure(terms)?;

    debug!(
        periods = terms.lease_term_periods,
        %classification,
        lease_liability = %measurement.lease_liability,
        "building ASC 842 schedule"
    );

    let entries = match classification {
        LeaseClassification::Finance => finance_entries(terms, &measurement)?,
        LeaseClassification::Operating => operating_entries(terms, &measurement)?,
    };

    let schedule = LeaseSchedule::assemble(
        LeaseStandard::Asc842,
        Some(classification),
        measurement,
        entries,
    );
    let warnings = schedule.warnings();

    debug!(
        total_interest = %schedule.summary.total_interest,
        total_amortization = %schedule.summary.total_amortization,
        "ASC 842 schedule complete"
    );

    let methodology = match classification {
        LeaseClassification::Finance => {
            "ASC 842 finance lease: effective interest on liability, straight-line ROU amortization"
        }
        LeaseClassification::Operating => {
            "ASC 842 operating lease: straight-line single lease cost, ROU amortization as plug"
        }
    };
    let assumptions = json!({
        "classification": classification,
        "payment_frequency": terms.payment_frequency,
        "periodic_rate": schedule.measurement.periodic_rate.to_string(),
        "rounding": "per period to cents, final period trued up",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &assumptions,
        warnings,
        elapsed,
        schedule,
    ))
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

fn finance_entries(
    terms: &LeaseTerms,
    measurement: &InitialMeasurement,
) -> LeaseResult<Vec<ScheduleEntry>> {
    let amortization = straight_line(measurement.rou_asset, terms.lease_term_periods)?;

    Ok(build_entries(terms, measurement, |step| ExpenseSplit {
        amortization,
        total_expense: step.interest + amortization,
    }))
}

fn operating_entries(
    terms: &LeaseTerms,
    measurement: &InitialMeasurement,
) -> LeaseResult<Vec<ScheduleEntry>> {
    let total_lease_cost = terms.total_payments()? + terms.initial_direct_costs;
    let straight_line_cost = straight_line(total_lease_cost, terms.lease_term_periods)?;

    Ok(build_entries(terms, measurement, |step| ExpenseSplit {
        amortization: straight_line_cost - step.interest,
        total_expense: straight_line_cost,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease_accounting::terms::PaymentFrequency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn office_lease(classification: LeaseClassification) -> LeaseTerms {
        let mut terms = LeaseTerms::new(24, dec!(1000), PaymentFrequency::Monthly, dec!(0.06));
        terms.classification = Some(classification);
        terms
    }

    #[test]
    fn test_finance_first_period() {
        let result = calculate_asc842_schedule(&office_lease(LeaseClassification::Finance)).unwrap();
        let first = &result.result.entries[0];

        assert_eq!(first.beginning_liability, dec!(22562.87));
        assert_eq!(first.interest_expense, dec!(112.81));
        assert_eq!(first.principal_reduction, dec!(887.19));
        // 22,562.87 / 24 = 940.119...
        assert_eq!(first.amortization, dec!(940.12));
        assert_eq!(first.total_expense, dec!(1052.93));
    }

    #[test]
    fn test_finance_final_liability_is_zero() {
        let result = calculate_asc842_schedule(&office_lease(LeaseClassification::Finance)).unwrap();
        let last = result.result.entries.last().unwrap();
        assert_eq!(last.period_number, 24);
        assert_eq!(last.ending_liability, Decimal::ZERO);
        assert_eq!(result.result.summary.total_principal, dec!(22562.87));
    }

    #[test]
    fn test_operating_constant_expense() {
        let result =
            calculate_asc842_schedule(&office_lease(LeaseClassification::Operating)).unwrap();
        let entries = &result.result.entries;

        assert!(entries.iter().all(|e| e.total_expense == dec!(1000)));
        assert_eq!(entries[0].amortization, dec!(1000) - entries[0].interest_expense);
        assert_eq!(entries.last().unwrap().ending_liability, Decimal::ZERO);
    }

    #[test]
    fn test_operating_includes_initial_direct_costs() {
        let mut terms = office_lease(LeaseClassification::Operating);
        terms.initial_direct_costs = dec!(2400);
        let result = calculate_asc842_schedule(&terms).unwrap();
        // (24,000 + 2,400) / 24
        assert!(result
            .result
            .entries
            .iter()
            .all(|e| e.total_expense == dec!(1100)));
    }

    #[test]
    fn test_missing_classification_is_rejected() {
        let mut terms = office_lease(LeaseClassification::Finance);
        terms.classification = None;
        let err = calculate_asc842_schedule(&terms).unwrap_err();
        assert!(matches!(err, LeaseError::InvalidClassification(_)));
    }

    #[test]
    fn test_invalid_terms_produce_no_schedule() {
        let mut terms = office_lease(LeaseClassification::Finance);
        terms.periodic_payment = dec!(-1);
        assert!(matches!(
            calculate_asc842_schedule(&terms),
            Err(LeaseError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_output_envelope() {
        let result = calculate_asc842_schedule(&office_lease(LeaseClassification::Finance)).unwrap();
        assert!(result.methodology.contains("finance"));
        assert!(result.warnings.is_empty());
        assert_eq!(result.result.standard, LeaseStandard::Asc842);
        assert_eq!(
            result.result.classification,
            Some(LeaseClassification::Finance)
        );
    }

    #[test]
    fn test_negative_principal_warns() {
        // 1% a month on 100,000 is 1,000 of interest against a 500 payment
        let mut terms = LeaseTerms::new(12, dec!(500), PaymentFrequency::Monthly, dec!(0.12));
        terms.residual_value = dec!(110000);
        terms.classification = Some(LeaseClassification::Finance);
        let result = calculate_asc842_schedule(&terms).unwrap();

        assert!(result.result.entries[0].negative_principal);
        assert!(result.warnings.iter().any(|w| w.contains("negative amortization")));
        assert_eq!(
            result.result.entries.last().unwrap().ending_liability,
            dec!(110000)
        );
    }
}
