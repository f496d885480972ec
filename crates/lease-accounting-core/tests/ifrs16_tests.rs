use lease_accounting_core::lease_accounting::ifrs16::calculate_ifrs16_schedule;
use lease_accounting_core::lease_accounting::{LeaseTerms, PaymentFrequency};
use lease_accounting_core::LeaseError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn vehicle_lease() -> LeaseTerms {
    // 5-year quarterly vehicle lease at an 8% discount rate
    let mut terms = LeaseTerms::new(20, dec!(7500), PaymentFrequency::Quarterly, dec!(0.08));
    terms.lease_description = Some("Fleet vehicles".into());
    terms.initial_direct_costs = dec!(1500);
    terms
}

#[test]
fn test_opening_balances() {
    let result = calculate_ifrs16_schedule(&vehicle_lease()).unwrap();
    let m = &result.result.measurement;

    assert_eq!(m.periodic_rate, dec!(0.02));
    // 7,500 * (1 - 1.02^-20) / 0.02
    assert_eq!(m.lease_liability, dec!(122635.75));
    assert_eq!(m.rou_asset, dec!(124135.75));
}

#[test]
fn test_depreciation_constant_and_reconciles() {
    let result = calculate_ifrs16_schedule(&vehicle_lease()).unwrap();
    let s = &result.result;

    // 124,135.75 / 20 = 6,206.7875
    assert!(s.entries.iter().all(|e| e.amortization == dec!(6206.79)));
    assert_eq!(
        s.summary.total_interest + s.summary.total_amortization,
        s.summary.total_expense
    );
    assert_eq!(
        s.summary.total_interest + s.summary.total_principal,
        s.summary.total_payments
    );
}

#[test]
fn test_liability_runs_to_zero() {
    let result = calculate_ifrs16_schedule(&vehicle_lease()).unwrap();
    let s = &result.result;

    for pair in s.entries.windows(2) {
        assert_eq!(pair[0].ending_liability, pair[1].beginning_liability);
    }
    let last = s.entries.last().unwrap();
    assert_eq!(last.ending_liability, Decimal::ZERO);
    assert_eq!(last.principal_reduction, last.beginning_liability);
    assert_eq!(s.summary.total_principal, s.measurement.lease_liability);
}

#[test]
fn test_expense_front_loaded() {
    let result = calculate_ifrs16_schedule(&vehicle_lease()).unwrap();
    let entries = &result.result.entries;
    for pair in entries.windows(2) {
        assert!(pair[0].total_expense >= pair[1].total_expense);
    }
}

#[test]
fn test_zero_rate() {
    let mut terms = vehicle_lease();
    terms.annual_rate = Decimal::ZERO;
    let result = calculate_ifrs16_schedule(&terms).unwrap();
    let s = &result.result;

    assert_eq!(s.measurement.lease_liability, dec!(150000));
    assert!(s.entries.iter().all(|e| e.interest_expense.is_zero()));
    assert!(s.entries.iter().all(|e| e.principal_reduction == dec!(7500)));
    assert_eq!(s.summary.total_interest, Decimal::ZERO);
}

#[test]
fn test_residual_left_outstanding() {
    let mut terms = vehicle_lease();
    terms.residual_value = dec!(20000);
    let result = calculate_ifrs16_schedule(&terms).unwrap();
    assert_eq!(result.result.summary.ending_liability, dec!(20000));
}

#[test]
fn test_idempotent() {
    let terms = vehicle_lease();
    let a = calculate_ifrs16_schedule(&terms).unwrap();
    let b = calculate_ifrs16_schedule(&terms).unwrap();
    assert_eq!(a.result.entries, b.result.entries);
    assert_eq!(a.result.measurement, b.result.measurement);
}

#[test]
fn test_schedule_serializes_decimals_as_strings() {
    let result = calculate_ifrs16_schedule(&vehicle_lease()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["result"]["standard"], "Ifrs16");
    assert_eq!(value["result"]["measurement"]["lease_liability"], "122635.75");
    assert!(value["result"].get("classification").is_none());
    assert_eq!(value["result"]["entries"].as_array().unwrap().len(), 20);
}

#[test]
fn test_negative_payment_rejected() {
    let mut terms = vehicle_lease();
    terms.periodic_payment = dec!(-7500);
    match calculate_ifrs16_schedule(&terms) {
        Err(LeaseError::InvalidInput { field, .. }) => assert_eq!(field, "periodic_payment"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
