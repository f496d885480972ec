//! Side-by-side ASC 842 and IFRS 16 schedules for the same lease.
//!
//! A lessee reporting under both frameworks usually discounts with its IBR
//! under ASC 842 and may use the rate implicit in the lease under IFRS 16,
//! so the IFRS 16 rate can be overridden.

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::LeaseError;
use crate::lease_accounting::asc842::calculate_asc842_schedule;
use crate::lease_accounting::ifrs16::calculate_ifrs16_schedule;
use crate::lease_accounting::schedule::{LeaseSchedule, ScheduleSummary};
use crate::lease_accounting::terms::{LeaseClassification, LeaseTerms};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    #[serde(flatten)]
    pub terms: LeaseTerms,
    /// Annual discount rate for IFRS 16; defaults to `terms.annual_rate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifrs16_annual_rate: Option<Rate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodExpenseComparison {
    pub period_number: u32,
    pub asc842_expense: Money,
    pub ifrs16_expense: Money,
    /// IFRS 16 expense minus ASC 842 expense
    pub difference: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardsComparison {
    pub classification: LeaseClassification,
    pub asc842_lease_liability: Money,
    pub ifrs16_lease_liability: Money,
    /// IFRS 16 liability minus ASC 842 liability
    pub liability_difference: Money,
    pub total_expense_difference: Money,
    pub asc842_front_loaded: bool,
    pub ifrs16_front_loaded: bool,
    pub asc842_summary: ScheduleSummary,
    pub ifrs16_summary: ScheduleSummary,
    pub periods: Vec<PeriodExpenseComparison>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run both standards on the same lease and report where they differ.
pub fn compare_standards(
    input: &ComparisonInput,
) -> LeaseResult<ComputationOutput<StandardsComparison>> {
    let start = Instant::now();

    let classification = input.terms.classification.ok_or_else(|| {
        LeaseError::InvalidClassification(
            "comparison requires a finance or operating classification for ASC 842".into(),
        )
    })?;
    let asc842 = calculate_asc842_schedule(&input.terms)?;

    let mut ifrs16_terms = input.terms.clone();
    if let Some(rate) = input.ifrs16_annual_rate {
        ifrs16_terms.annual_rate = rate;
    }
    let ifrs16 = calculate_ifrs16_schedule(&ifrs16_terms)?;

    let mut warnings: Vec<String> = Vec::new();
    warnings.extend(asc842.warnings.iter().map(|w| format!("ASC 842: {w}")));
    warnings.extend(ifrs16.warnings.iter().map(|w| format!("IFRS 16: {w}")));

    let a = asc842.result;
    let i = ifrs16.result;

    let periods: Vec<PeriodExpenseComparison> = a
        .entries
        .iter()
        .zip(i.entries.iter())
        .map(|(ae, ie)| PeriodExpenseComparison {
            period_number: ae.period_number,
            asc842_expense: ae.total_expense,
            ifrs16_expense: ie.total_expense,
            difference: ie.total_expense - ae.total_expense,
        })
        .collect();

    let comparison = StandardsComparison {
        classification,
        asc842_lease_liability: a.measurement.lease_liability,
        ifrs16_lease_liability: i.measurement.lease_liability,
        liability_difference: i.measurement.lease_liability - a.measurement.lease_liability,
        total_expense_difference: i.summary.total_expense - a.summary.total_expense,
        asc842_front_loaded: is_front_loaded(&a),
        ifrs16_front_loaded: is_front_loaded(&i),
        asc842_summary: a.summary,
        ifrs16_summary: i.summary,
        periods,
    };

    let assumptions = json!({
        "asc842_annual_rate": input.terms.annual_rate.to_string(),
        "ifrs16_annual_rate": ifrs16_terms.annual_rate.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ASC 842 vs IFRS 16 lessee schedules on identical lease terms",
        &assumptions,
        warnings,
        elapsed,
        comparison,
    ))
}

fn is_front_loaded(schedule: &LeaseSchedule) -> bool {
    match (schedule.entries.first(), schedule.entries.last()) {
        (Some(first), Some(last)) => first.total_expense - last.total_expense > Decimal::ZERO,
        _ => false,
    }
}
