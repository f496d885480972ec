//! Period-by-period schedule shape shared by the ASC 842 and IFRS 16
//! calculators.
//!
//! Balances are carried in an explicit [`PeriodState`] that each step
//! consumes and returns. Per-period amounts are rounded to cents; the last
//! period is trued up so the closing liability lands exactly on the residual
//! value. Summary totals are always sums over the finished entries.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LeaseError;
use crate::lease_accounting::measurement::InitialMeasurement;
use crate::lease_accounting::terms::{LeaseClassification, LeaseTerms};
use crate::types::{round_money, Money, Rate};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Accounting standard a schedule was produced under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeaseStandard {
    Asc842,
    Ifrs16,
}

impl fmt::Display for LeaseStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseStandard::Asc842 => f.write_str("ASC 842"),
            LeaseStandard::Ifrs16 => f.write_str("IFRS 16"),
        }
    }
}

/// A single row in the lease schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Period number (1-indexed)
    pub period_number: u32,
    /// Payment date, when the lease has a commencement date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_date: Option<NaiveDate>,
    /// Payment made at the end of the period
    pub payment: Money,
    /// Lease liability at start of period
    pub beginning_liability: Money,
    /// Interest on the beginning liability (effective interest method)
    pub interest_expense: Money,
    /// Payment less interest; negative when interest exceeds the payment
    pub principal_reduction: Money,
    /// Lease liability at end of period
    pub ending_liability: Money,
    /// ROU asset at start of period
    pub beginning_rou_asset: Money,
    /// ROU amortization (ASC 842) or depreciation (IFRS 16)
    pub amortization: Money,
    /// ROU asset at end of period, unclamped
    pub ending_rou_asset: Money,
    /// Expense recognised in the period
    pub total_expense: Money,
    /// Liability grew this period because interest exceeded the payment
    pub negative_principal: bool,
}

/// Totals over a complete schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods: u32,
    pub total_payments: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_amortization: Money,
    pub total_expense: Money,
    pub beginning_liability: Money,
    pub ending_liability: Money,
    pub beginning_rou_asset: Money,
    pub ending_rou_asset: Money,
}

impl ScheduleSummary {
    /// Sum the entries. Opening balances come from the first entry and
    /// closing balances from the last.
    pub fn from_entries(entries: &[ScheduleEntry]) -> Self {
        let first = entries.first();
        let last = entries.last();
        ScheduleSummary {
            periods: entries.len() as u32,
            total_payments: entries.iter().map(|e| e.payment).sum(),
            total_interest: entries.iter().map(|e| e.interest_expense).sum(),
            total_principal: entries.iter().map(|e| e.principal_reduction).sum(),
            total_amortization: entries.iter().map(|e| e.amortization).sum(),
            total_expense: entries.iter().map(|e| e.total_expense).sum(),
            beginning_liability: first.map_or(Decimal::ZERO, |e| e.beginning_liability),
            ending_liability: last.map_or(Decimal::ZERO, |e| e.ending_liability),
            beginning_rou_asset: first.map_or(Decimal::ZERO, |e| e.beginning_rou_asset),
            ending_rou_asset: last.map_or(Decimal::ZERO, |e| e.ending_rou_asset),
        }
    }
}

/// Complete schedule for one lease under one standard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseSchedule {
    pub standard: LeaseStandard,
    /// ASC 842 classification; `None` under IFRS 16
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<LeaseClassification>,
    pub measurement: InitialMeasurement,
    pub entries: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

impl LeaseSchedule {
    pub fn assemble(
        standard: LeaseStandard,
        classification: Option<LeaseClassification>,
        measurement: InitialMeasurement,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        let summary = ScheduleSummary::from_entries(&entries);
        LeaseSchedule {
            standard,
            classification,
            measurement,
            entries,
            summary,
        }
    }

    /// Conditions worth surfacing to the caller. Each one is also logged.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.measurement.rou_asset <= Decimal::ZERO {
            let msg = format!(
                "ROU asset at commencement is {}; incentives exceed the liability and costs",
                self.measurement.rou_asset
            );
            warn!("{msg}");
            warnings.push(msg);
        }

        let negative: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| e.negative_principal)
            .map(|e| e.period_number)
            .collect();
        if !negative.is_empty() {
            let msg = format!(
                "Interest exceeds the payment in {} period(s) starting at period {}; the liability grows (negative amortization)",
                negative.len(),
                negative[0]
            );
            warn!("{msg}");
            warnings.push(msg);
        }

        // Half a cent per period of straight-line rounding is expected
        let rounding_tolerance = dec!(0.005) * Decimal::from(self.summary.periods);
        if self.summary.ending_rou_asset < -rounding_tolerance {
            let msg = format!(
                "ROU asset ends the term at {}; straight-line amounts were not clamped at zero",
                self.summary.ending_rou_asset
            );
            warn!("{msg}");
            warnings.push(msg);
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Period stepping
// ---------------------------------------------------------------------------

/// Running balances carried from one period into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PeriodState {
    pub liability: Money,
    pub rou_asset: Money,
}

impl PeriodState {
    pub fn opening(measurement: &InitialMeasurement) -> Self {
        PeriodState {
            liability: measurement.lease_liability,
            rou_asset: measurement.rou_asset,
        }
    }
}

/// Liability movement for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiabilityStep {
    pub interest: Money,
    pub principal: Money,
    pub ending: Money,
}

/// How a calculator recognises the ROU side of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpenseSplit {
    pub amortization: Money,
    pub total_expense: Money,
}

/// Effective-interest roll-forward of the liability for one period.
///
/// In the final period the principal is whatever takes the balance to
/// `closing_target` and the interest is the rest of the payment, so rounding
/// drift never survives the term.
pub(crate) fn accrete_liability(
    beginning: Money,
    rate: Rate,
    payment: Money,
    final_period: bool,
    closing_target: Money,
) -> LiabilityStep {
    if final_period {
        let principal = beginning - closing_target;
        return LiabilityStep {
            interest: payment - principal,
            principal,
            ending: closing_target,
        };
    }

    let interest = round_money(beginning * rate);
    let principal = payment - interest;
    LiabilityStep {
        interest,
        principal,
        ending: beginning - principal,
    }
}

/// Roll one period forward and return its entry with the next state.
pub(crate) fn roll_period<F>(
    terms: &LeaseTerms,
    rate: Rate,
    state: PeriodState,
    period: u32,
    split: &mut F,
) -> (ScheduleEntry, PeriodState)
where
    F: FnMut(&LiabilityStep) -> ExpenseSplit,
{
    let step = accrete_liability(
        state.liability,
        rate,
        terms.periodic_payment,
        period == terms.lease_term_periods,
        terms.residual_value,
    );
    let expense = split(&step);
    let ending_rou_asset = state.rou_asset - expense.amortization;

    let entry = ScheduleEntry {
        period_number: period,
        period_date: terms.period_date(period),
        payment: terms.periodic_payment,
        beginning_liability: state.liability,
        interest_expense: step.interest,
        principal_reduction: step.principal,
        ending_liability: step.ending,
        beginning_rou_asset: state.rou_asset,
        amortization: expense.amortization,
        ending_rou_asset,
        total_expense: expense.total_expense,
        negative_principal: step.principal < Decimal::ZERO,
    };
    let next = PeriodState {
        liability: step.ending,
        rou_asset: ending_rou_asset,
    };
    (entry, next)
}

/// Fold [`roll_period`] over periods `1..=N` starting from the initial
/// measurement.
pub(crate) fn build_entries<F>(
    terms: &LeaseTerms,
    measurement: &InitialMeasurement,
    mut split: F,
) -> Vec<ScheduleEntry>
where
    F: FnMut(&LiabilityStep) -> ExpenseSplit,
{
    let rate = measurement.periodic_rate;
    (1..=terms.lease_term_periods)
        .scan(PeriodState::opening(measurement), |state, period| {
            let (entry, next) = roll_period(terms, rate, *state, period, &mut split);
            *state = next;
            Some(entry)
        })
        .collect()
}

/// Straight-line share of `amount` per period, to cents.
pub(crate) fn straight_line(amount: Money, periods: u32) -> LeaseResult<Money> {
    if periods == 0 {
        return Err(LeaseError::DivisionByZero {
            context: "straight-line allocation over zero periods".into(),
        });
    }
    Ok(round_money(amount / Decimal::from(periods)))
}
