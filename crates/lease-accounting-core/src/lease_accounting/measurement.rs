//! Initial measurement of the lease liability and right-of-use asset.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::lease_accounting::terms::LeaseTerms;
use crate::time_value;
use crate::types::{round_money, Money, Rate};
use crate::LeaseResult;

/// Balances recognised at commencement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialMeasurement {
    /// Annual rate divided by payments per year
    pub periodic_rate: Rate,
    /// PV of the payment stream plus the discounted residual value, to cents
    pub lease_liability: Money,
    /// Liability + initial direct costs + prepaid rent - incentives
    pub rou_asset: Money,
}

/// Measure the opening lease liability and ROU asset.
pub fn measure(terms: &LeaseTerms) -> LeaseResult<InitialMeasurement> {
    terms.validate()?;

    let periodic_rate = time_value::periodic_rate(
        terms.annual_rate,
        terms.payment_frequency.periods_per_year(),
    )?;
    let pv = time_value::present_value(
        terms.periodic_payment,
        periodic_rate,
        terms.lease_term_periods,
        terms.residual_value,
    )?;
    let lease_liability = round_money(pv);
    ensure_schedule_headroom(terms)?;

    let rou_asset = lease_liability
        .checked_add(terms.initial_direct_costs)
        .and_then(|v| v.checked_add(terms.prepaid_rent))
        .and_then(|v| v.checked_sub(terms.lease_incentives))
        .ok_or_else(|| overflow("rou_asset"))?;

    Ok(InitialMeasurement {
        periodic_rate,
        lease_liability,
        rou_asset,
    })
}

/// Running balances and period sums stay within a small multiple of every
/// amount on the lease, so reject terms whose combined amounts leave no room
/// for that multiple in a `Decimal`.
fn ensure_schedule_headroom(terms: &LeaseTerms) -> LeaseResult<()> {
    let combined = [
        terms.residual_value,
        terms.initial_direct_costs,
        terms.prepaid_rent,
        terms.lease_incentives,
    ]
    .into_iter()
    .try_fold(terms.total_payments()?, |acc, amount| acc.checked_add(amount));

    combined
        .and_then(|total| total.checked_mul(SCHEDULE_HEADROOM))
        .map(|_| ())
        .ok_or_else(|| overflow("lease_terms"))
}

const SCHEDULE_HEADROOM: Decimal = dec!(4);

fn overflow(field: &str) -> LeaseError {
    LeaseError::InvalidInput {
        field: field.into(),
        reason: "Lease amounts overflow the decimal range".into(),
    }
}
