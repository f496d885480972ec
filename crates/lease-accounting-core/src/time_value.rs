use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LeaseError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

/// Periodic rate from an annual rate: `annual_rate / payments_per_year`.
pub fn periodic_rate(annual_rate: Rate, payments_per_year: u32) -> LeaseResult<Rate> {
    if payments_per_year == 0 {
        return Err(LeaseError::InvalidInput {
            field: "payments_per_year".into(),
            reason: "Payments per year must be > 0".into(),
        });
    }
    Ok(annual_rate / Decimal::from(payments_per_year))
}

/// Discount factor `(1 + rate)^-n_periods`.
///
/// Built by repeated multiplication of `1 / (1 + rate)` rather than by a
/// fractional power, so hundreds of periods stay exact to the 28th digit.
pub fn discount_factor(rate: Rate, n_periods: u32) -> LeaseResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(LeaseError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let per_period = Decimal::ONE / (Decimal::ONE + rate);
    let mut factor = Decimal::ONE;
    for t in 0..n_periods {
        factor = factor
            .checked_mul(per_period)
            .ok_or_else(|| LeaseError::InvalidInput {
                field: "rate".into(),
                reason: format!("Discount factor diverges at period {}", t + 1),
            })?;
    }
    Ok(factor)
}

/// Present value of an ordinary annuity of `payment` over `n_periods`,
/// plus `residual` received at the end of the last period.
pub fn present_value(
    payment: Money,
    rate: Rate,
    n_periods: u32,
    residual: Money,
) -> LeaseResult<Money> {
    if n_periods < 1 {
        return Err(LeaseError::InvalidInput {
            field: "n_periods".into(),
            reason: "Number of periods must be >= 1".into(),
        });
    }
    if payment < Decimal::ZERO {
        return Err(LeaseError::InvalidInput {
            field: "payment".into(),
            reason: "Payment must not be negative".into(),
        });
    }

    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(n_periods))
            .and_then(|total| total.checked_add(residual))
            .ok_or_else(|| overflow("payment"));
    }

    let factor = discount_factor(rate, n_periods)?;
    let annuity_factor = (Decimal::ONE - factor)
        .checked_div(rate)
        .ok_or_else(|| overflow("rate"))?;
    let annuity_pv = payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| overflow("payment"))?;
    let residual_pv = residual
        .checked_mul(factor)
        .ok_or_else(|| overflow("residual"))?;
    annuity_pv
        .checked_add(residual_pv)
        .ok_or_else(|| overflow("payment"))
}

fn overflow(field: &str) -> LeaseError {
    LeaseError::InvalidInput {
        field: field.into(),
        reason: "Present value overflows the decimal range".into(),
    }
}
