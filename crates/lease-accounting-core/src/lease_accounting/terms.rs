//! Lease contract terms consumed by every calculator.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseError;
use crate::types::{Money, Rate};
use crate::LeaseResult;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How often the fixed lease payment falls due.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Annual => 1,
        }
    }

    pub fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Number of whole payment periods in a term quoted in months.
    ///
    /// Partial trailing periods are dropped (a 13-month quarterly lease has
    /// four payments).
    pub fn periods_in_term(self, term_months: u32) -> LeaseResult<u32> {
        let periods = term_months / self.months_per_period();
        if periods == 0 {
            return Err(LeaseError::InvalidInput {
                field: "term_months".into(),
                reason: format!(
                    "{} months is shorter than one {} payment period",
                    term_months, self
                ),
            });
        }
        Ok(periods)
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Annual => "annual",
        };
        f.write_str(s)
    }
}

impl FromStr for PaymentFrequency {
    type Err = LeaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "annual" | "annually" => Ok(PaymentFrequency::Annual),
            other => Err(LeaseError::InvalidInput {
                field: "payment_frequency".into(),
                reason: format!("'{other}' is not one of monthly, quarterly, annual"),
            }),
        }
    }
}

/// ASC 842 lessee classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LeaseClassification {
    Finance,
    Operating,
}

impl fmt::Display for LeaseClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseClassification::Finance => f.write_str("finance"),
            LeaseClassification::Operating => f.write_str("operating"),
        }
    }
}

impl FromStr for LeaseClassification {
    type Err = LeaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finance" => Ok(LeaseClassification::Finance),
            "operating" => Ok(LeaseClassification::Operating),
            other => Err(LeaseError::InvalidClassification(format!(
                "'{other}' is neither finance nor operating"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Input record
// ---------------------------------------------------------------------------

/// Terms of a single lease, fixed at commencement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Description of the lease
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_description: Option<String>,
    /// Total number of payment periods
    pub lease_term_periods: u32,
    /// Fixed payment due at the end of every period
    pub periodic_payment: Money,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    /// Incremental borrowing rate (ASC 842) or discount rate (IFRS 16), annual
    pub annual_rate: Rate,
    #[serde(default)]
    pub initial_direct_costs: Money,
    #[serde(default)]
    pub prepaid_rent: Money,
    /// Incentives received from the lessor; reduce the ROU asset
    #[serde(default)]
    pub lease_incentives: Money,
    /// Guaranteed residual value payable at the end of the term
    #[serde(default)]
    pub residual_value: Money,
    /// Only consulted by ASC 842
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<LeaseClassification>,
    /// When present, every schedule entry carries its payment date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commencement_date: Option<NaiveDate>,
}

impl LeaseTerms {
    /// Terms with no costs, incentives, residual, classification or dates.
    pub fn new(
        lease_term_periods: u32,
        periodic_payment: Money,
        payment_frequency: PaymentFrequency,
        annual_rate: Rate,
    ) -> Self {
        LeaseTerms {
            lease_description: None,
            lease_term_periods,
            periodic_payment,
            payment_frequency,
            annual_rate,
            initial_direct_costs: Decimal::ZERO,
            prepaid_rent: Decimal::ZERO,
            lease_incentives: Decimal::ZERO,
            residual_value: Decimal::ZERO,
            classification: None,
            commencement_date: None,
        }
    }

    pub fn validate(&self) -> LeaseResult<()> {
        if self.lease_term_periods == 0 {
            return Err(LeaseError::InvalidInput {
                field: "lease_term_periods".into(),
                reason: "Lease term must be at least one period".into(),
            });
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(LeaseError::InvalidInput {
                field: "annual_rate".into(),
                reason: "Annual rate must not be negative".into(),
            });
        }
        let amounts = [
            ("periodic_payment", self.periodic_payment),
            ("initial_direct_costs", self.initial_direct_costs),
            ("prepaid_rent", self.prepaid_rent),
            ("lease_incentives", self.lease_incentives),
            ("residual_value", self.residual_value),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(LeaseError::InvalidInput {
                    field: field.into(),
                    reason: "Amount must not be negative".into(),
                });
            }
        }
        Ok(())
    }

    /// Undiscounted sum of every periodic payment.
    pub fn total_payments(&self) -> LeaseResult<Money> {
        self.periodic_payment
            .checked_mul(Decimal::from(self.lease_term_periods))
            .ok_or_else(|| LeaseError::InvalidInput {
                field: "periodic_payment".into(),
                reason: "Total payments overflow the decimal range".into(),
            })
    }

    /// Payment date of a 1-indexed period, one frequency step per period
    /// after commencement.
    pub fn period_date(&self, period: u32) -> Option<NaiveDate> {
        let months = period.checked_mul(self.payment_frequency.months_per_period())?;
        self.commencement_date?
            .checked_add_months(Months::new(months))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frequency_periods_per_year() {
        assert_eq!(PaymentFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PaymentFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(PaymentFrequency::Annual.periods_per_year(), 1);
        assert_eq!(PaymentFrequency::Quarterly.months_per_period(), 3);
    }

    #[test]
    fn test_periods_in_term_floors() {
        assert_eq!(PaymentFrequency::Monthly.periods_in_term(60).unwrap(), 60);
        assert_eq!(PaymentFrequency::Quarterly.periods_in_term(13).unwrap(), 4);
        assert_eq!(PaymentFrequency::Annual.periods_in_term(36).unwrap(), 3);
        assert!(PaymentFrequency::Annual.periods_in_term(11).is_err());
    }

    #[test]
    fn test_classification_from_str() {
        assert_eq!(
            "Finance".parse::<LeaseClassification>().unwrap(),
            LeaseClassification::Finance
        );
        assert_eq!(
            " operating ".parse::<LeaseClassification>().unwrap(),
            LeaseClassification::Operating
        );
        let err = "sales-type".parse::<LeaseClassification>().unwrap_err();
        assert!(matches!(err, LeaseError::InvalidClassification(_)));
    }

    #[test]
    fn test_terms_deserialize_with_defaults() {
        let json = r#"{
            "lease_term_periods": 24,
            "periodic_payment": "1000",
            "annual_rate": "0.06",
            "classification": "finance"
        }"#;
        let terms: LeaseTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(terms.initial_direct_costs, Decimal::ZERO);
        assert_eq!(terms.residual_value, Decimal::ZERO);
        assert_eq!(terms.classification, Some(LeaseClassification::Finance));
        assert!(terms.commencement_date.is_none());
    }

    #[test]
    fn test_unknown_classification_rejected_by_serde() {
        let json = r#"{
            "lease_term_periods": 24,
            "periodic_payment": "1000",
            "annual_rate": "0.06",
            "classification": "leveraged"
        }"#;
        assert!(serde_json::from_str::<LeaseTerms>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let mut terms = LeaseTerms::new(12, dec!(100), PaymentFrequency::Monthly, dec!(0.05));
        assert!(terms.validate().is_ok());

        terms.lease_incentives = dec!(-1);
        match terms.validate() {
            Err(LeaseError::InvalidInput { field, .. }) => assert_eq!(field, "lease_incentives"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_term_and_negative_rate() {
        let zero_term = LeaseTerms::new(0, dec!(100), PaymentFrequency::Monthly, dec!(0.05));
        assert!(zero_term.validate().is_err());

        let negative_rate = LeaseTerms::new(12, dec!(100), PaymentFrequency::Monthly, dec!(-0.01));
        assert!(negative_rate.validate().is_err());
    }

    #[test]
    fn test_period_dates_follow_frequency() {
        let mut terms = LeaseTerms::new(8, dec!(100), PaymentFrequency::Quarterly, dec!(0.05));
        assert_eq!(terms.period_date(1), None);

        terms.commencement_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        assert_eq!(terms.period_date(1), NaiveDate::from_ymd_opt(2024, 4, 30));
        assert_eq!(terms.period_date(4), NaiveDate::from_ymd_opt(2025, 1, 31));
    }
}
