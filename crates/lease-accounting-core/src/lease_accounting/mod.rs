//! Lessee accounting under ASC 842 and IFRS 16.
//!
//! Lease terms flow one way: [`measurement::measure`] derives the opening
//! lease liability and right-of-use asset, then a calculator rolls both
//! balances forward period by period into a [`schedule::LeaseSchedule`].

pub mod measurement;
pub mod schedule;
pub mod terms;

#[cfg(feature = "asc842")]
pub mod asc842;

#[cfg(feature = "ifrs16")]
pub mod ifrs16;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use measurement::{measure, InitialMeasurement};
pub use schedule::{LeaseSchedule, LeaseStandard, ScheduleEntry, ScheduleSummary};
pub use terms::{LeaseClassification, LeaseTerms, PaymentFrequency};
