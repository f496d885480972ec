use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use lease_accounting_core::lease_accounting::asc842;
use lease_accounting_core::lease_accounting::comparison::{self, ComparisonInput};
use lease_accounting_core::lease_accounting::ifrs16;
use lease_accounting_core::lease_accounting::{
    measure, LeaseClassification, LeaseTerms, PaymentFrequency,
};

use crate::input;

/// Lease terms supplied as flags when no JSON input is given
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LeaseArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Number of payment periods
    #[arg(long, conflicts_with = "term_months")]
    pub periods: Option<u32>,

    /// Lease term in months, converted to whole payment periods
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Fixed payment per period
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Payment frequency: monthly, quarterly or annual
    #[arg(long, default_value = "monthly")]
    pub frequency: String,

    /// Annual discount rate / IBR (e.g. 0.06 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Initial direct costs
    #[arg(long)]
    pub initial_direct_costs: Option<Decimal>,

    /// Rent paid before commencement
    #[arg(long)]
    pub prepaid_rent: Option<Decimal>,

    /// Incentives received from the lessor
    #[arg(long)]
    pub incentives: Option<Decimal>,

    /// Guaranteed residual value due at the end of the term
    #[arg(long)]
    pub residual_value: Option<Decimal>,

    /// ASC 842 classification: finance or operating (overrides the input file)
    #[arg(long)]
    pub classification: Option<String>,
}

/// Arguments for the ASC 842 vs IFRS 16 comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub lease: LeaseArgs,

    /// IFRS 16 annual discount rate, when it differs from the ASC 842 IBR
    #[arg(long)]
    pub ifrs16_rate: Option<Decimal>,
}

pub fn run_measure(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(&args)?;
    let measurement = measure(&terms)?;
    Ok(json!({ "result": measurement }))
}

pub fn run_asc842(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(&args)?;
    let result = asc842::calculate_asc842_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ifrs16(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = read_terms(&args)?;
    let result = ifrs16::calculate_ifrs16_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut comparison_input: ComparisonInput = if let Some(ref path) = args.lease.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ComparisonInput {
            terms: terms_from_flags(&args.lease)?,
            ifrs16_annual_rate: None,
        }
    };
    apply_classification(&mut comparison_input.terms, &args.lease)?;
    if args.ifrs16_rate.is_some() {
        comparison_input.ifrs16_annual_rate = args.ifrs16_rate;
    }

    let result = comparison::compare_standards(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}

// ---------------------------------------------------------------------------
// Input assembly
// ---------------------------------------------------------------------------

fn read_terms(args: &LeaseArgs) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    let mut terms: LeaseTerms = if let Some(ref path) = args.input {
        debug!(path = %path, "reading lease terms from file");
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        debug!("reading lease terms from stdin");
        serde_json::from_value(data)?
    } else {
        terms_from_flags(args)?
    };
    apply_classification(&mut terms, args)?;
    Ok(terms)
}

fn terms_from_flags(args: &LeaseArgs) -> Result<LeaseTerms, Box<dyn std::error::Error>> {
    let frequency: PaymentFrequency = args.frequency.parse()?;
    let periods = match (args.periods, args.term_months) {
        (Some(periods), _) => periods,
        (None, Some(months)) => frequency.periods_in_term(months)?,
        (None, None) => {
            return Err("--periods or --term-months is required (or provide --input)".into())
        }
    };

    let mut terms = LeaseTerms::new(
        periods,
        args.payment.ok_or("--payment is required (or provide --input)")?,
        frequency,
        args.rate.ok_or("--rate is required (or provide --input)")?,
    );
    terms.initial_direct_costs = args.initial_direct_costs.unwrap_or(Decimal::ZERO);
    terms.prepaid_rent = args.prepaid_rent.unwrap_or(Decimal::ZERO);
    terms.lease_incentives = args.incentives.unwrap_or(Decimal::ZERO);
    terms.residual_value = args.residual_value.unwrap_or(Decimal::ZERO);
    Ok(terms)
}

fn apply_classification(
    terms: &mut LeaseTerms,
    args: &LeaseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref raw) = args.classification {
        terms.classification = Some(raw.parse::<LeaseClassification>()?);
    }
    Ok(())
}
