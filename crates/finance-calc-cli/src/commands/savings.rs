use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_calc_core::savings::compound_interest::{
    self, CompoundInterestInput, CompoundingFrequency,
};

use super::{form_number, form_rate};
use crate::input;

/// Arguments for the compound interest calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompoundInterestArgs {
    /// Starting balance (e.g. 10000 or $10,000)
    #[arg(long, value_parser = form_number)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7 or 7%)
    #[arg(long, value_parser = form_rate)]
    pub rate: Option<Decimal>,

    /// Number of years to project
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding periods per year: 1, 2, 4, 12, 52 or 365
    #[arg(long, default_value = "12")]
    pub compounding: u32,

    /// Deposit made at the end of every month
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub monthly_contribution: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compound_interest(args: CompoundInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ci_input: CompoundInterestInput = if let Some(ref path) = args.input {
        debug!("reading compound interest input from {path}");
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        CompoundInterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding_frequency: CompoundingFrequency::from_periods(args.compounding)
                .ok_or_else(|| {
                    format!(
                        "--compounding must be one of 1, 2, 4, 12, 52, 365 (got {})",
                        args.compounding
                    )
                })?,
            monthly_contribution: args.monthly_contribution,
        }
    };

    ci_input.validate()?;
    let result = compound_interest::compute_compound_growth(&ci_input)?;
    Ok(serde_json::to_value(result)?)
}
