use chrono::NaiveDate;
use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_calc_core::lending::amortization::{self, LoanTerms};
use finance_calc_core::lending::mortgage::{self, MortgageInput};

use super::{form_number, form_rate};
use crate::input;

/// Arguments for the loan payment calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, value_parser = form_number)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7.5 or 7.5%)
    #[arg(long, value_parser = form_rate)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Additional principal paid every month
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub extra_payment: Decimal,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the mortgage calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MortgageArgs {
    /// Purchase price of the home
    #[arg(long, value_parser = form_number)]
    pub home_price: Option<Decimal>,

    /// Cash paid up front
    #[arg(long, value_parser = form_number)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5 or 6.5%)
    #[arg(long, value_parser = form_rate)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub years: u32,

    /// Annual property tax
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual homeowner's insurance premium
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub insurance: Decimal,

    /// Annual PMI rate in percent of the loan amount, charged below 20% down
    #[arg(long, value_parser = form_rate, default_value = "0.5")]
    pub pmi_rate: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        debug!("reading loan terms from {path}");
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            extra_monthly_payment: args.extra_payment,
            start_date: args.start_date,
        }
    };

    terms.validate()?;
    let result = amortization::generate_amortization_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mtg_input: MortgageInput = if let Some(ref path) = args.input {
        debug!("reading mortgage input from {path}");
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        MortgageInput {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years,
            annual_property_tax: args.property_tax,
            annual_home_insurance: args.insurance,
            annual_pmi_rate: args.pmi_rate,
        }
    };

    mtg_input.validate()?;
    let result = mortgage::compute_mortgage_payment(&mtg_input)?;
    Ok(serde_json::to_value(result)?)
}
