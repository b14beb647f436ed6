use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_calc_core::retirement::plan_401k::{self, RetirementAccountInput};

use super::{form_number, form_rate};
use crate::input;

/// Arguments for the 401(k) calculator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct Retirement401kArgs {
    /// Age today
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Age at retirement (must exceed current age)
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Current account balance
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub balance: Decimal,

    /// Annual salary
    #[arg(long, value_parser = form_number)]
    pub salary: Option<Decimal>,

    /// Employee contribution in percent of salary (e.g. 10 or 10%)
    #[arg(long, value_parser = form_rate)]
    pub contribution_rate: Option<Decimal>,

    /// Employer match in percent of matchable contributions
    #[arg(long, value_parser = form_rate, default_value = "50")]
    pub match_rate: Decimal,

    /// Percent of salary eligible for the match
    #[arg(long, value_parser = form_rate, default_value = "6")]
    pub match_cap: Decimal,

    /// Expected annual return in percent
    #[arg(long = "return", value_parser = form_rate, default_value = "7")]
    pub annual_return: Decimal,

    /// Marginal income tax rate in percent
    #[arg(long, value_parser = form_rate, default_value = "22")]
    pub tax_rate: Decimal,

    /// Annual salary growth in percent
    #[arg(long, value_parser = form_rate, default_value = "0")]
    pub salary_growth: Decimal,

    /// Annual cap on employee deferrals
    #[arg(long, value_parser = form_number)]
    pub contribution_limit: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_401k(args: Retirement401kArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input: RetirementAccountInput = if let Some(ref path) = args.input {
        debug!("reading 401k input from {path}");
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_piped()? {
        piped
    } else {
        RetirementAccountInput {
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args
                .retirement_age
                .ok_or("--retirement-age is required (or provide --input)")?,
            current_balance: args.balance,
            salary: args.salary.ok_or("--salary is required (or provide --input)")?,
            contribution_rate: args
                .contribution_rate
                .ok_or("--contribution-rate is required (or provide --input)")?,
            employer_match_rate: args.match_rate,
            match_cap_rate: args.match_cap,
            annual_return: args.annual_return,
            marginal_tax_rate: args.tax_rate,
            salary_growth_rate: args.salary_growth,
            annual_contribution_limit: args.contribution_limit,
        }
    };

    ret_input.validate()?;
    let result = plan_401k::compute_401k(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}
