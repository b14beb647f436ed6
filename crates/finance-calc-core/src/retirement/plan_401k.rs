use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::{compound_factor, MAX_HORIZON_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a 401(k)-style projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementAccountInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_balance: Money,
    pub salary: Money,
    /// Employee deferral as a fraction of salary.
    pub contribution_rate: Rate,
    /// Fraction of the matchable contribution the employer adds (0.5 = 50%).
    pub employer_match_rate: Rate,
    /// Matchable contributions are capped at this fraction of salary.
    pub match_cap_rate: Rate,
    pub annual_return: Rate,
    pub marginal_tax_rate: Rate,
    #[serde(default)]
    pub salary_growth_rate: Rate,
    /// Statutory cap on employee deferrals, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_contribution_limit: Option<Money>,
}

/// A single year in the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementAccountYear {
    pub year: u32,
    /// Age at the end of the year.
    pub age: u32,
    pub contribution: Money,
    pub employer_match: Money,
    pub balance: Money,
}

/// Output of `compute_401k`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementAccountResult {
    pub future_value: Money,
    /// Employee contributions only.
    pub total_contributions: Money,
    /// Cumulative employer match.
    pub employer_match: Money,
    pub total_interest: Money,
    pub tax_savings: Money,
    pub years_to_retirement: u32,
    pub yearly_breakdown: Vec<RetirementAccountYear>,
}

impl RetirementAccountInput {
    /// Employee contribution for a given salary, after any statutory limit.
    pub fn annual_contribution(&self, salary: Money) -> Money {
        let uncapped = salary * self.contribution_rate;
        match self.annual_contribution_limit {
            Some(limit) if uncapped > limit => limit,
            _ => uncapped,
        }
    }

    /// Employer match on a year's contribution: the matchable base is capped
    /// at `match_cap_rate` of salary before the match rate applies.
    pub fn employer_match(&self, contribution: Money, salary: Money) -> FinanceResult<Money> {
        let matchable = contribution.min(salary * self.match_cap_rate);
        matchable
            .checked_mul(self.employer_match_rate)
            .ok_or_else(|| FinanceError::overflow("employer match"))
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.retirement_age <= self.current_age {
            return Err(FinanceError::invalid(
                "retirement_age",
                "retirement_age must be greater than current_age",
            ));
        }
        if self.retirement_age - self.current_age > MAX_HORIZON_YEARS {
            return Err(FinanceError::invalid(
                "retirement_age",
                format!("projection cannot exceed {MAX_HORIZON_YEARS} years"),
            ));
        }
        if self.current_balance < Decimal::ZERO {
            return Err(FinanceError::invalid(
                "current_balance",
                "current_balance must be >= 0",
            ));
        }
        if self.salary < Decimal::ZERO {
            return Err(FinanceError::invalid("salary", "salary must be >= 0"));
        }
        for (field, value) in [
            ("contribution_rate", self.contribution_rate),
            ("employer_match_rate", self.employer_match_rate),
            ("match_cap_rate", self.match_cap_rate),
            ("marginal_tax_rate", self.marginal_tax_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(FinanceError::invalid(field, format!("{field} must be >= 0")));
            }
        }
        if self.contribution_rate > Decimal::ONE {
            return Err(FinanceError::invalid(
                "contribution_rate",
                "contribution_rate cannot exceed 100% of salary",
            ));
        }
        if self.match_cap_rate > Decimal::ONE {
            return Err(FinanceError::invalid(
                "match_cap_rate",
                "match_cap_rate cannot exceed 100% of salary",
            ));
        }
        if self.marginal_tax_rate > Decimal::ONE {
            return Err(FinanceError::invalid(
                "marginal_tax_rate",
                "marginal_tax_rate cannot exceed 100%",
            ));
        }
        if self.annual_return <= dec!(-1) {
            return Err(FinanceError::invalid(
                "annual_return",
                "annual_return must be greater than -100%",
            ));
        }
        if let Some(limit) = self.annual_contribution_limit {
            if limit < Decimal::ZERO {
                return Err(FinanceError::invalid(
                    "annual_contribution_limit",
                    "annual_contribution_limit must be >= 0",
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a 401(k) balance from `current_age` to `retirement_age`.
///
/// Each year's employee contribution and employer match are deposited at the
/// start of the year; the annual return then applies to the prior balance
/// plus those deposits.
pub fn compute_401k(
    input: &RetirementAccountInput,
) -> FinanceResult<ComputationOutput<RetirementAccountResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let years_to_retirement = input.retirement_age - input.current_age;
    let mut balance = input.current_balance;
    let mut total_contributions = Decimal::ZERO;
    let mut total_match = Decimal::ZERO;
    let mut capped_years = 0u32;
    let mut yearly_breakdown: Vec<RetirementAccountYear> =
        Vec::with_capacity(years_to_retirement as usize);

    for yr in 0..years_to_retirement {
        let age = input.current_age + yr + 1;
        let overflow = || FinanceError::overflow(format!("401k balance at age {age}"));
        let salary = compound_factor(input.salary_growth_rate, yr)?
            .checked_mul(input.salary)
            .ok_or_else(overflow)?;
        let contribution = input.annual_contribution(salary);
        if contribution < salary * input.contribution_rate {
            capped_years += 1;
        }
        let employer = input.employer_match(contribution, salary)?;

        let invested = balance
            .checked_add(contribution)
            .and_then(|v| v.checked_add(employer))
            .ok_or_else(overflow)?;
        balance = invested
            .checked_mul(input.annual_return)
            .and_then(|growth| invested.checked_add(growth))
            .ok_or_else(overflow)?;

        total_contributions = total_contributions
            .checked_add(contribution)
            .ok_or_else(overflow)?;
        total_match = total_match.checked_add(employer).ok_or_else(overflow)?;

        yearly_breakdown.push(RetirementAccountYear {
            year: yr + 1,
            age,
            contribution,
            employer_match: employer,
            balance,
        });
    }

    if capped_years > 0 {
        warn!("401k deferral capped at the annual limit in {capped_years} year(s)");
        warnings.push(format!(
            "Employee contribution capped at the annual limit in {capped_years} of {years_to_retirement} years"
        ));
    }
    if input.contribution_rate < input.match_cap_rate && !input.employer_match_rate.is_zero() {
        warnings.push(format!(
            "Contribution rate {} is below the match cap {}; part of the employer match is left unclaimed",
            input.contribution_rate, input.match_cap_rate
        ));
    }

    let future_value = balance;
    let total_interest = future_value
        .checked_sub(input.current_balance)
        .and_then(|v| v.checked_sub(total_contributions))
        .and_then(|v| v.checked_sub(total_match))
        .ok_or_else(|| FinanceError::overflow("401k interest decomposition"))?;
    let tax_savings = total_contributions * input.marginal_tax_rate;

    debug!(
        "401k: {} years, contributions {}, match {} -> {}",
        years_to_retirement, total_contributions, total_match, future_value
    );

    let output = RetirementAccountResult {
        future_value,
        total_contributions,
        employer_match: total_match,
        total_interest,
        tax_savings,
        years_to_retirement,
        yearly_breakdown,
    };

    Ok(with_metadata(
        "Annual 401(k) projection with capped employer match (start-of-year deposits)",
        input,
        warnings,
        start,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
