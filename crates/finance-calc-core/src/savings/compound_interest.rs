use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::{effective_annual_rate, MAX_HORIZON_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How often interest is credited to the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Weekly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Daily => 365,
        }
    }

    /// Map a periods-per-year count back onto a supported frequency.
    pub fn from_periods(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(CompoundingFrequency::Annually),
            2 => Some(CompoundingFrequency::SemiAnnually),
            4 => Some(CompoundingFrequency::Quarterly),
            12 => Some(CompoundingFrequency::Monthly),
            52 => Some(CompoundingFrequency::Weekly),
            365 => Some(CompoundingFrequency::Daily),
            _ => None,
        }
    }
}

/// Input parameters for the compound interest calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub principal: Money,
    pub annual_rate: Rate,
    pub years: u32,
    #[serde(default)]
    pub compounding_frequency: CompoundingFrequency,
    /// Deposited at the end of every month, independent of compounding.
    #[serde(default)]
    pub monthly_contribution: Money,
}

/// Balance snapshot at the end of a completed year. Contributions and
/// interest are cumulative from the start of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub balance: Money,
    pub contributions: Money,
    pub interest: Money,
}

/// Output of `compute_compound_growth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub future_value: Money,
    pub total_contributions: Money,
    pub total_interest: Money,
    pub effective_annual_rate: Rate,
    pub yearly_breakdown: Vec<YearlyBalance>,
}

impl CompoundInterestInput {
    pub fn validate(&self) -> FinanceResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(FinanceError::invalid("principal", "principal must be >= 0"));
        }
        if self.years == 0 {
            return Err(FinanceError::invalid("years", "years must be > 0"));
        }
        if self.years > MAX_HORIZON_YEARS {
            return Err(FinanceError::invalid(
                "years",
                format!("years cannot exceed {MAX_HORIZON_YEARS}"),
            ));
        }
        if self.monthly_contribution < Decimal::ZERO {
            return Err(FinanceError::invalid(
                "monthly_contribution",
                "monthly_contribution must be >= 0",
            ));
        }
        if self.annual_rate <= dec!(-1) {
            return Err(FinanceError::invalid(
                "annual_rate",
                "annual_rate must be greater than -100%",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a savings balance period by period.
///
/// Interest is credited `n` times a year at `annual_rate / n`. The monthly
/// contribution runs on its own calendar: a deposit made part way through a
/// compounding period earns simple interest for the remainder of that period,
/// credited at the next compounding date. A deposit that coincides with a
/// compounding date lands after the interest is credited.
pub fn compute_compound_growth(
    input: &CompoundInterestInput,
) -> FinanceResult<ComputationOutput<CompoundInterestResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    if input.annual_rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative annual rate ({}) shrinks the balance over time",
            input.annual_rate
        ));
    }

    let periods = input.compounding_frequency.periods_per_year();
    let periodic_rate = input.annual_rate / Decimal::from(periods);

    // Both schedules are laid on a common integer tick grid per year.
    let ticks_per_year = 12 * periods / gcd(12, periods);
    let ticks_per_period = ticks_per_year / periods;
    let ticks_per_month = ticks_per_year / 12;
    let year_ticks = Decimal::from(ticks_per_year);

    let contribution = input.monthly_contribution;
    let mut balance = input.principal;
    let mut total_contributions = Decimal::ZERO;
    let mut yearly_breakdown: Vec<YearlyBalance> = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        let overflow =
            || FinanceError::overflow(format!("compound growth balance in year {year}"));
        let mut next_month = 1u32;

        for k in 1..=periods {
            let period_end = k * ticks_per_period;
            let opening = balance;
            let mut deposits = Decimal::ZERO;
            let mut deposit_interest = Decimal::ZERO;

            while next_month <= 12 && next_month * ticks_per_month <= period_end {
                if !contribution.is_zero() {
                    let remaining = period_end - next_month * ticks_per_month;
                    deposit_interest = contribution
                        .checked_mul(input.annual_rate)
                        .and_then(|v| v.checked_mul(Decimal::from(remaining)))
                        .and_then(|v| deposit_interest.checked_add(v / year_ticks))
                        .ok_or_else(overflow)?;
                    deposits = deposits.checked_add(contribution).ok_or_else(overflow)?;
                }
                next_month += 1;
            }

            let interest = opening
                .checked_mul(periodic_rate)
                .and_then(|v| v.checked_add(deposit_interest))
                .ok_or_else(overflow)?;
            balance = opening
                .checked_add(interest)
                .and_then(|v| v.checked_add(deposits))
                .ok_or_else(overflow)?;
            total_contributions = total_contributions
                .checked_add(deposits)
                .ok_or_else(overflow)?;
        }

        let interest = balance
            .checked_sub(input.principal)
            .and_then(|v| v.checked_sub(total_contributions))
            .ok_or_else(overflow)?;
        yearly_breakdown.push(YearlyBalance {
            year,
            balance,
            contributions: total_contributions,
            interest,
        });
    }

    let future_value = balance;
    let total_interest = yearly_breakdown
        .last()
        .map(|row| row.interest)
        .unwrap_or_default();
    let ear = effective_annual_rate(input.annual_rate, periods)?;

    debug!(
        "compound growth: {} years at {} compounded {}x/yr -> {}",
        input.years, input.annual_rate, periods, future_value
    );

    let output = CompoundInterestResult {
        future_value,
        total_contributions,
        total_interest,
        effective_annual_rate: ear,
        yearly_breakdown,
    };

    Ok(with_metadata(
        "Period-by-period compound growth with end-of-month contributions",
        input,
        warnings,
        start,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
