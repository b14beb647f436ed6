use chrono::{Months, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::time_value::{level_payment, MAX_HORIZON_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, level-payment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    /// Prepayment applied to principal on top of every scheduled payment.
    #[serde(default)]
    pub extra_monthly_payment: Money,
    /// Date of the first payment. Later payments fall on the same day of
    /// each following month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: Rate, term_years: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate,
            term_years,
            extra_monthly_payment: Decimal::ZERO,
            start_date: None,
        }
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate / dec!(12)
    }

    pub fn total_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(FinanceError::invalid("principal", "principal must be > 0"));
        }
        if self.term_years == 0 {
            return Err(FinanceError::invalid("term_years", "term_years must be > 0"));
        }
        if self.term_years > MAX_HORIZON_YEARS {
            return Err(FinanceError::invalid(
                "term_years",
                format!("term_years cannot exceed {MAX_HORIZON_YEARS}"),
            ));
        }
        if self.annual_rate <= dec!(-1) {
            return Err(FinanceError::invalid(
                "annual_rate",
                "annual_rate must be greater than -100%",
            ));
        }
        if self.extra_monthly_payment < Decimal::ZERO {
            return Err(FinanceError::invalid(
                "extra_monthly_payment",
                "extra_monthly_payment must be >= 0",
            ));
        }
        Ok(())
    }
}

/// One row of the amortization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// Per-loan-year roll-up of the schedule, used for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanYearSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Scheduled level payment, excluding any prepayment.
    pub monthly_payment: Money,
    pub total_payments: u32,
    pub entries: Vec<AmortizationEntry>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub payoff_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    /// Interest avoided relative to paying only the level payment.
    pub interest_saved: Money,
    pub yearly_summary: Vec<LoanYearSummary>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn payment_date(start: Option<NaiveDate>, month: u32) -> FinanceResult<Option<NaiveDate>> {
    match start {
        None => Ok(None),
        Some(d) => d
            .checked_add_months(Months::new(month - 1))
            .map(Some)
            .ok_or_else(|| {
                FinanceError::DateError(format!("payment date for month {month} out of range"))
            }),
    }
}

fn summarise_by_year(entries: &[AmortizationEntry]) -> Vec<LoanYearSummary> {
    let mut summary: Vec<LoanYearSummary> = Vec::new();
    for entry in entries {
        let year = (entry.month - 1) / 12 + 1;
        match summary.last_mut() {
            Some(row) if row.year == year => {
                row.principal_paid += entry.principal_portion;
                row.interest_paid += entry.interest_portion;
                row.ending_balance = entry.remaining_balance;
            }
            _ => summary.push(LoanYearSummary {
                year,
                principal_paid: entry.principal_portion,
                interest_paid: entry.interest_portion,
                ending_balance: entry.remaining_balance,
            }),
        }
    }
    summary
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Build the month-by-month amortization table for a level-payment loan.
///
/// The last entry retires whatever balance is left, so the final
/// `remaining_balance` is exactly zero and the principal portions sum to the
/// amount borrowed.
pub fn generate_amortization_schedule(
    terms: &LoanTerms,
) -> FinanceResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    terms.validate()?;

    let r = terms.monthly_rate();
    let n = terms.total_payments();
    let payment = level_payment(terms.principal, r, n)?;
    let extra = terms.extra_monthly_payment;

    if terms.annual_rate < Decimal::ZERO {
        warn!("amortizing at negative rate {}", terms.annual_rate);
        warnings.push("Negative interest rate: interest portions are credits".into());
    }

    let mut entries: Vec<AmortizationEntry> = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=n {
        if balance <= Decimal::ZERO {
            break;
        }
        let overflow = || FinanceError::overflow(format!("amortization month {month}"));

        let interest = balance.checked_mul(r).ok_or_else(overflow)?;
        let mut principal_portion = (payment - interest)
            .checked_add(extra)
            .ok_or_else(overflow)?;

        if month == n || principal_portion >= balance {
            if month == n && extra.is_zero() {
                debug!(
                    "final payment absorbs residual of {}",
                    balance - principal_portion
                );
            }
            principal_portion = balance;
        }

        balance -= principal_portion;
        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;

        entries.push(AmortizationEntry {
            month,
            payment_date: payment_date(terms.start_date, month)?,
            payment: principal_portion.checked_add(interest).ok_or_else(overflow)?,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance,
        });
    }

    let payoff_months = entries.len() as u32;
    let payoff_date = entries.last().and_then(|e| e.payment_date);
    let total_principal: Money = entries.iter().map(|e| e.principal_portion).sum();
    let total_paid = total_principal
        .checked_add(total_interest)
        .ok_or_else(|| FinanceError::overflow("amortization total paid"))?;

    let interest_saved = if extra.is_zero() {
        Decimal::ZERO
    } else {
        let baseline_interest = payment
            .checked_mul(Decimal::from(n))
            .ok_or_else(|| FinanceError::overflow("baseline interest"))?
            - terms.principal;
        warnings.push(format!(
            "Extra payments of {extra}/month retire the loan in {payoff_months} months instead of {n}"
        ));
        baseline_interest - total_interest
    };

    debug!(
        "amortization: principal {} over {} months at {} -> payment {}",
        terms.principal, n, terms.annual_rate, payment
    );

    let yearly_summary = summarise_by_year(&entries);

    let output = AmortizationSchedule {
        monthly_payment: payment,
        total_payments: n,
        entries,
        total_paid,
        total_interest,
        total_principal,
        payoff_months,
        payoff_date,
        interest_saved,
        yearly_summary,
    };

    Ok(with_metadata(
        "Level-payment amortization (monthly compounding)",
        terms,
        warnings,
        start,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn car_loan() -> LoanTerms {
        LoanTerms::new(dec!(25_000), dec!(0.075), 5)
    }

    #[test]
    fn test_terms_derived_values() {
        let terms = car_loan();
        assert_eq!(terms.monthly_rate(), dec!(0.00625));
        assert_eq!(terms.total_payments(), 60);
    }

    #[test]
    fn test_car_loan_worked_example() {
        let result = generate_amortization_schedule(&car_loan()).unwrap();
        let sched = &result.result;

        assert_eq!(sched.entries.len(), 60);
        assert_eq!(sched.monthly_payment.round_dp(2), dec!(500.95));
        assert!((sched.monthly_payment - dec!(500.76)).abs() < dec!(0.25));
        assert_eq!(sched.entries.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_principal_portions_sum_to_principal() {
        for (p, rate, years) in [
            (dec!(25_000), dec!(0.075), 5u32),
            (dec!(350_000), dec!(0.0625), 30),
            (dec!(1_234.56), dec!(0.199), 2),
        ] {
            let sched = generate_amortization_schedule(&LoanTerms::new(p, rate, years))
                .unwrap()
                .result;
            let sum: Decimal = sched.entries.iter().map(|e| e.principal_portion).sum();
            assert!((sum - p).abs() < dec!(0.000001), "sum {sum} vs {p}");
        }
    }

    #[test]
    fn test_each_entry_splits_payment() {
        let sched = generate_amortization_schedule(&car_loan()).unwrap().result;
        for e in &sched.entries {
            assert_eq!(e.principal_portion + e.interest_portion, e.payment);
        }
        // Every payment but the last is the level payment
        for e in &sched.entries[..59] {
            assert!((e.payment - sched.monthly_payment).abs() < dec!(0.0000000001));
        }
        let last = sched.entries.last().unwrap();
        assert!((last.payment - sched.monthly_payment).abs() < dec!(0.01));
    }

    #[test]
    fn test_balance_decreases_monotonically() {
        let sched = generate_amortization_schedule(&car_loan()).unwrap().result;
        let mut prev = dec!(25_000);
        for e in &sched.entries {
            assert!(e.remaining_balance < prev);
            prev = e.remaining_balance;
        }
    }

    #[test]
    fn test_zero_rate_loan() {
        let terms = LoanTerms::new(dec!(12_000), Decimal::ZERO, 3);
        let sched = generate_amortization_schedule(&terms).unwrap().result;

        assert_eq!(sched.monthly_payment, dec!(12_000) / dec!(36));
        assert_eq!(sched.entries.len(), 36);
        assert!(sched.entries.iter().all(|e| e.interest_portion.is_zero()));
        assert_eq!(sched.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_extra_payment_shortens_loan() {
        let mut terms = LoanTerms::new(dec!(200_000), dec!(0.06), 30);
        terms.extra_monthly_payment = dec!(200);
        let result = generate_amortization_schedule(&terms).unwrap();
        let sched = &result.result;

        assert!(sched.payoff_months < 360);
        assert!(sched.interest_saved > Decimal::ZERO);
        assert_eq!(sched.entries.last().unwrap().remaining_balance, Decimal::ZERO);
        assert!(result.has_warnings());
    }

    #[test]
    fn test_payment_dates_follow_calendar_months() {
        let mut terms = LoanTerms::new(dec!(10_000), dec!(0.05), 1);
        terms.start_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        let sched = generate_amortization_schedule(&terms).unwrap().result;

        assert_eq!(sched.entries[0].payment_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        // chrono clamps to the last day of shorter months
        assert_eq!(sched.entries[1].payment_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(sched.payoff_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_yearly_summary_rolls_up_entries() {
        let sched = generate_amortization_schedule(&car_loan()).unwrap().result;
        assert_eq!(sched.yearly_summary.len(), 5);
        let principal: Decimal = sched.yearly_summary.iter().map(|y| y.principal_paid).sum();
        assert!((principal - dec!(25_000)).abs() < dec!(0.000001));
        assert_eq!(sched.yearly_summary[4].ending_balance, Decimal::ZERO);
        assert_eq!(sched.yearly_summary[0].ending_balance, sched.entries[11].remaining_balance);
    }

    #[test]
    fn test_invalid_principal_rejected() {
        let terms = LoanTerms::new(Decimal::ZERO, dec!(0.05), 5);
        assert!(generate_amortization_schedule(&terms).is_err());
    }

    #[test]
    fn test_invalid_term_rejected() {
        let terms = LoanTerms::new(dec!(1_000), dec!(0.05), 0);
        let err = generate_amortization_schedule(&terms).unwrap_err();
        assert!(err.to_string().contains("term_years"));
    }

    #[test]
    fn test_term_beyond_limit_rejected() {
        for years in [101, 100_000_000, u32::MAX] {
            let terms = LoanTerms::new(dec!(1_000), dec!(0.05), years);
            let err = generate_amortization_schedule(&terms).unwrap_err();
            assert!(err.to_string().contains("term_years"), "{years}: {err}");
        }
        assert_eq!(LoanTerms::new(dec!(1_000), dec!(0.05), u32::MAX).total_payments(), u32::MAX);
    }

    #[test]
    fn test_century_loan_at_high_rate_still_amortizes() {
        let terms = LoanTerms::new(dec!(100_000), dec!(0.30), 100);
        let sched = generate_amortization_schedule(&terms).unwrap().result;
        assert_eq!(sched.entries.len(), 1_200);
        assert!((sched.monthly_payment - dec!(2_500)).abs() < dec!(0.01));
        assert_eq!(sched.entries.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_runaway_rate_is_an_error() {
        // 1000% a month: the annuity factor leaves the decimal range
        let terms = LoanTerms::new(dec!(100_000), dec!(120), 40);
        let err = generate_amortization_schedule(&terms).unwrap_err();
        assert!(matches!(err, FinanceError::Overflow { .. }), "got {err}");
    }
}
