use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{generate_amortization_schedule, AmortizationSchedule, LoanTerms};
use crate::error::FinanceError;
use crate::time_value::MAX_HORIZON_YEARS;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinanceResult;

/// Down payment share at or above which PMI is waived.
pub const PMI_WAIVER_THRESHOLD: Rate = dec!(0.20);

/// Input parameters for the mortgage calculator. Tax and insurance are
/// annual figures; they are spread evenly across the twelve payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: Money,
    pub down_payment: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_home_insurance: Money,
    /// PMI premium as a fraction of the loan amount per year.
    #[serde(default)]
    pub annual_pmi_rate: Rate,
}

/// Monthly cost breakdown for a mortgage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgagePayment {
    pub loan_amount: Money,
    pub down_payment_pct: Rate,
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub pmi: Money,
    pub total_monthly_payment: Money,
    pub pmi_required: bool,
    pub total_interest: Money,
    /// Down payment plus all principal and interest paid over the term.
    pub total_cost: Money,
    pub schedule: AmortizationSchedule,
}

impl MortgageInput {
    pub fn loan_amount(&self) -> Money {
        self.home_price - self.down_payment
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.home_price <= Decimal::ZERO {
            return Err(FinanceError::invalid("home_price", "home_price must be > 0"));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(FinanceError::invalid("down_payment", "down_payment must be >= 0"));
        }
        if self.down_payment >= self.home_price {
            return Err(FinanceError::invalid(
                "down_payment",
                "down_payment must be less than home_price",
            ));
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
        for (field, value) in [
            ("annual_property_tax", self.annual_property_tax),
            ("annual_home_insurance", self.annual_home_insurance),
            ("annual_pmi_rate", self.annual_pmi_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(FinanceError::invalid(field, format!("{field} must be >= 0")));
            }
        }
        Ok(())
    }
}

/// Monthly mortgage payment: level P&I on the financed amount plus
/// property tax, homeowner's insurance and, below 20% down, PMI.
pub fn compute_mortgage_payment(
    input: &MortgageInput,
) -> FinanceResult<ComputationOutput<MortgagePayment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let months = dec!(12);
    let loan_amount = input.loan_amount();
    let down_payment_pct = input.down_payment / input.home_price;

    let amortization = generate_amortization_schedule(&LoanTerms::new(
        loan_amount,
        input.annual_rate,
        input.term_years,
    ))?;
    warnings.extend(amortization.warnings);
    let schedule = amortization.result;

    let pmi_required = down_payment_pct < PMI_WAIVER_THRESHOLD;
    let pmi = if pmi_required {
        input
            .annual_pmi_rate
            .checked_mul(loan_amount)
            .ok_or_else(|| FinanceError::overflow("PMI premium"))?
            / months
    } else {
        Decimal::ZERO
    };

    if pmi_required {
        if input.annual_pmi_rate.is_zero() {
            warnings.push("Down payment is below 20% but no PMI rate was supplied".into());
        } else {
            warnings.push(format!(
                "Down payment of {}% is below 20%; PMI of {} per month applies",
                (down_payment_pct * dec!(100)).round_dp(2),
                pmi.round_dp(2)
            ));
        }
    }

    let principal_and_interest = schedule.monthly_payment;
    let property_tax = input.annual_property_tax / months;
    let insurance = input.annual_home_insurance / months;
    let total_monthly_payment = [property_tax, insurance, pmi]
        .into_iter()
        .try_fold(principal_and_interest, |acc, v| acc.checked_add(v))
        .ok_or_else(|| FinanceError::overflow("total monthly payment"))?;

    debug!(
        "mortgage: loan {} ({}% down) -> total monthly {}",
        loan_amount,
        down_payment_pct * dec!(100),
        total_monthly_payment
    );

    let output = MortgagePayment {
        loan_amount,
        down_payment_pct,
        principal_and_interest,
        property_tax,
        insurance,
        pmi,
        total_monthly_payment,
        pmi_required,
        total_interest: schedule.total_interest,
        total_cost: schedule.total_paid + input.down_payment,
        schedule,
    };

    Ok(with_metadata(
        "Level-payment mortgage with escrowed tax, insurance and PMI",
        input,
        warnings,
        start,
        output,
    ))
}
