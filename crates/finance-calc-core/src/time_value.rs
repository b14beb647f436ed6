use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceError;
use crate::types::{Money, Rate};
use crate::FinanceResult;

/// Longest horizon, in years, any calculator will project or amortize over.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
///
/// Fails with [`FinanceError::Overflow`] once the factor leaves the decimal
/// range instead of panicking.
pub fn compound_factor(rate: Rate, n: u32) -> FinanceResult<Decimal> {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinanceError::overflow(format!("compound factor (1 + {rate})^{n}")))?;
    }
    Ok(result)
}

/// Level payment for a fully amortising loan.
///
/// `payment = P * r(1+r)^n / ((1+r)^n - 1)`, with the r = 0 limit `P / n`
/// taken as an explicit branch.
pub fn level_payment(principal: Money, periodic_rate: Rate, periods: u32) -> FinanceResult<Money> {
    if periods == 0 {
        return Err(FinanceError::InvalidInput {
            field: "periods".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }
    if periodic_rate <= dec!(-1) {
        return Err(FinanceError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(periodic_rate, periods)?;
    let numerator = principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| FinanceError::overflow("level payment numerator"))?;
    numerator
        .checked_div(factor - Decimal::ONE)
        .ok_or_else(|| FinanceError::DivisionByZero {
            context: "level payment annuity factor".into(),
        })
}

/// Effective annual rate for a nominal rate compounded `n` times a year.
pub fn effective_annual_rate(nominal: Rate, periods_per_year: u32) -> FinanceResult<Rate> {
    if periods_per_year == 0 {
        return Err(FinanceError::InvalidInput {
            field: "periods_per_year".into(),
            reason: "Compounding frequency must be > 0".into(),
        });
    }
    let periodic = nominal / Decimal::from(periods_per_year);
    Ok(compound_factor(periodic, periods_per_year)? - Decimal::ONE)
}
