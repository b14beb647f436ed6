//! Display formatting. Engines keep full precision; rounding to cents
//! happens here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format as US dollars: `$1,234.57`, `-$12.00`.
pub fn format_currency(value: Money) -> String {
    let rounded = round_cents(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Format a decimal rate as a percentage: `0.075` with 2 dp is `7.50%`.
pub fn format_percent(rate: Rate, decimal_places: u32) -> String {
    let pct = (rate * dec!(100))
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}%", decimal_places as usize, pct)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_cents(dec!(500.948714)), dec!(500.95));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.567)), "$1,234.57");
        assert_eq!(format_currency(dec!(20096.6137)), "$20,096.61");
        assert_eq!(format_currency(dec!(-12)), "-$12.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.8)), "$1,234,567.80");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.075), 2), "7.50%");
        assert_eq!(format_percent(dec!(0.0722900809), 3), "7.229%");
        assert_eq!(format_percent(dec!(0.2), 0), "20%");
    }
}
