//! Parsing of raw form-field text into numbers.
//!
//! Calculator forms hand over whatever the user typed. Instead of quietly
//! coercing bad input to zero, parsing yields a [`ParsedNumber`] that callers
//! must inspect, or an explicit default via [`parse_or_default`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FinanceError;
use crate::FinanceResult;

/// Outcome of parsing a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParsedNumber {
    Valid { value: Decimal },
    Invalid { raw: String, reason: String },
}

impl ParsedNumber {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            ParsedNumber::Valid { value } => Some(*value),
            ParsedNumber::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedNumber::Valid { .. })
    }

    /// Convert into a `FinanceResult`, naming the offending field on failure.
    pub fn require(self, field: &str) -> FinanceResult<Decimal> {
        match self {
            ParsedNumber::Valid { value } => Ok(value),
            ParsedNumber::Invalid { raw, reason } => Err(FinanceError::InvalidInput {
                field: field.to_string(),
                reason: format!("'{raw}' is not a number ({reason})"),
            }),
        }
    }
}

fn invalid(raw: &str, reason: &str) -> ParsedNumber {
    ParsedNumber::Invalid {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a form value such as `"$1,234.50"`, `" 42 "` or `"7.5%"`.
///
/// A leading `$` and `,`/`_` digit separators are ignored. A trailing `%`
/// divides the value by 100, so `"7.5%"` parses to `0.075`.
pub fn parse_input(raw: &str) -> ParsedNumber {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return invalid(raw, "empty");
    }

    let (body, is_percent) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };

    let (negative, unsigned) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
    let (negative, unsigned) = match unsigned.strip_prefix('-') {
        Some(rest) if !negative => (true, rest),
        Some(_) => return invalid(raw, "double sign"),
        None => (negative, unsigned),
    };

    let digits: String = unsigned.chars().filter(|c| *c != ',' && *c != '_').collect();
    if digits.is_empty() {
        return invalid(raw, "no digits");
    }
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return invalid(raw, "unexpected character");
    }

    match Decimal::from_str(&digits) {
        Ok(mut value) => {
            if negative {
                value = -value;
            }
            if is_percent {
                value /= dec!(100);
            }
            ParsedNumber::Valid { value }
        }
        Err(e) => invalid(raw, &e.to_string()),
    }
}

/// Parse a field, substituting `default` for anything unparsable.
pub fn parse_or_default(raw: &str, default: Decimal) -> Decimal {
    parse_input(raw).value().unwrap_or(default)
}

/// Parse a field that holds a percentage, with or without the `%` sign:
/// `"7.5"` and `"7.5%"` both yield `0.075`.
pub fn parse_rate_percent(raw: &str) -> ParsedNumber {
    if raw.trim_end().ends_with('%') {
        return parse_input(raw);
    }
    match parse_input(raw) {
        ParsedNumber::Valid { value } => ParsedNumber::Valid {
            value: value / dec!(100),
        },
        other => other,
    }
}
