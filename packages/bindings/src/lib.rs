use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use finance_calc_core::forms;
use finance_calc_core::presentation;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn compound_growth(input_json: String) -> NapiResult<String> {
    let input: finance_calc_core::savings::compound_interest::CompoundInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_calc_core::savings::compound_interest::compute_compound_growth(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_schedule(input_json: String) -> NapiResult<String> {
    let input: finance_calc_core::lending::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_calc_core::lending::amortization::generate_amortization_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn mortgage_payment(input_json: String) -> NapiResult<String> {
    let input: finance_calc_core::lending::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_calc_core::lending::mortgage::compute_mortgage_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn retirement_401k(input_json: String) -> NapiResult<String> {
    let input: finance_calc_core::retirement::plan_401k::RetirementAccountInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_calc_core::retirement::plan_401k::compute_401k(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form and display helpers
// ---------------------------------------------------------------------------

/// Parse a raw form field. Returns `{"status":"valid","value":"..."}` or
/// `{"status":"invalid","raw":"...","reason":"..."}`.
#[napi]
pub fn parse_number(raw: String) -> NapiResult<String> {
    serde_json::to_string(&forms::parse_input(&raw)).map_err(to_napi_error)
}

/// Parse a rate field where `"7.5"` means 7.5%. Same JSON shape as
/// `parse_number`.
#[napi]
pub fn parse_rate(raw: String) -> NapiResult<String> {
    serde_json::to_string(&forms::parse_rate_percent(&raw)).map_err(to_napi_error)
}

/// Parse a form field, falling back to `fallback` when it is unparsable.
#[napi]
pub fn parse_number_or_default(raw: String, fallback: String) -> NapiResult<String> {
    let fallback = Decimal::from_str(&fallback).map_err(to_napi_error)?;
    Ok(forms::parse_or_default(&raw, fallback).to_string())
}

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let value = Decimal::from_str(&amount).map_err(to_napi_error)?;
    Ok(presentation::format_currency(value))
}
