pub mod lending;
pub mod retirement;
pub mod savings;

use finance_calc_core::forms::{parse_input, parse_rate_percent};
use rust_decimal::Decimal;

/// clap value parser for form-style numbers: `25000`, `$25,000`, `7.5%`.
pub fn form_number(raw: &str) -> Result<Decimal, String> {
    parse_input(raw).require("value").map_err(|e| e.to_string())
}

/// clap value parser for rate flags, read the way the site's forms read
/// them: `7.5` and `7.5%` both mean 7.5%.
pub fn form_rate(raw: &str) -> Result<Decimal, String> {
    parse_rate_percent(raw)
        .require("rate")
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_form_number_accepts_site_formats() {
        assert_eq!(form_number("$25,000").unwrap(), dec!(25000));
        assert_eq!(form_number("7.5%").unwrap(), dec!(0.075));
        assert_eq!(form_number("0.075").unwrap(), dec!(0.075));
    }

    #[test]
    fn test_form_rate_reads_percent_with_or_without_sign() {
        assert_eq!(form_rate("7.5").unwrap(), dec!(0.075));
        assert_eq!(form_rate("7.5%").unwrap(), dec!(0.075));
        assert_eq!(form_rate("0").unwrap(), Decimal::ZERO);
        assert!(form_rate("seven").unwrap_err().contains("rate"));
    }

    #[test]
    fn test_form_number_rejects_text() {
        let err = form_number("lots").unwrap_err();
        assert!(err.contains("lots"));
    }
}
