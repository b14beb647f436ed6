use finance_calc_core::retirement::plan_401k::{compute_401k, RetirementAccountInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn typical_saver() -> RetirementAccountInput {
    RetirementAccountInput {
        current_age: 25,
        retirement_age: 65,
        current_balance: Decimal::ZERO,
        salary: dec!(60_000),
        contribution_rate: dec!(0.06),
        employer_match_rate: dec!(1.0),
        match_cap_rate: dec!(0.04),
        annual_return: dec!(0.06),
        marginal_tax_rate: dec!(0.24),
        salary_growth_rate: Decimal::ZERO,
        annual_contribution_limit: None,
    }
}

#[test]
fn test_forty_year_projection_matches_annuity_due() {
    // Level deposits of 3,600 + 2,400 = 6,000 at the start of each year:
    // FV = 6000 * ((1.06^40 - 1) / 0.06) * 1.06 ~= 984,286
    let r = compute_401k(&typical_saver()).unwrap().result;
    assert_eq!(r.years_to_retirement, 40);
    assert_eq!(r.yearly_breakdown.len(), 40);
    assert!((r.future_value - dec!(984_286)).abs() < dec!(1));
    assert_eq!(r.total_contributions, dec!(144_000));
    assert_eq!(r.employer_match, dec!(96_000));
}

#[test]
fn test_match_ceiling_with_oversized_contribution() {
    let mut input = typical_saver();
    input.contribution_rate = dec!(0.50);
    let r = compute_401k(&input).unwrap().result;
    let ceiling = input.employer_match_rate * input.match_cap_rate * input.salary;
    for y in &r.yearly_breakdown {
        assert!(y.employer_match <= ceiling);
    }
    assert_eq!(r.employer_match, ceiling * Decimal::from(40));
}

#[test]
fn test_tax_savings_uses_employee_contributions_only() {
    let r = compute_401k(&typical_saver()).unwrap().result;
    assert_eq!(r.tax_savings, dec!(144_000) * dec!(0.24));
}

#[test]
fn test_breakdown_ages_are_year_end() {
    let r = compute_401k(&typical_saver()).unwrap().result;
    assert_eq!(r.yearly_breakdown.first().unwrap().age, 26);
    assert_eq!(r.yearly_breakdown.last().unwrap().age, 65);
    assert_eq!(r.yearly_breakdown.last().unwrap().balance, r.future_value);
}

#[test]
fn test_zero_return_is_sum_of_deposits() {
    let mut input = typical_saver();
    input.annual_return = Decimal::ZERO;
    input.current_balance = dec!(5_000);
    let r = compute_401k(&input).unwrap().result;
    assert_eq!(r.future_value, dec!(5_000) + dec!(144_000) + dec!(96_000));
    assert_eq!(r.total_interest, Decimal::ZERO);
}
