use chrono::NaiveDate;
use finance_calc_core::lending::{amortization, mortgage};
use finance_calc_core::presentation::format_currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loan amortization
// ===========================================================================

#[test]
fn test_car_loan_25k_7_5_pct_5y() {
    // Site worked example: $25,000 at 7.5% over 5 years, quoted as ~$500.76.
    // The level-payment formula gives 500.9487...
    let terms = amortization::LoanTerms::new(dec!(25_000), dec!(0.075), 5);
    let result = amortization::generate_amortization_schedule(&terms).unwrap();
    let sched = &result.result;

    assert_eq!(sched.entries.len(), 60);
    assert!(
        (sched.monthly_payment - dec!(500.76)).abs() < dec!(0.25),
        "payment {} too far from the quoted figure",
        sched.monthly_payment
    );
    assert_eq!(format_currency(sched.monthly_payment), "$500.95");
    assert!(sched.entries.last().unwrap().remaining_balance.abs() < dec!(0.01));
    assert!((sched.total_principal - dec!(25_000)).abs() < dec!(0.000001));
}

#[test]
fn test_thirty_year_mortgage_reference_totals() {
    // 200k at 6% for 30 years: payment 1,199.10, total interest ~231,676
    let terms = amortization::LoanTerms::new(dec!(200_000), dec!(0.06), 30);
    let sched = amortization::generate_amortization_schedule(&terms)
        .unwrap()
        .into_result();

    assert_eq!(sched.entries.len(), 360);
    assert!((sched.total_interest - dec!(231_676)).abs() < dec!(2));
    assert!((sched.total_paid - sched.total_principal - sched.total_interest).abs() < dec!(0.000001));
    // Early payments are mostly interest, late payments mostly principal
    assert!(sched.entries[0].interest_portion > sched.entries[0].principal_portion);
    assert!(sched.entries[359].principal_portion > sched.entries[359].interest_portion);
}

#[test]
fn test_zero_interest_loan_splits_evenly() {
    let terms = amortization::LoanTerms::new(dec!(6_000), Decimal::ZERO, 2);
    let sched = amortization::generate_amortization_schedule(&terms)
        .unwrap()
        .into_result();

    assert_eq!(sched.monthly_payment, dec!(250));
    assert!(sched.entries.iter().all(|e| e.interest_portion == Decimal::ZERO));
    assert!(sched.entries.iter().all(|e| e.payment == dec!(250)));
}

#[test]
fn test_prepayment_with_dates() {
    let terms = amortization::LoanTerms {
        principal: dec!(30_000),
        annual_rate: dec!(0.05),
        term_years: 5,
        extra_monthly_payment: dec!(500),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
    };
    let sched = amortization::generate_amortization_schedule(&terms)
        .unwrap()
        .into_result();

    assert!(sched.payoff_months < 60);
    assert!(sched.interest_saved > Decimal::ZERO);
    let last = sched.entries.last().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);
    assert!(last.payment <= sched.monthly_payment + dec!(500));
    assert_eq!(sched.payoff_date, last.payment_date);
}

#[test]
fn test_schedule_serialises_to_json() {
    let terms = amortization::LoanTerms::new(dec!(1_000), dec!(0.12), 1);
    let result = amortization::generate_amortization_schedule(&terms).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result"]["entries"].as_array().unwrap().len(), 12);
    assert!(json["result"]["entries"][0].get("payment_date").is_none());
    assert_eq!(json["assumptions"]["term_years"], 1);
}

// ===========================================================================
// Mortgage
// ===========================================================================

#[test]
fn test_mortgage_twenty_percent_down_no_pmi() {
    let input = mortgage::MortgageInput {
        home_price: dec!(300_000),
        down_payment: dec!(60_000),
        annual_rate: dec!(0.07),
        term_years: 30,
        annual_property_tax: dec!(4_800),
        annual_home_insurance: dec!(1_500),
        annual_pmi_rate: dec!(0.01),
    };
    let m = mortgage::compute_mortgage_payment(&input).unwrap().result;
    assert_eq!(m.pmi, Decimal::ZERO);
    assert!(!m.pmi_required);
    assert_eq!(m.property_tax, dec!(400));
    assert_eq!(m.insurance, dec!(125));
}

#[test]
fn test_mortgage_pmi_positive_below_threshold() {
    let input = mortgage::MortgageInput {
        home_price: dec!(300_000),
        down_payment: dec!(59_999),
        annual_rate: dec!(0.07),
        term_years: 30,
        annual_property_tax: Decimal::ZERO,
        annual_home_insurance: Decimal::ZERO,
        annual_pmi_rate: dec!(0.005),
    };
    let m = mortgage::compute_mortgage_payment(&input).unwrap().result;
    assert!(m.pmi > Decimal::ZERO);
    assert_eq!(m.total_monthly_payment, m.principal_and_interest + m.pmi);
}

#[test]
fn test_mortgage_rejects_full_down_payment() {
    let input = mortgage::MortgageInput {
        home_price: dec!(300_000),
        down_payment: dec!(310_000),
        annual_rate: dec!(0.07),
        term_years: 30,
        annual_property_tax: Decimal::ZERO,
        annual_home_insurance: Decimal::ZERO,
        annual_pmi_rate: Decimal::ZERO,
    };
    assert!(mortgage::compute_mortgage_payment(&input).is_err());
}
