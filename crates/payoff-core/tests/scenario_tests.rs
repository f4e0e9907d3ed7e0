#![cfg(feature = "scenarios")]

use chrono::NaiveDate;
use payoff_core::scenarios::extra_payment::{self, DebtScenario, ExtraPaymentInput};
use payoff_core::scenarios::refinance::{self, RefinanceInput, RefinanceScenario};
use payoff_core::{Debt, PayoffMonths};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn credit_card() -> Debt {
    Debt {
        name: Some("Visa".into()),
        current_balance: dec!(5000),
        original_balance: dec!(6500),
        interest_rate: dec!(0.20),
        minimum_payment: dec!(200),
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

// ===========================================================================
// Extra payment
// ===========================================================================

#[test]
fn test_extra_payment_full_scenario() {
    let scenario = extra_payment::extra_payment_scenario_as_of(&credit_card(), dec!(100), as_of());
    assert_eq!(
        scenario,
        DebtScenario {
            original_monthly_payment: dec!(200),
            new_monthly_payment: dec!(300),
            original_months: PayoffMonths::Finite(33),
            new_months: PayoffMonths::Finite(20),
            original_total_interest: dec!(1600),
            new_total_interest: dec!(1000),
            original_payoff_date: NaiveDate::from_ymd_opt(2028, 3, 15),
            new_payoff_date: NaiveDate::from_ymd_opt(2027, 2, 15),
            months_saved: 13,
            total_interest_saved: dec!(600),
        }
    );
}

#[test]
fn test_extra_payment_savings_grow_with_extra() {
    let mut last_saved = Decimal::ZERO;
    for extra in [dec!(25), dec!(50), dec!(100), dec!(250)] {
        let s = extra_payment::extra_payment_scenario_as_of(&credit_card(), extra, as_of());
        assert!(s.total_interest_saved >= last_saved, "extra {extra}");
        assert!(s.new_months < s.original_months);
        last_saved = s.total_interest_saved;
    }
}

#[test]
fn test_extra_payment_today_variant_has_dates() {
    let s = extra_payment::calculate_extra_payment_scenario(&credit_card(), dec!(100));
    assert!(s.original_payoff_date.is_some());
    assert!(s.new_payoff_date < s.original_payoff_date);
}

#[test]
fn test_extra_payment_envelope_from_json() {
    let json = serde_json::json!({
        "debt": {
            "current_balance": "5000",
            "original_balance": "6500",
            "interest_rate": "0.20",
            "minimum_payment": "200"
        },
        "extra_monthly_payment": "100",
        "as_of": "2025-06-15"
    });
    let input: ExtraPaymentInput = serde_json::from_value(json).unwrap();
    let output = extra_payment::analyze_extra_payment(&input).unwrap();
    assert_eq!(output.result.months_saved, 13);
    assert!(output.warnings.is_empty());

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["new_months"]["months"], 20);
    assert_eq!(value["result"]["total_interest_saved"], "600");
}

// ===========================================================================
// Refinance
// ===========================================================================

#[test]
fn test_refinance_full_scenario() {
    let scenario = refinance::refinance_scenario_as_of(&credit_card(), dec!(0.15), as_of());
    assert_eq!(
        scenario,
        RefinanceScenario {
            current_rate: dec!(0.20),
            new_rate: dec!(0.15),
            monthly_payment: dec!(200),
            original_months: PayoffMonths::Finite(33),
            new_months: PayoffMonths::Finite(31),
            original_total_interest: dec!(1600),
            new_total_interest: dec!(1200),
            original_payoff_date: NaiveDate::from_ymd_opt(2028, 3, 15),
            new_payoff_date: NaiveDate::from_ymd_opt(2028, 1, 15),
            months_saved: 2,
            interest_saved: dec!(400),
        }
    );
}

#[test]
fn test_refinance_never_to_never() {
    let mut debt = credit_card();
    debt.minimum_payment = dec!(10);
    let input = RefinanceInput {
        debt,
        new_annual_rate: dec!(0.10),
        as_of: Some(as_of()),
    };
    let output = refinance::analyze_refinance(&input).unwrap();
    assert_eq!(output.result.original_months, PayoffMonths::Never);
    assert_eq!(output.result.new_months, PayoffMonths::Never);
    assert_eq!(output.result.interest_saved, Decimal::ZERO);
    assert_eq!(output.result.new_payoff_date, None);
    assert_eq!(output.warnings.len(), 2);
}
