use payoff_core::amortization::{
    calculate_debt_progress, calculate_payoff_date, calculate_payoff_months,
    calculate_total_interest, monthly_interest, payoff_date_from,
};
use payoff_core::{Debt, PayoffMonths};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Payoff months
// ===========================================================================

#[test]
fn test_payoff_months_finite_when_payment_exceeds_interest() {
    let rates = [dec!(0.0), dec!(0.05), dec!(0.12), dec!(0.20), dec!(0.299)];
    for rate in rates {
        // Interest on 10k at 29.9% is ~249.17/month
        for payment in [dec!(250), dec!(400), dec!(1000), dec!(10000)] {
            let months = calculate_payoff_months(dec!(10000), rate, payment);
            match months {
                PayoffMonths::Finite(m) => assert!(m >= 1, "rate {rate} payment {payment}"),
                PayoffMonths::Never => panic!("expected finite for rate {rate} payment {payment}"),
            }
        }
    }
}

#[test]
fn test_payoff_months_non_increasing_in_payment() {
    let mut previous = u32::MAX;
    let mut payment = dec!(90);
    while payment <= dec!(5200) {
        let months = calculate_payoff_months(dec!(5000), dec!(0.20), payment)
            .months()
            .expect("payment covers interest");
        assert!(months <= previous, "payment {payment}: {months} > {previous}");
        previous = months;
        payment += dec!(37.5);
    }
    assert_eq!(previous, 1);
}

#[test]
fn test_payoff_months_never_when_payment_below_interest() {
    for (balance, rate) in [(dec!(5000), dec!(0.20)), (dec!(25000), dec!(0.07)), (dec!(100), dec!(0.36))] {
        let interest = monthly_interest(balance, rate);
        assert_eq!(calculate_payoff_months(balance, rate, interest), PayoffMonths::Never);
        assert_eq!(
            calculate_payoff_months(balance, rate, interest - dec!(0.01)),
            PayoffMonths::Never
        );
    }
}

#[test]
fn test_zero_rate_is_exact_division() {
    let cases = [
        (dec!(1000), dec!(100), 10),
        (dec!(1000), dec!(99.99), 11),
        (dec!(1), dec!(1000), 1),
        (dec!(12345.67), dec!(250), 50),
    ];
    for (balance, payment, expected) in cases {
        assert_eq!(
            calculate_payoff_months(balance, Decimal::ZERO, payment),
            PayoffMonths::Finite(expected),
            "balance {balance} payment {payment}"
        );
    }
}

// ===========================================================================
// Total interest
// ===========================================================================

#[test]
fn test_total_interest_known_scenarios() {
    assert_eq!(calculate_total_interest(dec!(5000), dec!(0.20), dec!(200)), dec!(1600));
    assert_eq!(calculate_total_interest(dec!(1000), Decimal::ZERO, dec!(100)), Decimal::ZERO);
}

#[test]
fn test_total_interest_never_negative() {
    for payment in [dec!(-10), Decimal::ZERO, dec!(50), dec!(84), dec!(200), dec!(6000)] {
        for rate in [Decimal::ZERO, dec!(0.2), dec!(-0.1)] {
            assert!(calculate_total_interest(dec!(5000), rate, payment) >= Decimal::ZERO);
        }
    }
}

// ===========================================================================
// Payoff date
// ===========================================================================

#[test]
fn test_payoff_date_sentinels() {
    assert_eq!(calculate_payoff_date(PayoffMonths::Never), None);
    assert_eq!(calculate_payoff_date(PayoffMonths::from_signed(-5)), None);
}

#[test]
fn test_payoff_date_crosses_leap_year() {
    let start = chrono::NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
    assert_eq!(
        payoff_date_from(start, PayoffMonths::Finite(12)),
        chrono::NaiveDate::from_ymd_opt(2024, 2, 28)
    );
}

// ===========================================================================
// Progress
// ===========================================================================

#[test]
fn test_progress_in_range_for_valid_debts() {
    let original = dec!(2500);
    let mut current = Decimal::ZERO;
    while current <= original {
        let debt = Debt {
            name: None,
            current_balance: current,
            original_balance: original,
            interest_rate: dec!(0.1),
            minimum_payment: dec!(50),
        };
        let pct = calculate_debt_progress(&debt);
        assert!(pct <= 100);
        current += dec!(123.45);
    }
}

#[test]
fn test_progress_zero_original_is_hundred() {
    let debt = Debt {
        name: Some("Gift".into()),
        current_balance: Decimal::ZERO,
        original_balance: Decimal::ZERO,
        interest_rate: Decimal::ZERO,
        minimum_payment: Decimal::ZERO,
    };
    assert_eq!(calculate_debt_progress(&debt), 100);
}
