use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::clamped_savings;
use crate::amortization::{
    calculate_payoff_months, calculate_total_interest, monthly_interest, never_amortizes_reason,
    payoff_date_from,
};
use crate::types::{with_metadata, ComputationOutput, Debt, Money, PayoffMonths, Rate};
use crate::PayoffResult;

/// Comparison of the current rate against a refinanced rate at the same
/// monthly payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceScenario {
    pub current_rate: Rate,
    pub new_rate: Rate,
    /// Unchanged by the refinance.
    pub monthly_payment: Money,
    pub original_months: PayoffMonths,
    pub new_months: PayoffMonths,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub original_payoff_date: Option<NaiveDate>,
    pub new_payoff_date: Option<NaiveDate>,
    pub months_saved: u32,
    pub interest_saved: Money,
}

/// Input for the refinance analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub debt: Debt,
    pub new_annual_rate: Rate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// What-if for moving the debt to `new_annual_rate`, payoff dates projected
/// from today.
pub fn calculate_refinance_scenario(debt: &Debt, new_annual_rate: Rate) -> RefinanceScenario {
    refinance_scenario_as_of(debt, new_annual_rate, Local::now().date_naive())
}

pub fn refinance_scenario_as_of(debt: &Debt, new_annual_rate: Rate, as_of: NaiveDate) -> RefinanceScenario {
    let balance = debt.current_balance;
    let payment = debt.minimum_payment;

    let original_months = calculate_payoff_months(balance, debt.interest_rate, payment);
    let new_months = calculate_payoff_months(balance, new_annual_rate, payment);
    let original_interest = calculate_total_interest(balance, debt.interest_rate, payment);
    let new_interest = calculate_total_interest(balance, new_annual_rate, payment);

    let (months_saved, interest_saved) =
        clamped_savings(original_months, new_months, original_interest, new_interest);

    RefinanceScenario {
        current_rate: debt.interest_rate,
        new_rate: new_annual_rate,
        monthly_payment: payment,
        original_months,
        new_months,
        original_total_interest: original_interest,
        new_total_interest: new_interest,
        original_payoff_date: payoff_date_from(as_of, original_months),
        new_payoff_date: payoff_date_from(as_of, new_months),
        months_saved,
        interest_saved,
    }
}

/// Refinance scenario wrapped in the standard output envelope.
pub fn analyze_refinance(input: &RefinanceInput) -> PayoffResult<ComputationOutput<RefinanceScenario>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let as_of = input.as_of.unwrap_or_else(|| Local::now().date_naive());
    let scenario = refinance_scenario_as_of(&input.debt, input.new_annual_rate, as_of);

    if input.new_annual_rate >= input.debt.interest_rate {
        warnings.push(format!(
            "New rate {} is not below the current rate {}; refinancing saves nothing",
            input.new_annual_rate, input.debt.interest_rate
        ));
    }
    let balance = input.debt.current_balance;
    if scenario.original_months == PayoffMonths::Never {
        let interest = monthly_interest(balance, input.debt.interest_rate);
        warnings.push(format!(
            "At the current rate: {}",
            never_amortizes_reason(balance, scenario.monthly_payment, interest)
        ));
    }
    if scenario.new_months == PayoffMonths::Never {
        let interest = monthly_interest(balance, input.new_annual_rate);
        warnings.push(format!(
            "At the new rate: {}",
            never_amortizes_reason(balance, scenario.monthly_payment, interest)
        ));
    }
    for w in &warnings {
        log::warn!("refinance scenario for {}: {w}", input.debt.label());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance what-if at constant payment (closed-form amortization)",
        &serde_json::json!({
            "debt": input.debt.label(),
            "current_balance": balance.to_string(),
            "current_rate": input.debt.interest_rate.to_string(),
            "new_rate": input.new_annual_rate.to_string(),
            "monthly_payment": input.debt.minimum_payment.to_string(),
            "as_of": as_of.to_string(),
        }),
        warnings,
        elapsed,
        scenario,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn card() -> Debt {
        Debt {
            name: Some("Credit card".into()),
            current_balance: dec!(5000),
            original_balance: dec!(5000),
            interest_rate: dec!(0.20),
            minimum_payment: dec!(200),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_refinance_to_lower_rate() {
        let s = refinance_scenario_as_of(&card(), dec!(0.15), as_of());
        // 15%: -ln(1 - 62.5/200) / ln(1.0125) = 30.16 -> 31
        assert_eq!(s.new_months, PayoffMonths::Finite(31));
        assert_eq!(s.months_saved, 2);
        assert_eq!(s.new_total_interest, dec!(1200));
        assert_eq!(s.interest_saved, dec!(400));
        assert_eq!(s.monthly_payment, dec!(200));
        assert_eq!(s.new_payoff_date, NaiveDate::from_ymd_opt(2027, 8, 1));
    }

    #[test]
    fn test_refinance_to_zero_rate() {
        let s = refinance_scenario_as_of(&card(), Decimal::ZERO, as_of());
        assert_eq!(s.new_months, PayoffMonths::Finite(25));
        assert_eq!(s.new_total_interest, Decimal::ZERO);
        assert_eq!(s.interest_saved, dec!(1600));
    }

    #[test]
    fn test_refinance_to_higher_rate_clamped() {
        let s = refinance_scenario_as_of(&card(), dec!(0.25), as_of());
        assert_eq!(s.months_saved, 0);
        assert_eq!(s.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_refinance_out_of_never() {
        let mut debt = card();
        debt.interest_rate = dec!(0.60);
        let s = refinance_scenario_as_of(&debt, dec!(0.10), as_of());
        assert_eq!(s.original_months, PayoffMonths::Never);
        assert!(s.new_months.is_finite());
        assert_eq!(s.interest_saved, Decimal::ZERO);
        assert_eq!(s.months_saved, 0);
    }

    #[test]
    fn test_analyze_refinance_warns_on_higher_rate() {
        let input = RefinanceInput {
            debt: card(),
            new_annual_rate: dec!(0.25),
            as_of: Some(as_of()),
        };
        let result = analyze_refinance(&input).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("not below"));
    }
}
