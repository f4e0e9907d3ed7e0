use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::clamped_savings;
use crate::amortization::{
    calculate_payoff_months, calculate_total_interest, combined_payment, monthly_interest,
    never_amortizes_reason, payoff_date_from,
};
use crate::types::{with_metadata, ComputationOutput, Debt, Money, PayoffMonths};
use crate::PayoffResult;

/// Comparison of paying the minimum against paying the minimum plus extra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtScenario {
    pub original_monthly_payment: Money,
    pub new_monthly_payment: Money,
    pub original_months: PayoffMonths,
    pub new_months: PayoffMonths,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub original_payoff_date: Option<NaiveDate>,
    pub new_payoff_date: Option<NaiveDate>,
    pub months_saved: u32,
    pub total_interest_saved: Money,
}

/// Input for the extra-payment analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentInput {
    pub debt: Debt,
    pub extra_monthly_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// What-if for adding `extra_monthly_payment` on top of the minimum payment,
/// with payoff dates projected from today.
pub fn calculate_extra_payment_scenario(debt: &Debt, extra_monthly_payment: Money) -> DebtScenario {
    extra_payment_scenario_as_of(debt, extra_monthly_payment, Local::now().date_naive())
}

/// Same as [`calculate_extra_payment_scenario`] with an explicit start date.
pub fn extra_payment_scenario_as_of(
    debt: &Debt,
    extra_monthly_payment: Money,
    as_of: NaiveDate,
) -> DebtScenario {
    let balance = debt.current_balance;
    let rate = debt.interest_rate;
    let original_payment = debt.minimum_payment;
    let new_payment = combined_payment(original_payment, extra_monthly_payment);

    let original_months = calculate_payoff_months(balance, rate, original_payment);
    let new_months = calculate_payoff_months(balance, rate, new_payment);
    let original_interest = calculate_total_interest(balance, rate, original_payment);
    let new_interest = calculate_total_interest(balance, rate, new_payment);

    let (months_saved, total_interest_saved) =
        clamped_savings(original_months, new_months, original_interest, new_interest);

    DebtScenario {
        original_monthly_payment: original_payment,
        new_monthly_payment: new_payment,
        original_months,
        new_months,
        original_total_interest: original_interest,
        new_total_interest: new_interest,
        original_payoff_date: payoff_date_from(as_of, original_months),
        new_payoff_date: payoff_date_from(as_of, new_months),
        months_saved,
        total_interest_saved,
    }
}

/// Extra-payment scenario wrapped in the standard output envelope.
pub fn analyze_extra_payment(
    input: &ExtraPaymentInput,
) -> PayoffResult<ComputationOutput<DebtScenario>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let as_of = input.as_of.unwrap_or_else(|| Local::now().date_naive());
    let scenario = extra_payment_scenario_as_of(&input.debt, input.extra_monthly_payment, as_of);

    if input.extra_monthly_payment <= Decimal::ZERO {
        warnings.push(format!(
            "Extra payment of {} is not positive; no savings are possible",
            input.extra_monthly_payment
        ));
    }
    let interest = monthly_interest(input.debt.current_balance, input.debt.interest_rate);
    if scenario.original_months == PayoffMonths::Never {
        warnings.push(format!(
            "At the minimum payment: {}",
            never_amortizes_reason(input.debt.current_balance, scenario.original_monthly_payment, interest)
        ));
    }
    if scenario.new_months == PayoffMonths::Never {
        warnings.push(format!(
            "With the extra payment: {}",
            never_amortizes_reason(input.debt.current_balance, scenario.new_monthly_payment, interest)
        ));
    }
    for w in &warnings {
        log::warn!("extra payment scenario for {}: {w}", input.debt.label());
    }
    log::debug!(
        "extra payment scenario for {}: {:?} -> {:?}",
        input.debt.label(),
        scenario.original_months,
        scenario.new_months
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Extra payment what-if (closed-form amortization)",
        &serde_json::json!({
            "debt": input.debt.label(),
            "current_balance": input.debt.current_balance.to_string(),
            "interest_rate": input.debt.interest_rate.to_string(),
            "minimum_payment": input.debt.minimum_payment.to_string(),
            "extra_monthly_payment": input.extra_monthly_payment.to_string(),
            "as_of": as_of.to_string(),
        }),
        warnings,
        elapsed,
        scenario,
    ))
}
