use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    calculate_debt_progress, calculate_payoff_months, calculate_total_interest, payoff_date_from,
};
use crate::error::PayoffError;
use crate::types::*;
use crate::PayoffResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtSummaryInput {
    pub debts: Vec<Debt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummaryRow {
    pub name: String,
    pub current_balance: Money,
    pub progress_percent: u8,
    pub payoff_months: PayoffMonths,
    pub payoff_date: Option<NaiveDate>,
    pub total_interest: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtSummaryOutput {
    pub total_current_balance: Money,
    pub total_original_balance: Money,
    pub total_minimum_payment: Money,
    pub overall_progress_percent: u8,
    /// Balance-weighted average annual rate.
    pub weighted_average_rate: Rate,
    pub total_projected_interest: Money,
    /// Debts whose minimum payment never retires them.
    pub never_amortizing: usize,
    /// Latest payoff date across all debts at their minimum payments.
    pub debt_free_date: Option<NaiveDate>,
    pub debts: Vec<DebtSummaryRow>,
}

/// Portfolio view of every tracked debt at its minimum payment.
pub fn summarize_debts(input: &DebtSummaryInput) -> PayoffResult<ComputationOutput<DebtSummaryOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.debts.is_empty() {
        return Err(PayoffError::InsufficientData(
            "Debt summary requires at least one debt".into(),
        ));
    }

    let as_of = input.as_of.unwrap_or_else(|| Local::now().date_naive());

    let mut rows = Vec::with_capacity(input.debts.len());
    let mut total_current = Decimal::ZERO;
    let mut total_original = Decimal::ZERO;
    let mut total_minimum = Decimal::ZERO;
    let mut rate_weighted = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut never_amortizing = 0usize;

    for (idx, debt) in input.debts.iter().enumerate() {
        let name = debt.name.clone().unwrap_or_else(|| format!("debt {}", idx + 1));
        let balance = debt.current_balance.max(Decimal::ZERO);

        // A retired debt is done today, not "never".
        let months = if balance.is_zero() {
            PayoffMonths::Finite(0)
        } else {
            calculate_payoff_months(balance, debt.interest_rate, debt.minimum_payment)
        };
        let interest = calculate_total_interest(balance, debt.interest_rate, debt.minimum_payment);

        if months == PayoffMonths::Never {
            never_amortizing += 1;
            warnings.push(format!("{name}: minimum payment never pays off the balance"));
        }
        if debt.current_balance > debt.original_balance {
            warnings.push(format!("{name}: current balance exceeds original balance"));
        }

        total_current = total_current.saturating_add(balance);
        total_original = total_original.saturating_add(debt.original_balance.max(Decimal::ZERO));
        if !balance.is_zero() {
            total_minimum = total_minimum.saturating_add(debt.minimum_payment.max(Decimal::ZERO));
        }
        rate_weighted = rate_weighted.saturating_add(balance.saturating_mul(debt.interest_rate));
        total_interest = total_interest.saturating_add(interest);

        rows.push(DebtSummaryRow {
            name,
            current_balance: balance,
            progress_percent: calculate_debt_progress(debt),
            payoff_months: months,
            payoff_date: payoff_date_from(as_of, months),
            total_interest: interest,
        });
    }

    let weighted_average_rate = if total_current.is_zero() {
        Decimal::ZERO
    } else {
        rate_weighted.checked_div(total_current).unwrap_or(Decimal::ZERO)
    };

    let overall = Debt {
        name: None,
        current_balance: total_current,
        original_balance: total_original,
        interest_rate: weighted_average_rate,
        minimum_payment: total_minimum,
    };

    let debt_free_date = if never_amortizing > 0 {
        None
    } else {
        rows.iter().filter_map(|r| r.payoff_date).max()
    };

    for w in &warnings {
        log::warn!("debt summary: {w}");
    }
    log::debug!(
        "debt summary: {} debts, balance {}, never_amortizing={never_amortizing}",
        rows.len(),
        total_current
    );

    let output = DebtSummaryOutput {
        total_current_balance: total_current,
        total_original_balance: total_original,
        total_minimum_payment: total_minimum,
        overall_progress_percent: calculate_debt_progress(&overall),
        weighted_average_rate,
        total_projected_interest: total_interest,
        never_amortizing,
        debt_free_date,
        debts: rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt portfolio summary at minimum payments",
        &serde_json::json!({
            "debts": input.debts.len(),
            "as_of": as_of.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
