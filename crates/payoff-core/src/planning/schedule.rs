use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{default_max_months, posted_interest};
use crate::amortization::{combined_payment, monthly_interest, never_amortizes_reason, payoff_date_from};
use crate::error::PayoffError;
use crate::types::*;
use crate::PayoffResult;

/// Input for a month-by-month payoff schedule of one debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffScheduleInput {
    pub debt: Debt,
    /// Paid on top of the debt's minimum payment every month.
    #[serde(default)]
    pub extra_monthly_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

/// A single month in the payoff schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub month: u32,
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub interest: Money,
    pub payment: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Output for a payoff schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffScheduleOutput {
    pub monthly_payment: Money,
    pub periods: Vec<SchedulePeriod>,
    pub paid_off: bool,
    pub months: PayoffMonths,
    /// Interest actually posted, including the smaller final payment.
    pub total_interest: Money,
    pub total_paid: Money,
    pub payoff_date: Option<NaiveDate>,
}

/// Simulate repayment month by month with interest posted in cents.
///
/// Unlike the closed-form total, the final payment here only covers what is
/// left, so `total_interest` is the amount a lender would actually charge.
pub fn build_payoff_schedule(
    input: &PayoffScheduleInput,
) -> PayoffResult<ComputationOutput<PayoffScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.max_months == 0 {
        return Err(PayoffError::InvalidInput {
            field: "max_months".into(),
            reason: "Schedule horizon must be at least 1 month".into(),
        });
    }

    let debt = &input.debt;
    let start_date = input.start_date.unwrap_or_else(|| Local::now().date_naive());
    let payment = combined_payment(debt.minimum_payment, input.extra_monthly_payment);
    let rate = debt.interest_rate;

    let mut periods: Vec<SchedulePeriod> = Vec::new();
    let mut balance = debt.current_balance;
    let mut total_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;

    let first_interest = monthly_interest(balance, rate);
    if balance <= Decimal::ZERO || payment <= Decimal::ZERO || payment <= first_interest {
        let reason = never_amortizes_reason(balance, payment, first_interest);
        log::warn!("payoff schedule for {}: {reason}", debt.label());
        warnings.push(reason);
        balance = balance.max(Decimal::ZERO);
    }

    while balance > Decimal::ZERO && payment > first_interest && (periods.len() as u32) < input.max_months {
        let month = periods.len() as u32 + 1;
        let opening = balance;
        let Some((interest, owed)) =
            posted_interest(opening, rate).and_then(|i| opening.checked_add(i).map(|owed| (i, owed)))
        else {
            warnings.push(format!("Balance of {opening} is outside the decimal range; schedule stopped"));
            break;
        };
        let paid = payment.min(owed);
        let principal = paid - interest;

        balance = owed - paid;
        total_interest = total_interest.saturating_add(interest);
        total_paid = total_paid.saturating_add(paid);

        periods.push(SchedulePeriod {
            month,
            payment_date: payoff_date_from(start_date, PayoffMonths::Finite(month)),
            opening_balance: opening,
            interest,
            payment: paid,
            principal,
            closing_balance: balance,
        });
    }

    let paid_off = balance.is_zero() && !periods.is_empty();
    if balance > Decimal::ZERO && periods.len() as u32 == input.max_months {
        warnings.push(format!(
            "Balance of {} remains after {} months",
            balance.round_dp(2),
            input.max_months
        ));
    }

    let months = if paid_off {
        PayoffMonths::Finite(periods.len() as u32)
    } else {
        PayoffMonths::Never
    };
    log::debug!(
        "payoff schedule for {}: {} periods, paid_off={paid_off}",
        debt.label(),
        periods.len()
    );

    let output = PayoffScheduleOutput {
        monthly_payment: payment,
        periods,
        paid_off,
        months,
        total_interest,
        total_paid,
        payoff_date: payoff_date_from(start_date, months),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule (interest posted to cents)",
        &serde_json::json!({
            "debt": debt.label(),
            "current_balance": debt.current_balance.to_string(),
            "interest_rate": rate.to_string(),
            "monthly_payment": payment.to_string(),
            "start_date": start_date.to_string(),
            "max_months": input.max_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}
