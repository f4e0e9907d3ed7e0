//! Multi-debt payoff planning.
//!
//! A fixed monthly budget pays every debt's minimum, then the remainder is
//! directed at one target debt at a time. Once a debt is retired its minimum
//! rolls into the budget for the next target.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{default_max_months, posted_interest};
use crate::amortization::payoff_date_from;
use crate::error::PayoffError;
use crate::types::*;
use crate::PayoffResult;

/// Order in which surplus budget is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    /// Highest interest rate first; minimises total interest.
    Avalanche,
    /// Smallest balance first; retires individual debts soonest.
    Snowball,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffPlanInput {
    pub debts: Vec<Debt>,
    /// Total amount available for debt payments every month.
    pub monthly_budget: Money,
    pub strategy: PayoffStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDebt {
    pub name: String,
    /// 1-based position in the strategy's target order.
    pub priority: usize,
    pub starting_balance: Money,
    pub interest_rate: Rate,
    pub payoff_month: Option<u32>,
    pub payoff_date: Option<NaiveDate>,
    pub interest_paid: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffPlanOutput {
    pub strategy: PayoffStrategy,
    pub monthly_budget: Money,
    pub total_minimum_payment: Money,
    /// Debts in target order.
    pub debts: Vec<PlannedDebt>,
    pub total_months: PayoffMonths,
    pub total_interest: Money,
    pub debt_free_date: Option<NaiveDate>,
}

struct PlanState {
    name: String,
    rate: Rate,
    minimum: Money,
    starting_balance: Money,
    balance: Money,
    interest_paid: Money,
    payoff_month: Option<u32>,
}

impl PlanState {
    /// Post one month of interest. `None` once the balance leaves the
    /// Decimal range.
    fn accrue(&mut self) -> Option<()> {
        let interest = posted_interest(self.balance, self.rate)?;
        self.balance = self.balance.checked_add(interest)?;
        self.interest_paid = self.interest_paid.saturating_add(interest);
        Some(())
    }
}

/// Why a simulation ended with balances left over.
enum Unfinished {
    Horizon,
    Growing(u32),
    Overflow(u32),
}

/// Target order for `strategy`. Stable: equal keys keep input order.
fn target_order(debts: &[Debt], strategy: PayoffStrategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    match strategy {
        PayoffStrategy::Avalanche => order.sort_by(|&a, &b| {
            debts[b]
                .interest_rate
                .cmp(&debts[a].interest_rate)
                .then(debts[a].current_balance.cmp(&debts[b].current_balance))
        }),
        PayoffStrategy::Snowball => order.sort_by(|&a, &b| {
            debts[a]
                .current_balance
                .cmp(&debts[b].current_balance)
                .then(debts[b].interest_rate.cmp(&debts[a].interest_rate))
        }),
    }
    order
}

/// Simulate paying down every debt under `input.strategy`.
pub fn plan_payoff(input: &PayoffPlanInput) -> PayoffResult<ComputationOutput<PayoffPlanOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.debts.is_empty() {
        return Err(PayoffError::InsufficientData(
            "Payoff plan requires at least one debt".into(),
        ));
    }
    let total_minimum: Money = input
        .debts
        .iter()
        .filter(|d| d.current_balance > Decimal::ZERO)
        .map(|d| d.minimum_payment.max(Decimal::ZERO))
        .try_fold(Decimal::ZERO, |acc, m| acc.checked_add(m))
        .ok_or_else(|| PayoffError::InvalidInput {
            field: "debts".into(),
            reason: "Total minimum payment is outside the decimal range".into(),
        })?;
    if input.monthly_budget < total_minimum {
        return Err(PayoffError::InvalidInput {
            field: "monthly_budget".into(),
            reason: format!(
                "Budget of {} is below the total minimum payment of {total_minimum}",
                input.monthly_budget
            ),
        });
    }

    let start_date = input.start_date.unwrap_or_else(|| Local::now().date_naive());
    let order = target_order(&input.debts, input.strategy);

    let mut states: Vec<PlanState> = order
        .iter()
        .map(|&idx| {
            let d = &input.debts[idx];
            let balance = d.current_balance.max(Decimal::ZERO);
            PlanState {
                name: d.name.clone().unwrap_or_else(|| format!("debt {}", idx + 1)),
                rate: d.interest_rate,
                minimum: d.minimum_payment.max(Decimal::ZERO),
                starting_balance: balance,
                balance,
                interest_paid: Decimal::ZERO,
                payoff_month: if balance.is_zero() { Some(0) } else { None },
            }
        })
        .collect();

    let mut month: u32 = 0;
    let mut stopped: Option<Unfinished> = None;
    while stopped.is_none()
        && states.iter().any(|s| s.balance > Decimal::ZERO)
        && month < input.max_months
    {
        month += 1;
        let opening: Vec<Money> = states.iter().map(|s| s.balance).collect();

        if states
            .iter_mut()
            .filter(|s| s.balance > Decimal::ZERO)
            .any(|s| s.accrue().is_none())
        {
            stopped = Some(Unfinished::Overflow(month));
            break;
        }

        let mut pool = input.monthly_budget;
        for s in states.iter_mut().filter(|s| s.balance > Decimal::ZERO) {
            let pay = s.minimum.min(s.balance);
            s.balance -= pay;
            pool -= pay;
        }

        for s in states.iter_mut() {
            if pool <= Decimal::ZERO {
                break;
            }
            if s.balance > Decimal::ZERO {
                let pay = pool.min(s.balance);
                s.balance -= pay;
                pool -= pay;
            }
        }

        for s in states.iter_mut() {
            if s.balance.is_zero() && s.payoff_month.is_none() {
                s.payoff_month = Some(month);
            }
        }

        // Every open debt grew and none was retired, so no minimum rolls
        // over and the same payments meet more interest next month.
        let all_growing = states
            .iter()
            .zip(&opening)
            .filter(|(_, open)| **open > Decimal::ZERO)
            .all(|(s, open)| s.balance > *open);
        if all_growing {
            stopped = Some(Unfinished::Growing(month));
        }
    }

    let unpaid: Vec<&str> = states
        .iter()
        .filter(|s| s.payoff_month.is_none())
        .map(|s| s.name.as_str())
        .collect();
    if !unpaid.is_empty() {
        let names = unpaid.join(", ");
        let msg = match stopped.unwrap_or(Unfinished::Horizon) {
            Unfinished::Horizon => {
                format!("Not paid off within {} months: {names}", input.max_months)
            }
            Unfinished::Growing(m) => format!(
                "Not paid off: payments stop covering interest from month {m}, balances grow without bound: {names}"
            ),
            Unfinished::Overflow(m) => format!(
                "Not paid off: balances leave the decimal range in month {m}: {names}"
            ),
        };
        log::warn!("payoff plan: {msg}");
        warnings.push(msg);
    }

    let total_months = if unpaid.is_empty() {
        PayoffMonths::Finite(month)
    } else {
        PayoffMonths::Never
    };
    let total_interest: Money = states
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.interest_paid));
    log::debug!(
        "payoff plan ({:?}): {} debts, {:?}, interest {}",
        input.strategy,
        states.len(),
        total_months,
        total_interest
    );

    let debts = states
        .into_iter()
        .enumerate()
        .map(|(i, s)| PlannedDebt {
            payoff_date: s
                .payoff_month
                .and_then(|m| payoff_date_from(start_date, PayoffMonths::Finite(m))),
            name: s.name,
            priority: i + 1,
            starting_balance: s.starting_balance,
            interest_rate: s.rate,
            payoff_month: s.payoff_month,
            interest_paid: s.interest_paid,
        })
        .collect();

    let output = PayoffPlanOutput {
        strategy: input.strategy,
        monthly_budget: input.monthly_budget,
        total_minimum_payment: total_minimum,
        debts,
        total_months,
        total_interest,
        debt_free_date: payoff_date_from(start_date, total_months),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        match input.strategy {
            PayoffStrategy::Avalanche => "Debt avalanche (highest rate first)",
            PayoffStrategy::Snowball => "Debt snowball (smallest balance first)",
        },
        &serde_json::json!({
            "debts": input.debts.len(),
            "monthly_budget": input.monthly_budget.to_string(),
            "start_date": start_date.to_string(),
            "max_months": input.max_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}
