//! Closed-form amortization: months to payoff, total interest, payoff date
//! and payoff progress for a single debt.
//!
//! Every function here is infallible. Degenerate inputs map to
//! [`PayoffMonths::Never`], `None` dates or zero amounts so that callers can
//! render placeholders without error handling. All math in
//! `rust_decimal::Decimal`; logarithms use a Decimal series so no value ever
//! passes through `f64`.

use chrono::{Local, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Debt, Money, PayoffMonths, Rate};
use crate::PayoffResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly rates below this vanish into rounding inside `ln(1 + r)`; such
/// debts amortize as interest-free.
const NEGLIGIBLE_MONTHLY_RATE: Decimal = dec!(0.000000000001);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Natural logarithm via the atanh series around 1. ln(x) for x > 0.
/// Uses ln(x) = ln(x/2^n) + n*ln(2) to bring x into [0.5, 2.0] first.
pub(crate) fn ln_decimal(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let ln2 = dec!(0.6931471805599453094172321215);
    let mut val = x;
    let mut adjust = Decimal::ZERO;
    while val > dec!(2.0) {
        val /= dec!(2);
        adjust += ln2;
    }
    while val < dec!(0.5) {
        val *= dec!(2);
        adjust -= ln2;
    }
    let z = (val - Decimal::ONE) / (val + Decimal::ONE);
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for k in 1u32..60 {
        term *= z2;
        if term.is_zero() {
            break;
        }
        sum += term / Decimal::from(2 * k + 1);
    }
    dec!(2) * sum + adjust
}

/// Monthly periodic rate from an annual nominal rate. Negative rates are
/// treated as interest-free.
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate.max(Decimal::ZERO) / MONTHS_PER_YEAR
}

/// Interest accruing on `balance` over one month.
pub fn monthly_interest(balance: Money, annual_rate: Rate) -> Money {
    balance
        .checked_mul(monthly_rate(annual_rate))
        .unwrap_or(Decimal::MAX)
}

/// Minimum plus extra payment, saturating at the Decimal range.
pub fn combined_payment(minimum: Money, extra: Money) -> Money {
    minimum.saturating_add(extra)
}

fn months_from_raw(raw: Decimal) -> PayoffMonths {
    match raw.ceil().max(Decimal::ONE).to_u32() {
        Some(m) => PayoffMonths::Finite(m),
        None => PayoffMonths::Never,
    }
}

// ---------------------------------------------------------------------------
// Core operations
// ---------------------------------------------------------------------------

/// Months needed to pay off `balance` at `monthly_payment`, rounding a
/// partial final month up to a full one.
///
/// n = ceil( -ln(1 - r*B/P) / ln(1 + r) ), with r = annual_rate / 12.
/// A zero rate degenerates to ceil(B / P).
pub fn calculate_payoff_months(
    balance: Money,
    annual_rate: Rate,
    monthly_payment: Money,
) -> PayoffMonths {
    if balance <= Decimal::ZERO || monthly_payment <= Decimal::ZERO {
        return PayoffMonths::Never;
    }

    let r = monthly_rate(annual_rate);
    if r < NEGLIGIBLE_MONTHLY_RATE {
        return interest_free_months(balance, monthly_payment);
    }

    let interest = monthly_interest(balance, annual_rate);
    if monthly_payment <= interest {
        return PayoffMonths::Never;
    }

    let numerator = -ln_decimal(Decimal::ONE - interest / monthly_payment);
    let denominator = ln_decimal(Decimal::ONE + r);
    if denominator <= Decimal::ZERO {
        return interest_free_months(balance, monthly_payment);
    }
    match numerator.checked_div(denominator) {
        Some(raw) => months_from_raw(raw),
        None => PayoffMonths::Never,
    }
}

fn interest_free_months(balance: Money, monthly_payment: Money) -> PayoffMonths {
    match balance.checked_div(monthly_payment) {
        Some(raw) => months_from_raw(raw),
        None => PayoffMonths::Never,
    }
}

/// Total interest paid over the payoff horizon: max(0, P*n - B).
///
/// Returns zero when the debt never amortizes. There is no meaningful total
/// in that case and callers display the `Never` month count instead.
pub fn calculate_total_interest(balance: Money, annual_rate: Rate, monthly_payment: Money) -> Money {
    match calculate_payoff_months(balance, annual_rate, monthly_payment) {
        PayoffMonths::Finite(months) => monthly_payment
            .checked_mul(Decimal::from(months))
            .map(|paid| (paid - balance).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO),
        PayoffMonths::Never => Decimal::ZERO,
    }
}

/// Projected payoff date, counting `months` calendar months from today.
pub fn calculate_payoff_date(months: PayoffMonths) -> Option<NaiveDate> {
    payoff_date_from(Local::now().date_naive(), months)
}

/// Projected payoff date counted from `start`. Month ends clamp to the last
/// day of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn payoff_date_from(start: NaiveDate, months: PayoffMonths) -> Option<NaiveDate> {
    match months {
        PayoffMonths::Finite(m) => start.checked_add_months(Months::new(m)),
        PayoffMonths::Never => None,
    }
}

/// Share of the original balance already repaid, as a whole percentage in
/// [0, 100]. A non-positive original balance counts as fully paid.
pub fn calculate_debt_progress(debt: &Debt) -> u8 {
    if debt.original_balance <= Decimal::ZERO {
        return 100;
    }
    let Some(paid) = debt.original_balance.checked_sub(debt.current_balance) else {
        // Only a current balance far below zero overflows here.
        return if debt.current_balance > Decimal::ZERO { 0 } else { 100 };
    };
    let pct = match paid
        .checked_mul(dec!(100))
        .and_then(|p| p.checked_div(debt.original_balance))
    {
        Some(p) => p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        None if paid > Decimal::ZERO => dec!(100),
        None => Decimal::ZERO,
    };
    pct.clamp(Decimal::ZERO, dec!(100)).to_u8().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Payoff analysis envelope
// ---------------------------------------------------------------------------

/// Input for a single-debt payoff analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffInput {
    pub balance: Money,
    /// Annual nominal rate (e.g., 0.20 = 20% APR).
    pub annual_rate: Rate,
    pub monthly_payment: Money,
    /// Date payoff is projected from; today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

/// Result of a single-debt payoff analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffAnalysis {
    pub monthly_rate: Rate,
    pub monthly_interest: Money,
    pub payoff_months: PayoffMonths,
    pub total_interest: Money,
    /// Balance plus interest; absent when the debt never amortizes.
    pub total_paid: Option<Money>,
    pub payoff_date: Option<NaiveDate>,
}

/// Months, interest and payoff date for one balance/rate/payment triple.
pub fn analyze_payoff(input: &PayoffInput) -> PayoffResult<ComputationOutput<PayoffAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let as_of = input.as_of.unwrap_or_else(|| Local::now().date_naive());
    let rate = monthly_rate(input.annual_rate);
    let interest = monthly_interest(input.balance, input.annual_rate);
    let months = calculate_payoff_months(input.balance, input.annual_rate, input.monthly_payment);
    let total_interest =
        calculate_total_interest(input.balance, input.annual_rate, input.monthly_payment);

    if input.annual_rate < Decimal::ZERO {
        warnings.push("Negative annual rate treated as 0%".into());
    }
    if months == PayoffMonths::Never {
        let reason = never_amortizes_reason(input.balance, input.monthly_payment, interest);
        log::warn!("payoff analysis: {reason}");
        warnings.push(reason);
    }

    let output = PayoffAnalysis {
        monthly_rate: rate,
        monthly_interest: interest,
        payoff_months: months,
        total_interest,
        total_paid: months.months().map(|_| input.balance + total_interest),
        payoff_date: payoff_date_from(as_of, months),
    };
    log::debug!(
        "payoff analysis: balance={} rate={} payment={} -> {:?}",
        input.balance,
        input.annual_rate,
        input.monthly_payment,
        months
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-form amortization (monthly compounding)",
        &serde_json::json!({
            "balance": input.balance.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "monthly_payment": input.monthly_payment.to_string(),
            "as_of": as_of.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Human-readable reason a balance/payment pair has no payoff.
pub(crate) fn never_amortizes_reason(balance: Money, payment: Money, interest: Money) -> String {
    if balance <= Decimal::ZERO {
        "Balance is zero or negative; there is nothing to pay off".into()
    } else if payment <= Decimal::ZERO {
        format!("Monthly payment of {payment} must be positive; the debt never amortizes")
    } else {
        format!(
            "Monthly payment of {payment} does not exceed monthly interest of {}; the debt never amortizes",
            interest.round_dp(2)
        )
    }
}
