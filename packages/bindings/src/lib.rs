use napi::Result as NapiResult;
use napi_derive::napi;

use payoff_core::Debt;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payoff(input_json: String) -> NapiResult<String> {
    let input: payoff_core::amortization::PayoffInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::amortization::analyze_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn debt_progress(debt_json: String) -> NapiResult<u32> {
    let debt: Debt = serde_json::from_str(&debt_json).map_err(to_napi_error)?;
    Ok(u32::from(payoff_core::amortization::calculate_debt_progress(&debt)))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn extra_payment_scenario(input_json: String) -> NapiResult<String> {
    let input: payoff_core::scenarios::extra_payment::ExtraPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::scenarios::extra_payment::analyze_extra_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn refinance_scenario(input_json: String) -> NapiResult<String> {
    let input: payoff_core::scenarios::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        payoff_core::scenarios::refinance::analyze_refinance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[napi]
pub fn payoff_schedule(input_json: String) -> NapiResult<String> {
    let input: payoff_core::planning::schedule::PayoffScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_core::planning::schedule::build_payoff_schedule(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn payoff_plan(input_json: String) -> NapiResult<String> {
    let input: payoff_core::planning::strategies::PayoffPlanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        payoff_core::planning::strategies::plan_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn debt_summary(input_json: String) -> NapiResult<String> {
    let input: payoff_core::planning::summary::DebtSummaryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        payoff_core::planning::summary::summarize_debts(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
