use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use payoff_core::amortization::{self, PayoffInput};
use payoff_core::{with_metadata, Debt, Money};

use crate::input;

/// Arguments for a single-debt payoff calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MonthsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Annual rate as a decimal (0.20 = 20% APR)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Project payoff from this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for payoff progress
#[derive(Args)]
pub struct ProgressArgs {
    /// Current balance
    #[arg(long)]
    pub current_balance: Decimal,

    /// Original balance
    #[arg(long)]
    pub original_balance: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProgressOutput {
    progress_percent: u8,
    paid_to_date: Money,
    current_balance: Money,
    original_balance: Money,
}

pub fn run_months(args: MonthsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payoff_input: PayoffInput =
        match input::file::read_file_or_stdin(args.input.as_deref(), "payoff")? {
            Some(parsed) => parsed,
            None => PayoffInput {
                balance: args.balance.ok_or("--balance is required (or provide --input)")?,
                annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
                monthly_payment: args
                    .payment
                    .ok_or("--payment is required (or provide --input)")?,
                as_of: args.as_of,
            },
        };
    let result = amortization::analyze_payoff(&payoff_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_progress(args: ProgressArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let debt = Debt {
        name: None,
        current_balance: args.current_balance,
        original_balance: args.original_balance,
        interest_rate: Decimal::ZERO,
        minimum_payment: Decimal::ZERO,
    };
    let output = ProgressOutput {
        progress_percent: amortization::calculate_debt_progress(&debt),
        paid_to_date: (args.original_balance - args.current_balance).max(Decimal::ZERO),
        current_balance: args.current_balance,
        original_balance: args.original_balance,
    };

    let mut warnings = Vec::new();
    if args.original_balance <= Decimal::ZERO {
        warnings.push("Original balance is not positive; reported as fully paid".to_string());
    }
    let result = with_metadata(
        "Share of original balance repaid",
        &serde_json::json!({
            "current_balance": args.current_balance.to_string(),
            "original_balance": args.original_balance.to_string(),
        }),
        warnings,
        0,
        output,
    );
    Ok(serde_json::to_value(result)?)
}
