use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use payoff_core::scenarios::extra_payment::{self, ExtraPaymentInput};
use payoff_core::scenarios::refinance::{self, RefinanceInput};
use payoff_core::Debt;

use crate::input;

/// Debt described on the command line
#[derive(Args)]
pub struct DebtFlags {
    /// Debt label
    #[arg(long)]
    pub name: Option<String>,

    /// Current balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Original balance (defaults to the current balance)
    #[arg(long)]
    pub original_balance: Option<Decimal>,

    /// Annual rate as a decimal (0.20 = 20% APR)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Minimum monthly payment
    #[arg(long)]
    pub minimum_payment: Option<Decimal>,
}

impl DebtFlags {
    fn into_debt(self) -> Result<Debt, Box<dyn std::error::Error>> {
        let current_balance = self
            .balance
            .ok_or("--balance is required (or provide --input)")?;
        Ok(Debt {
            name: self.name,
            current_balance,
            original_balance: self.original_balance.unwrap_or(current_balance),
            interest_rate: self.rate.ok_or("--rate is required (or provide --input)")?,
            minimum_payment: self
                .minimum_payment
                .ok_or("--minimum-payment is required (or provide --input)")?,
        })
    }
}

/// Arguments for the extra-payment what-if
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ExtraPaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,

    /// Extra amount paid on top of the minimum every month
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Project payoff from this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for the refinance what-if
#[derive(Args)]
pub struct RefinanceArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub debt: DebtFlags,

    /// New annual rate as a decimal
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// Project payoff from this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_extra_payment(args: ExtraPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ep_input: ExtraPaymentInput =
        match input::file::read_file_or_stdin(args.input.as_deref(), "extra payment")? {
            Some(parsed) => parsed,
            None => ExtraPaymentInput {
                extra_monthly_payment: args
                    .extra
                    .ok_or("--extra is required (or provide --input)")?,
                debt: args.debt.into_debt()?,
                as_of: args.as_of,
            },
        };
    let result = extra_payment::analyze_extra_payment(&ep_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput =
        match input::file::read_file_or_stdin(args.input.as_deref(), "refinance")? {
            Some(parsed) => parsed,
            None => RefinanceInput {
                new_annual_rate: args
                    .new_rate
                    .ok_or("--new-rate is required (or provide --input)")?,
                debt: args.debt.into_debt()?,
                as_of: args.as_of,
            },
        };
    let result = refinance::analyze_refinance(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}
