use clap::{Args, ValueEnum};
use serde_json::Value;

use payoff_core::planning::schedule::{self, PayoffScheduleInput};
use payoff_core::planning::strategies::{self, PayoffPlanInput, PayoffStrategy};
use payoff_core::planning::summary::{self, DebtSummaryInput};

use crate::input;

/// Arguments for a month-by-month payoff schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a multi-debt payoff plan
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Override the strategy in the input
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl From<StrategyArg> for PayoffStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => PayoffStrategy::Avalanche,
            StrategyArg::Snowball => PayoffStrategy::Snowball,
        }
    }
}

/// Arguments for a debt portfolio summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sched_input: PayoffScheduleInput =
        input::file::read_file_or_stdin(args.input.as_deref(), "schedule")?
            .ok_or("--input <file> or stdin required for a payoff schedule")?;
    let result = schedule::build_payoff_schedule(&sched_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut plan_input: PayoffPlanInput =
        input::file::read_file_or_stdin(args.input.as_deref(), "payoff plan")?
            .ok_or("--input <file> or stdin required for a payoff plan")?;
    if let Some(strategy) = args.strategy {
        plan_input.strategy = strategy.into();
    }
    let result = strategies::plan_payoff(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input: DebtSummaryInput =
        input::file::read_file_or_stdin(args.input.as_deref(), "summary")?
            .ok_or("--input <file> or stdin required for a debt summary")?;
    let result = summary::summarize_debts(&summary_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_arg_maps_to_core() {
        assert_eq!(PayoffStrategy::from(StrategyArg::Avalanche), PayoffStrategy::Avalanche);
        assert_eq!(PayoffStrategy::from(StrategyArg::Snowball), PayoffStrategy::Snowball);
    }

    #[test]
    fn test_strategy_arg_parses_case_insensitively() {
        assert_eq!(StrategyArg::from_str("Snowball", true), Ok(StrategyArg::Snowball));
        assert!(StrategyArg::from_str("random", true).is_err());
    }
}
