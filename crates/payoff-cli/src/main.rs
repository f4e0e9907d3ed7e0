mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::payoff::{MonthsArgs, ProgressArgs};
use commands::planning::{PlanArgs, ScheduleArgs, SummaryArgs};
use commands::scenarios::{ExtraPaymentArgs, RefinanceArgs};

/// Debt payoff calculations
#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Debt payoff calculations with decimal precision",
    long_about = "A CLI for projecting debt payoff with decimal precision. Supports \
                  months-to-payoff, total interest, extra-payment and refinance what-ifs, \
                  payoff schedules, avalanche/snowball plans and portfolio summaries."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Months to payoff, total interest and payoff date for one debt
    Months(MonthsArgs),
    /// Compare the minimum payment against the minimum plus an extra amount
    ExtraPayment(ExtraPaymentArgs),
    /// Compare the current rate against a refinanced rate
    Refinance(RefinanceArgs),
    /// Share of the original balance already repaid
    Progress(ProgressArgs),
    /// Month-by-month payoff schedule for one debt
    Schedule(ScheduleArgs),
    /// Avalanche or snowball plan across several debts
    Plan(PlanArgs),
    /// Portfolio summary of several debts at their minimum payments
    Summary(SummaryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level.parse().map_err(|_| {
        format!("Unknown log level '{level}' (expected off, error, warn, info, debug or trace)")
    })
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    match parse_level(&cli.log_level) {
        Ok(level) => init_logging(level),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Months(args) => commands::payoff::run_months(args),
        Commands::ExtraPayment(args) => commands::scenarios::run_extra_payment(args),
        Commands::Refinance(args) => commands::scenarios::run_refinance(args),
        Commands::Progress(args) => commands::payoff::run_progress(args),
        Commands::Schedule(args) => commands::planning::run_schedule(args),
        Commands::Plan(args) => commands::planning::run_plan(args),
        Commands::Summary(args) => commands::planning::run_summary(args),
        Commands::Version => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Ok(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Ok(LevelFilter::Off));
        assert_eq!(parse_level("warn"), Ok(LevelFilter::Warn));
        assert!(parse_level("wran").unwrap_err().contains("Unknown log level 'wran'"));
    }

    #[test]
    fn test_cli_parses_months_flags() {
        let cli = Cli::try_parse_from([
            "payoff", "months", "--balance", "5000", "--rate", "0.20", "--payment", "200",
            "--as-of", "2025-01-01", "--output", "minimal",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Minimal));
        match cli.command {
            Commands::Months(args) => {
                assert_eq!(args.balance, Some(rust_decimal_macros::dec!(5000)));
                assert_eq!(args.rate, Some(rust_decimal_macros::dec!(0.20)));
                assert_eq!(args.payment, Some(rust_decimal_macros::dec!(200)));
                assert_eq!(args.as_of, chrono::NaiveDate::from_ymd_opt(2025, 1, 1));
                assert!(args.input.is_none());
            }
            _ => panic!("expected months subcommand"),
        }
    }

    #[test]
    fn test_cli_plan_strategy_is_typed() {
        let cli = Cli::try_parse_from(["payoff", "plan", "--strategy", "snowball"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.strategy, Some(commands::planning::StrategyArg::Snowball));
            }
            _ => panic!("expected plan subcommand"),
        }
        assert!(Cli::try_parse_from(["payoff", "plan", "--strategy", "random"]).is_err());
    }

    #[test]
    fn test_cli_extra_payment_missing_file() {
        let cli = Cli::try_parse_from([
            "payoff", "extra-payment", "--input", "/nonexistent/extra.json",
        ])
        .unwrap();
        match cli.command {
            Commands::ExtraPayment(args) => {
                let err = commands::scenarios::run_extra_payment(args).unwrap_err();
                assert!(err.to_string().contains("File not found"));
            }
            _ => panic!("expected extra-payment subcommand"),
        }
    }
}
