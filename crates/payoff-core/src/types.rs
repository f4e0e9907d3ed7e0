use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.18 = 18% APR). Never as percentages.
pub type Rate = Decimal;

/// A debt as supplied by the application's data layer. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Outstanding balance today.
    pub current_balance: Money,
    /// Balance when the debt was first tracked.
    pub original_balance: Money,
    /// Annual nominal rate, compounded monthly.
    pub interest_rate: Rate,
    /// Scheduled monthly payment.
    pub minimum_payment: Money,
}

impl Debt {
    /// Label used in reports and warnings.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("debt")
    }
}

/// Number of monthly payments needed to retire a debt.
///
/// `Never` replaces the non-finite sentinel: the payment does not cover the
/// interest accruing each month (or there is nothing to pay with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "status", content = "months", rename_all = "snake_case")]
pub enum PayoffMonths {
    Finite(u32),
    Never,
}

impl PayoffMonths {
    /// Map a raw signed month count; negative counts have no payoff.
    pub fn from_signed(months: i64) -> Self {
        match u32::try_from(months) {
            Ok(m) => PayoffMonths::Finite(m),
            Err(_) => PayoffMonths::Never,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, PayoffMonths::Finite(_))
    }

    pub fn months(&self) -> Option<u32> {
        match self {
            PayoffMonths::Finite(m) => Some(*m),
            PayoffMonths::Never => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
