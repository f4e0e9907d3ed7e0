pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Result fields that hold one row per month or per debt.
pub(crate) const ROW_FIELDS: [&str; 2] = ["periods", "debts"];

/// Render `PayoffMonths` (`{"status": "finite", "months": n}`) as `n` or
/// `never`; everything else passes through.
pub(crate) fn payoff_months_label(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    match map.get("status")?.as_str()? {
        "finite" => map.get("months").map(|m| m.to_string()),
        "never" => Some("never".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payoff_months_label() {
        assert_eq!(
            payoff_months_label(&json!({ "status": "finite", "months": 33 })),
            Some("33".to_string())
        );
        assert_eq!(
            payoff_months_label(&json!({ "status": "never" })),
            Some("never".to_string())
        );
        assert_eq!(payoff_months_label(&json!({ "name": "Visa" })), None);
        assert_eq!(payoff_months_label(&json!(12)), None);
    }
}
