pub mod schedule;
pub mod strategies;
pub mod summary;

use rust_decimal::RoundingStrategy;

use crate::amortization::monthly_rate;
use crate::types::{Money, Rate};

/// Default simulation horizon: fifty years of monthly payments.
pub(crate) const DEFAULT_MAX_MONTHS: u32 = 600;

pub(crate) fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

/// One month of interest on `balance`, rounded to cents the way a lender
/// posts it. `None` once the product leaves the Decimal range.
pub(crate) fn posted_interest(balance: Money, annual_rate: Rate) -> Option<Money> {
    balance
        .checked_mul(monthly_rate(annual_rate))
        .map(|i| i.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_posted_interest_rounds_to_cents() {
        // 5000 * 0.20 / 12 = 83.3333...
        assert_eq!(posted_interest(dec!(5000), dec!(0.20)), Some(dec!(83.33)));
        // 1000.5 * 0.12 / 12 = 10.005
        assert_eq!(posted_interest(dec!(1000.5), dec!(0.12)), Some(dec!(10.01)));
        assert_eq!(posted_interest(dec!(1000), Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn test_posted_interest_overflow_is_none() {
        assert_eq!(posted_interest(Decimal::MAX, dec!(120)), None);
    }
}
