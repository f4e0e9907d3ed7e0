pub mod extra_payment;
pub mod refinance;

use rust_decimal::Decimal;

use crate::types::{Money, PayoffMonths};

/// Months and interest saved moving from `original` to `new`, clamped at
/// zero. Either side never paying off yields no savings.
pub(crate) fn clamped_savings(
    original: PayoffMonths,
    new: PayoffMonths,
    original_interest: Money,
    new_interest: Money,
) -> (u32, Money) {
    match (original, new) {
        (PayoffMonths::Finite(o), PayoffMonths::Finite(n)) => (
            o.saturating_sub(n),
            (original_interest - new_interest).max(Decimal::ZERO),
        ),
        _ => (0, Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clamped_savings() {
        let (m, i) = clamped_savings(
            PayoffMonths::Finite(33),
            PayoffMonths::Finite(20),
            dec!(1600),
            dec!(1000),
        );
        assert_eq!((m, i), (13, dec!(600)));

        let (m, i) = clamped_savings(
            PayoffMonths::Finite(20),
            PayoffMonths::Finite(33),
            dec!(1000),
            dec!(1600),
        );
        assert_eq!((m, i), (0, Decimal::ZERO));

        let (m, i) = clamped_savings(
            PayoffMonths::Never,
            PayoffMonths::Finite(20),
            Decimal::ZERO,
            dec!(1000),
        );
        assert_eq!((m, i), (0, Decimal::ZERO));
    }
}
