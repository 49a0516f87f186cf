//! Peso rounding helpers.
//!
//! Chilean pesos have no sub-unit, so every computed amount is rounded to a
//! whole peso, half-up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole pesos, with halves rounded away from zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::round_pesos;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_pesos(Decimal::new(63635, 1)), Decimal::from(6364));
/// assert_eq!(round_pesos(Decimal::new(63634, 1)), Decimal::from(6363));
/// ```
pub fn round_pesos(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percent`% of `amount`, rounded to whole pesos.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    round_pesos(amount * percent / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(round_pesos(dec("0.5")), dec("1"));
        assert_eq!(round_pesos(dec("2.5")), dec("3"));
        assert_eq!(round_pesos(dec("1234.5")), dec("1235"));
    }

    #[test]
    fn test_below_half_rounds_down() {
        assert_eq!(round_pesos(dec("1234.4999")), dec("1234"));
    }

    #[test]
    fn test_whole_amount_is_unchanged() {
        assert_eq!(round_pesos(dec("800000")), dec("800000"));
    }

    #[test]
    fn test_percent_of_taxable_base() {
        assert_eq!(percent_of(dec("1000000"), dec("11.44")), dec("114400"));
        assert_eq!(percent_of(dec("1000000"), dec("0.6")), dec("6000"));
        assert_eq!(percent_of(dec("333333"), dec("7")), dec("23333"));
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 10.58% of 4,725 = 499.905
        assert_eq!(percent_of(dec("4725"), dec("10.58")), dec("500"));
        // 3% of 50 = 1.5
        assert_eq!(percent_of(dec("50"), dec("3")), dec("2"));
    }
}
