use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

use crate::shared::constants::{CURRENCY_SYMBOL, FREE_PRICE_LABEL};

/// Display form of a course price: `Free` or `$49.99`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceLabel {
    Free,
    Paid(Decimal),
}

impl From<Decimal> for PriceLabel {
    fn from(price: Decimal) -> Self {
        if price.is_zero() {
            PriceLabel::Free
        } else {
            PriceLabel::Paid(price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        }
    }
}

impl PriceLabel {
    pub fn is_free(&self) -> bool {
        matches!(self, PriceLabel::Free)
    }
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceLabel::Free => write!(f, "{}", FREE_PRICE_LABEL),
            PriceLabel::Paid(amount) => write!(f, "{}{:.2}", CURRENCY_SYMBOL, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn label(raw: &str) -> String {
        PriceLabel::from(Decimal::from_str(raw).unwrap()).to_string()
    }

    #[test]
    fn test_zero_is_free() {
        assert_eq!(label("0"), "Free");
        assert_eq!(label("0.00"), "Free");
        assert!(PriceLabel::from(Decimal::ZERO).is_free());
    }

    #[test]
    fn test_paid_prices_have_two_decimals() {
        assert_eq!(label("49.99"), "$49.99");
        assert_eq!(label("10"), "$10.00");
        assert_eq!(label("12.5"), "$12.50");
        assert_eq!(label("0.005"), "$0.01");
    }
}
