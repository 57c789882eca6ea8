use crate::error::PaymentError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A non-negative sum of money in whole Kenyan shillings.
///
/// Cart totals and order amounts are `Money`. It is a thin wrapper around
/// `rust_decimal::Decimal` so arithmetic never goes through floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

/// Highest unit price a listing may carry.
///
/// Together with the cart's quantity cap this keeps every cart total far
/// below `Decimal::MAX`.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000);

/// A strictly positive monetary amount in whole shillings.
///
/// Unit prices and payment request amounts must be positive whole numbers,
/// so they are validated once on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ));
        }
        if !value.fract().is_zero() {
            return Err(PaymentError::ValidationError(format!(
                "Amount must be whole shillings, got {value}"
            )));
        }
        Ok(Self(value.normalize()))
    }

    /// A listing's unit price: a valid amount no greater than [`MAX_UNIT_PRICE`].
    pub fn unit_price(value: Decimal) -> Result<Self, PaymentError> {
        let amount = Self::new(value)?;
        if amount.0 > MAX_UNIT_PRICE {
            return Err(PaymentError::ValidationError(format!(
                "Unit price must not exceed {MAX_UNIT_PRICE}, got {value}"
            )));
        }
        Ok(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Money> for Amount {
    type Error = PaymentError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// Unit price times a line quantity.
impl Mul<u32> for Amount {
    type Output = Money;
    fn mul(self, quantity: u32) -> Self::Output {
        Money(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KSh {}", self.0.normalize())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Money::from(*self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0)),
            Err(PaymentError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1)),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_must_be_whole_shillings() {
        assert!(matches!(
            Amount::new(dec!(12.5)),
            Err(PaymentError::ValidationError(_))
        ));
        assert_eq!(Amount::new(dec!(1200.00)).unwrap().value(), dec!(1200));
    }

    #[test]
    fn test_unit_price_cap() {
        assert!(Amount::unit_price(MAX_UNIT_PRICE).is_ok());
        assert!(matches!(
            Amount::unit_price(dec!(10000000000000000000000)),
            Err(PaymentError::ValidationError(_))
        ));
        // Plain amounts (totals) are not capped.
        assert!(Amount::new(dec!(10000000000000000000000)).is_ok());
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let huge = Money::from(Amount::new(Decimal::MAX).unwrap());
        assert_eq!((huge + huge).value(), Decimal::MAX);

        let price = Amount::new(Decimal::MAX).unwrap();
        assert_eq!((price * u32::MAX).value(), Decimal::MAX);
    }

    #[test]
    fn test_price_times_quantity() {
        let price = Amount::new(dec!(3500)).unwrap();
        assert_eq!((price * 3).value(), dec!(10500));
    }

    #[test]
    fn test_money_sum_of_nothing_is_zero() {
        let total: Money = std::iter::empty().sum();
        assert_eq!(total, Money::ZERO);
        assert!(Amount::try_from(total).is_err());
    }

    #[test]
    fn test_amount_deserialization_rejects_zero() {
        assert!(serde_json::from_str::<Amount>("\"1200\"").is_ok());
        assert!(serde_json::from_str::<Amount>("\"0\"").is_err());
    }

    #[test]
    fn test_money_display() {
        let money = Money::from(Amount::new(dec!(4200.00)).unwrap());
        assert_eq!(money.to_string(), "KSh 4200");
    }
}
