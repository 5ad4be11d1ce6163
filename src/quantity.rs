//! Numeric quantity of an amount, as reported by hledger-web.
//!
//! The wire format carries the value three ways at once: an exact decimal
//! mantissa, the number of decimal places, and a floating-point
//! approximation. All three are kept so payloads round-trip byte-faithfully;
//! display formatting reads the float, arithmetic uses the exact pair.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops;

/// A decimal quantity. Invariant: `floating_point` approximates
/// `decimal_mantissa * 10^-decimal_places`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub decimal_mantissa: i64,
    pub decimal_places: u32,
    pub floating_point: f64,
}

impl Quantity {
    pub const ONE: Quantity = Quantity {
        decimal_mantissa: 1,
        decimal_places: 0,
        floating_point: 1.0,
    };

    /// Largest decimal scale the exact representation supports.
    pub const MAX_PLACES: u32 = 28;

    /// Build a quantity worth `mantissa * 10^-places`.
    pub fn new(mantissa: i64, places: u32) -> Self {
        Self::from_decimal(checked_scale(mantissa, places))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        let mantissa = decimal.mantissa();
        let saturated = mantissa.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        if saturated as i128 != mantissa {
            tracing::warn!("decimal mantissa exceeds 64 bits, saturating");
        }
        Self {
            decimal_mantissa: saturated,
            decimal_places: decimal.scale(),
            floating_point: decimal.to_f64().unwrap_or(f64::NAN),
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        checked_scale(self.decimal_mantissa, self.decimal_places)
    }

    pub fn is_zero(&self) -> bool {
        self.decimal_mantissa == 0
    }
}

/// A `Decimal` for `mantissa * 10^-places`, total over any wire value.
/// Scales past [`Quantity::MAX_PLACES`] are truncated toward zero.
fn checked_scale(mantissa: i64, places: u32) -> Decimal {
    if places > Quantity::MAX_PLACES {
        tracing::warn!(places, "decimal places exceed supported scale, truncating");
        let mantissa = 10i64
            .checked_pow(places - Quantity::MAX_PLACES)
            .map_or(0, |divisor| mantissa / divisor);
        Decimal::new(mantissa, Quantity::MAX_PLACES)
    } else {
        Decimal::new(mantissa, places)
    }
}

impl From<Decimal> for Quantity {
    fn from(decimal: Decimal) -> Self {
        Self::from_decimal(decimal)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.as_decimal()
    }
}

impl ops::Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        (self.as_decimal() + rhs.as_decimal()).normalize().into()
    }
}

impl ops::Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.as_decimal() - rhs.as_decimal()).normalize().into()
    }
}

impl ops::Mul for Quantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        (self.as_decimal() * rhs.as_decimal()).normalize().into()
    }
}

impl ops::Div for Quantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        (self.as_decimal() / rhs.as_decimal()).normalize().into()
    }
}

impl ops::Neg for Quantity {
    type Output = Self;

    fn neg(self) -> Self::Output {
        (-self.as_decimal()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_float() {
        let quantity = Quantity::new(2107437, 8);
        assert_eq!(quantity.decimal_mantissa, 2107437);
        assert_eq!(quantity.decimal_places, 8);
        assert!((quantity.floating_point - 0.02107437).abs() < 1e-12);
    }

    #[test]
    fn test_add_normalizes() {
        let sum = Quantity::new(150, 2) + Quantity::new(50, 2);
        // 1.50 + 0.50 = 2, trailing zeros stripped
        assert_eq!(sum, Quantity::new(2, 0));
        assert_eq!(sum.floating_point, 2.0);
    }

    #[test]
    fn test_sub_to_zero() {
        let zero = Quantity::new(333, 1) - Quantity::new(3330, 2);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_neg() {
        assert_eq!(-Quantity::new(5, 1), Quantity::new(-5, 1));
    }

    #[test]
    fn test_overlong_scale_truncates() {
        // wire payloads may carry more decimal places than Decimal holds
        let tiny = Quantity {
            decimal_mantissa: 1,
            decimal_places: 32,
            floating_point: 1e-32,
        };
        assert!(tiny.as_decimal().is_zero());
        assert_eq!(tiny.as_decimal() + Decimal::ONE, Decimal::ONE);
        assert_eq!(tiny + Quantity::ONE, Quantity::ONE);
        assert!(Quantity::new(1, 40).is_zero());
    }

    #[test]
    fn test_overlong_scale_keeps_leading_digits() {
        let quantity = Quantity {
            decimal_mantissa: 123456, // 1.23456e-25
            decimal_places: 30,
            floating_point: 1.23456e-25,
        };
        assert_eq!(quantity.as_decimal(), Decimal::new(1234, 28));
    }

    #[test]
    fn test_wide_mantissa_saturates() {
        let quantity = Quantity::from_decimal(Decimal::MAX);
        assert_eq!(quantity.decimal_mantissa, i64::MAX);
        assert!(quantity.floating_point.is_finite());
    }

    #[test]
    fn test_wire_round_trip() {
        let json = r#"{"decimalMantissa":-3332500,"decimalPlaces":2,"floatingPoint":-33325}"#;
        let quantity: Quantity = serde_json::from_str(json).unwrap();
        assert_eq!(quantity.decimal_mantissa, -3332500);
        assert_eq!(quantity.decimal_places, 2);
        assert_eq!(quantity.floating_point, -33325.0);

        let back = serde_json::to_value(quantity).unwrap();
        assert_eq!(back["decimalMantissa"], -3332500);
        assert_eq!(back["decimalPlaces"], 2);
    }
}
