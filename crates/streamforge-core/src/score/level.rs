//! Score levels and the numeric types stored in them.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use num_traits::{WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use rust_decimal::Decimal;

/// Score level representing different constraint priorities.
///
/// Maps to the semantic meaning of each level index within a [`Score`](super::Score).
/// Used by [`Score::level_label`](super::Score::level_label) to classify what
/// a given level index represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility.
    Hard,
    /// Medium constraints - secondary priority.
    Medium,
    /// Soft constraints - optimization objectives.
    Soft,
}

/// Numeric value held by one score level.
///
/// Implemented for `i32`, `i64` and [`Decimal`]. Integer levels wrap on
/// overflow: keeping weights and match counts in range is the caller's
/// responsibility. Decimal levels are exact and keep their scale; an overflow
/// of the 96-bit mantissa panics instead of losing precision.
pub trait ScoreNumber:
    Copy + Debug + Display + Default + Send + Sync + Eq + Ord + Hash + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    fn plus(self, other: Self) -> Self;

    fn minus(self, other: Self) -> Self;

    fn negate(self) -> Self;

    fn times(self, other: Self) -> Self;

    fn magnitude(self) -> Self;

    /// Parses a single level token.
    ///
    /// Integer levels accept `*` as a wildcard for their minimum value.
    fn parse_level(token: &str) -> Result<Self, String>;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

macro_rules! impl_integer_score_number {
    ($($num:ty),+) => {
        $(
            impl ScoreNumber for $num {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn plus(self, other: Self) -> Self {
                    WrappingAdd::wrapping_add(&self, &other)
                }

                #[inline]
                fn minus(self, other: Self) -> Self {
                    WrappingSub::wrapping_sub(&self, &other)
                }

                #[inline]
                fn negate(self) -> Self {
                    WrappingNeg::wrapping_neg(&self)
                }

                #[inline]
                fn times(self, other: Self) -> Self {
                    WrappingMul::wrapping_mul(&self, &other)
                }

                #[inline]
                fn magnitude(self) -> Self {
                    self.wrapping_abs()
                }

                fn parse_level(token: &str) -> Result<Self, String> {
                    if token == "*" {
                        return Ok(<$num>::MIN);
                    }
                    token
                        .parse::<$num>()
                        .map_err(|e| format!("'{}' is not a valid {}: {}", token, stringify!($num), e))
                }
            }
        )+
    };
}

impl_integer_score_number!(i32, i64);

impl ScoreNumber for Decimal {
    const ZERO: Self = Decimal::ZERO;
    const ONE: Self = Decimal::ONE;

    #[inline]
    fn plus(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn minus(self, other: Self) -> Self {
        self - other
    }

    #[inline]
    fn negate(self) -> Self {
        -self
    }

    #[inline]
    fn times(self, other: Self) -> Self {
        self * other
    }

    #[inline]
    fn magnitude(self) -> Self {
        self.abs()
    }

    fn parse_level(token: &str) -> Result<Self, String> {
        if token == "*" {
            return Err(format!(
                "wildcard '{}' is not supported for decimal levels: there is no minimum decimal value",
                token
            ));
        }
        Decimal::from_str(token).map_err(|e| format!("'{}' is not a valid decimal: {}", token, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_levels_wrap() {
        assert_eq!(i32::MAX.plus(1), i32::MIN);
        assert_eq!(i64::MIN.negate(), i64::MIN);
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(i32::parse_level("*"), Ok(i32::MIN));
        assert_eq!(i64::parse_level("*"), Ok(i64::MIN));
        assert!(Decimal::parse_level("*").is_err());
    }

    #[test]
    fn test_decimal_keeps_scale() {
        let a = Decimal::parse_level("1.50").unwrap();
        let b = Decimal::parse_level("2.25").unwrap();
        assert_eq!(a.plus(b).to_string(), "3.75");
        assert_eq!(a.times(Decimal::from(2)).to_string(), "3.00");
    }
}
