//! Exact currency amounts — `Quantity`.
//!
//! Every monetary value in the SDK (rate, amount, total, fee, balance) is a
//! `Quantity`: an exact base-10 fixed-point number. Construction accepts
//! integers, decimal strings, and `rust_decimal::Decimal` values. Binary
//! floats are refused: `TryFrom<f64>` and `TryFrom<f32>` always fail, since
//! most decimal fractions have no exact binary representation and the
//! rounding error would end up in traded quantities.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Smallest representable increment of any currency on the exchange (1e-8).
const ULP_SCALE: u32 = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("not a valid decimal amount: {0:?}")]
    Parse(String),

    #[error("binary floats cannot represent exact decimal amounts; pass a string or integer instead")]
    FloatInput,
}

/// An exact fixed-point currency amount.
///
/// Wraps `rust_decimal::Decimal` and serializes transparently as a string,
/// matching the exchange's wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// One unit of the last place: 1e-8.
    pub fn ulp() -> Quantity {
        Quantity(Decimal::new(1, ULP_SCALE))
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_sign_negative(&self) -> bool {
        self.0.is_sign_negative()
    }

    /// Round up to the next ULP. Exact multiples are unchanged.
    ///
    /// The exchange rounds fees this way: any fraction of a ULP owed is
    /// charged as a whole ULP, never discarded.
    pub fn ceil_to_ulp(&self) -> Quantity {
        Quantity(
            self.0
                .round_dp_with_strategy(ULP_SCALE, RoundingStrategy::ToPositiveInfinity),
        )
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Construction allow-list ──────────────────────────────────────────────────

impl From<Decimal> for Quantity {
    fn from(d: Decimal) -> Self {
        Quantity(d)
    }
}

macro_rules! quantity_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Quantity {
            fn from(n: $t) -> Self {
                Quantity(Decimal::from(n))
            }
        }
    )*};
}

quantity_from_int!(i32, i64, u32, u64);

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .map(Quantity)
            .map_err(|_| QuantityError::Parse(s.to_string()))
    }
}

impl TryFrom<&str> for Quantity {
    type Error = QuantityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Quantity {
    type Error = QuantityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Exact monetary inputs: integers, decimal strings, `Decimal`, `Quantity`.
///
/// This is the allow-list every monetary entry point (rates, amounts)
/// accepts. Binary floats are deliberately absent.
pub trait IntoQuantity {
    fn into_quantity(self) -> Result<Quantity, QuantityError>;
}

impl IntoQuantity for Quantity {
    fn into_quantity(self) -> Result<Quantity, QuantityError> {
        Ok(self)
    }
}

impl IntoQuantity for Decimal {
    fn into_quantity(self) -> Result<Quantity, QuantityError> {
        Ok(Quantity(self))
    }
}

impl IntoQuantity for &str {
    fn into_quantity(self) -> Result<Quantity, QuantityError> {
        self.parse()
    }
}

impl IntoQuantity for String {
    fn into_quantity(self) -> Result<Quantity, QuantityError> {
        self.parse()
    }
}

macro_rules! into_quantity_int {
    ($($t:ty),*) => {$(
        impl IntoQuantity for $t {
            fn into_quantity(self) -> Result<Quantity, QuantityError> {
                Ok(Quantity::from(self))
            }
        }
    )*};
}

into_quantity_int!(i32, i64, u32, u64);

/// Always fails. Floats are rejected at the boundary, not rounded.
impl TryFrom<f64> for Quantity {
    type Error = QuantityError;

    fn try_from(_: f64) -> Result<Self, Self::Error> {
        Err(QuantityError::FloatInput)
    }
}

/// Always fails. Floats are rejected at the boundary, not rounded.
impl TryFrom<f32> for Quantity {
    type Error = QuantityError;

    fn try_from(_: f32) -> Result<Self, Self::Error> {
        Err(QuantityError::FloatInput)
    }
}

// ── Arithmetic ───────────────────────────────────────────────────────────────

impl Add for Quantity {
    type Output = Quantity;
    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Quantity;
    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 - rhs.0)
    }
}

impl Mul for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 * rhs.0)
    }
}

impl Div for Quantity {
    type Output = Quantity;
    fn div(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 / rhs.0)
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity(-self.0)
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        self.0 -= rhs.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        Quantity(iter.map(|q| q.0).sum())
    }
}

// ── Serde (transparent, string on the wire) ──────────────────────────────────

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
