use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";

//--------------------------------------       Paise       -----------------------------------------------------------
/// An amount of money in Indian minor currency units (1 rupee = 100 paise).
///
/// All monetary arithmetic in the payment flow happens on this type, in integer paise, so that totals are exact and
/// independent of item ordering. Floating point never enters the money path.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Paise {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Paise {}

impl TryFrom<u64> for Paise {
    type Error = PaiseConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(PaiseConversionError(format!("Value {} is too large to convert to Paise", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = self.0.unsigned_abs() / 100;
        let paise = self.0.unsigned_abs() % 100;
        write!(f, "{sign}₹{rupees}.{paise:02}")
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Overflow-checked multiplication. Monetary totals must never wrap, so the unchecked `Mul` operator is
    /// deliberately not implemented.
    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Converts a decimal rupee amount (e.g. `"499.995"`) into paise.
    ///
    /// This is the one place where rupee-denominated input is rounded to the smallest currency unit. The rule is
    /// round-half-up on the third decimal digit, applied once to the whole amount. Negative amounts are rejected.
    pub fn from_rupees_str(value: &str) -> Result<Self, PaiseConversionError> {
        let s = value.trim();
        if s.is_empty() || s.starts_with('-') {
            return Err(PaiseConversionError(format!("'{value}' is not a valid rupee amount")));
        }
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) || whole.is_empty() {
            return Err(PaiseConversionError(format!("'{value}' is not a valid rupee amount")));
        }
        let rupees = whole.parse::<i64>().map_err(|e| PaiseConversionError(format!("'{value}': {e}")))?;
        let mut digits = frac.chars().map(|c| i64::from(c as u8 - b'0'));
        let tens = digits.next().unwrap_or(0);
        let units = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);
        let mut paise = rupees * 100 + tens * 10 + units;
        if round_up {
            paise += 1;
        }
        Ok(Self(paise))
    }
}
