//! Integer payload that keeps the full signed and unsigned 64-bit range.
//!
//! Non-negative integers are stored as `u64` and negative ones as `i64`, so a
//! value like `18446744073709550615` survives parsing, writing, and
//! extraction without loss. Whether a given magnitude fits a narrower type is
//! decided when it is read, never when it is stored.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    /// Zero or positive.
    Pos(u64),
    /// Always strictly negative.
    Neg(i64),
}

/// A JSON integer in the range `i64::MIN..=u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer(Repr);

impl Integer {
    /// Returns the value as `i64` if it fits.
    pub fn as_i64(self) -> Option<i64> {
        match self.0 {
            Repr::Pos(n) => i64::try_from(n).ok(),
            Repr::Neg(n) => Some(n),
        }
    }

    /// Returns the value as `u64` if it is non-negative.
    pub fn as_u64(self) -> Option<u64> {
        match self.0 {
            Repr::Pos(n) => Some(n),
            Repr::Neg(_) => None,
        }
    }

    /// Widens to `i128`, which holds every representable value exactly.
    pub fn to_i128(self) -> i128 {
        match self.0 {
            Repr::Pos(n) => i128::from(n),
            Repr::Neg(n) => i128::from(n),
        }
    }

    /// Converts to the nearest `f64`. Magnitudes above 2^53 may round.
    pub fn as_f64(self) -> f64 {
        match self.0 {
            Repr::Pos(n) => n as f64,
            Repr::Neg(n) => n as f64,
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self.0, Repr::Neg(_))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Pos(n) => fmt::Display::fmt(&n, f),
            Repr::Neg(n) => fmt::Display::fmt(&n, f),
        }
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Integer {
            fn from(n: $t) -> Self {
                Integer(Repr::Pos(n as u64))
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Integer {
            fn from(n: $t) -> Self {
                if n < 0 {
                    Integer(Repr::Neg(n as i64))
                } else {
                    Integer(Repr::Pos(n as u64))
                }
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);
