//! # Money
//!
//! Fixed-point currency amounts. One rule, no exceptions: no floating
//! point anywhere near money. An [`Amount`] is a count of cents in a
//! `u64`, which buys three guarantees for free:
//!
//! - amounts are never negative (the type has no sign bit to misuse),
//! - amounts are never NaN or infinite (there is nothing to be NaN),
//! - equality is exact (0.1 + 0.2 is not a philosophical question here).
//!
//! Arithmetic is checked. An overflowing credit returns `None` and the
//! caller decides how to fail; nothing silently wraps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CENTS_PER_UNIT;

/// A non-negative amount of the marketplace currency, in cents.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero. The balance everyone starts negotiating from.
    pub const ZERO: Amount = Amount(0);

    /// Builds an amount from a raw cent count.
    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Returns the raw cent count.
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// True for the one amount that can't buy anything.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Subtracts `other`, or `None` if it exceeds `self`. There is no
    /// negative amount to underflow into, which is the point.
    #[must_use]
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    /// Renders with two decimals: `1250` cents displays as `12.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self)
    }
}

/// Why a decimal string failed to become an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    /// Not of the form `units` or `units.cents`, or contains non-digits.
    #[error("malformed amount literal")]
    Malformed,
    /// More than two fractional digits. We store cents; there is no
    /// smaller coin to round to.
    #[error("amounts carry at most two fractional digits")]
    TooPrecise,
    /// The value does not fit in the cent representation.
    #[error("amount out of range")]
    Overflow,
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses decimal literals like `"250"`, `"12.5"`, or `"12.50"`.
    /// Signs, exponents, and anything else `f64` would happily accept are
    /// rejected; this parser exists so floats never enter the picture.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (units, frac) = match s.split_once('.') {
            // A trailing dot ("12.") is a typo, not an amount.
            Some((_, "")) => return Err(ParseAmountError::Malformed),
            Some((u, f)) => (u, f),
            None => (s, ""),
        };

        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::Malformed);
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::Malformed);
        }
        if frac.len() > 2 {
            return Err(ParseAmountError::TooPrecise);
        }

        let units: u64 = units.parse().map_err(|_| ParseAmountError::Overflow)?;
        // "12.5" means 50 cents, not 5.
        let cents_frac: u64 = if frac.is_empty() {
            0
        } else {
            let parsed: u64 = frac.parse().map_err(|_| ParseAmountError::Malformed)?;
            if frac.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents_frac))
            .map(Amount)
            .ok_or(ParseAmountError::Overflow)
    }
}
