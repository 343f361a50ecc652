//! Fixed-point currency amounts.
//!
//! All money is held as a whole number of cents. Parsing accepts the decimal
//! forms donors type ("25", "25.5", "$25.50"); display always renders two
//! decimal places.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const CENTS_PER_UNIT: u64 = 100;
const BASIS_POINTS_DENOMINATOR: u128 = 10_000;

/// A non-negative currency amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create an amount from a whole number of currency units.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn from_units(units: u32) -> Self {
        Self(units as u64 * CENTS_PER_UNIT)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Check if this amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two amounts, or `None` if the result does not fit.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Sum amounts, or `None` if the result does not fit.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Apply a rate in basis points, rounding half-up to the nearest cent.
    ///
    /// `Money::from_cents(7500).percent_bps(290)` is 2.175, which rounds to 2.18.
    /// Returns `None` if the result does not fit.
    #[must_use]
    pub fn percent_bps(self, bps: u32) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(bps) + BASIS_POINTS_DENOMINATOR / 2;
        u64::try_from(scaled / BASIS_POINTS_DENOMINATOR).ok().map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(Error::invalid_amount("amount is empty"));
        }

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(Error::invalid_amount(format!("'{s}' is not a number")));
        }
        if fraction.len() > 2 {
            return Err(Error::invalid_amount(format!(
                "'{s}' has more than two decimal places"
            )));
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| Error::invalid_amount(format!("'{s}' is too large")))?
        };
        let mut cents: u64 = if fraction.is_empty() {
            0
        } else {
            fraction
                .parse()
                .map_err(|_| Error::invalid_amount(format!("'{s}' is not a number")))?
        };
        if fraction.len() == 1 {
            cents *= 10;
        }

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or_else(|| Error::invalid_amount(format!("'{s}' is too large")))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Whole(u64),
            Decimal(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Whole(units) => units
                .checked_mul(CENTS_PER_UNIT)
                .map(Self)
                .ok_or_else(|| serde::de::Error::custom(format!("'{units}' is too large"))),
            // The shortest round-trip form keeps JSON numbers to the same rules as text
            Repr::Decimal(value) => value.to_string().parse().map_err(serde::de::Error::custom),
        }
    }
}
