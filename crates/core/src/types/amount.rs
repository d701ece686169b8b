//! Monetary amounts using decimal arithmetic.
//!
//! Donation amounts arrive from the hosted backend as loosely typed JSON:
//! numbers, numeric strings, `null`, or occasionally garbage left behind by
//! old form versions. [`Amount`] absorbs all of that at the deserialization
//! boundary so the analytics never see a negative or missing value.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount in the charity's base currency.
///
/// ## Coercion rules
///
/// | Input                 | Result |
/// |-----------------------|--------|
/// | `12.5`, `"12.5"`      | 12.5   |
/// | `null`, missing       | 0      |
/// | `"abc"`, `true`, `{}` | 0      |
/// | `-3`                  | 0      |
///
/// ## Examples
///
/// ```
/// use paw_haven_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount: Amount = serde_json::from_str("\"19.90\"").unwrap();
/// assert_eq!(amount.value(), Decimal::new(1990, 2));
///
/// let amount: Amount = serde_json::from_str("null").unwrap();
/// assert_eq!(amount, Amount::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount, clamping negative values to zero.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        if value.is_sign_negative() {
            Self::ZERO
        } else {
            Self(value)
        }
    }

    /// Create an amount from whole currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Coerce an arbitrary JSON value into an amount.
    #[must_use]
    pub fn coerce(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
            serde_json::Value::String(s) => parse_decimal(s),
            _ => Self::ZERO,
        }
    }
}

fn parse_decimal(raw: &str) -> Amount {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_or(Amount::ZERO, Amount::new)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    /// Saturates at `Decimal::MAX`.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

/// JSON output is a float number, exact for amounts up to 15 significant digits.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map_or(Self::ZERO, Self::coerce))
    }
}

/// ISO 4217 currency codes accepted by the donation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    CAD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD | Self::CAD => "$",
            Self::GBP => "£",
            Self::CHF => "CHF ",
        }
    }

    /// Format an amount for display (e.g., "€19.90").
    #[must_use]
    pub fn format(&self, amount: Amount) -> String {
        format!("{}{amount}", self.symbol())
    }
}
