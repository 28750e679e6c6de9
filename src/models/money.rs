//! Money type for representing currency amounts
//!
//! Amounts are whole currency units (won-scale, no fractional unit) stored as
//! i64. Provides safe arithmetic, tolerant parsing of imported values, and
//! grouped formatting for reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A monetary amount in whole currency units
///
/// Expense amounts are non-negative by validation; settlement balances may be
/// negative (a refund owed to the participant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts grouped and plain integers ("12,345", "12345") as well as
    /// decimal renditions of integers ("12345.0"), which are truncated toward
    /// zero the way imported spreadsheet values are.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim().replace(',', "");
        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(String::new()));
        }

        if s.contains('.') {
            let value: f64 = s
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.clone()))?;
            if !value.is_finite() {
                return Err(MoneyParseError::InvalidFormat(s));
            }
            Ok(Self(value.trunc() as i64))
        } else {
            s.parse::<i64>()
                .map(Self)
                .map_err(|_| MoneyParseError::InvalidFormat(s))
        }
    }

    /// Format with thousands separators, without a currency symbol
    pub fn format_grouped(&self) -> String {
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.is_negative() {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format with a currency symbol, e.g. `￦12,345`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, (-*self).format_grouped())
        } else {
            format!("{}{}", symbol, self.format_grouped())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_grouped())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
