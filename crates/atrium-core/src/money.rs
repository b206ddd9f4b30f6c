//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64 rates:                                                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a billing system:                                                   │
//! │    $80.00 × 3 nights must be EXACTLY $240.00 on the folio,             │
//! │    not 239.99999999999997                                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    8000 cents × 3 = 24000 cents, always                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atrium_core::money::Money;
//!
//! // Create from cents (preferred)
//! let rate = Money::from_cents(8000); // $80.00 per night
//!
//! // Arithmetic operations
//! let stay = rate * 3;                          // $240.00
//! let grand = stay + Money::from_cents(3550);   // $275.50
//!
//! // NEVER do this:
//! // let bad = Money::from_float(80.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments and refund math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Room.nightly_rate_cents ──► Reservation.total_cents (rate × nights)   │
/// │                                      │                                  │
/// │                                      ▼                                  │
/// │  CheckOut.stay_total + services_total ──► grand_total ──► settlement   │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// let rate = Money::from_cents(8000); // Represents $80.00
    /// assert_eq!(rate.cents(), 8000);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and DTOs all use cents.
    /// Only display formatting converts to dollars.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// let rate = Money::from_major_minor(150, 0); // $150.00
    /// assert_eq!(rate.cents(), 15000);
    ///
    /// let adjustment = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(adjustment.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount as typed at the front desk.
    ///
    /// Accepts `"80"`, `"35.5"`, `"35.50"`, an optional leading `$`, and an
    /// optional leading minus. At most two decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// assert_eq!(Money::parse("35.50").unwrap().cents(), 3550);
    /// assert_eq!(Money::parse("$80").unwrap().cents(), 8000);
    /// assert!(Money::parse("eighty").is_err());
    /// assert!(Money::parse("1.999").is_err());
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let raw = input.trim().trim_start_matches('$').trim();

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let (negative, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (major_part, minor_part) = match body.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (body, None),
        };

        if major_part.is_empty() || !major_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal amount like 80 or 35.50"));
        }
        let major: i64 = major_part
            .parse()
            .map_err(|_| invalid("amount is too large"))?;

        let minor: i64 = match minor_part {
            None => 0,
            Some(m) if m.is_empty() || m.len() > 2 => {
                return Err(invalid("use at most two decimal places"));
            }
            Some(m) if !m.chars().all(|c| c.is_ascii_digit()) => {
                return Err(invalid("expected a decimal amount like 80 or 35.50"));
            }
            // One digit means tenths: "35.5" is $35.50
            Some(m) if m.len() == 1 => {
                m.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10
            }
            Some(m) => m.parse::<i64>().map_err(|_| invalid("bad decimals"))?,
        };

        let cents = major * 100 + minor;
        Ok(if negative { Money(-cents) } else { Money(cents) })
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// let total = Money::from_cents(27550);
    /// assert_eq!(total.cents_part(), 50);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.cents_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a nightly rate by a number of nights.
    ///
    /// ## Example
    /// ```rust
    /// use atrium_core::money::Money;
    ///
    /// let rate = Money::from_cents(8000); // $80.00 per night
    /// let stay = rate.multiply_nights(3);
    /// assert_eq!(stay.cents(), 24000); // $240.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Room 101: $80.00 / night
    /// Stay: Jun 1 → Jun 4 (3 nights)
    ///      │
    ///      ▼
    /// multiply_nights(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Reservation total: $240.00
    /// ```
    #[inline]
    pub const fn multiply_nights(&self, nights: i64) -> Self {
        Money(self.0 * nights)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// Used directly by the front-desk terminal, so this IS the display format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for night counts).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, nights: i32) -> Self {
        Money(self.0 * nights as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, nights: i64) -> Self {
        Money(self.0 * nights)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
