//! # Validation Module
//!
//! Input validation utilities for Atrium PMS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-desk prompts                                           │
//! │  ├── Parse failures (dates, amounts) reported immediately              │
//! │  └── Missing required input → ValidationError::Required                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + aggregate constructors                         │
//! │  ├── Field rules (lengths, formats, ranges)                            │
//! │  └── Domain rules (dates in order, party fits the room)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (customer email, one register per stay)        │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Violations are detected BEFORE any mutation happens                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use atrium_core::validation::{validate_room_number, validate_guest_count};
//!
//! // Validate a room number before registering the room
//! validate_room_number("101").unwrap();
//!
//! // Validate the party size against the room capacity
//! validate_guest_count(2, 4).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a room number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 10 characters
/// - Should contain only alphanumeric characters and hyphens
///
/// ## Example
/// ```rust
/// use atrium_core::validation::validate_room_number;
///
/// assert!(validate_room_number("101").is_ok());
/// assert!(validate_room_number("2-A").is_ok());
/// assert!(validate_room_number("").is_err());
/// assert!(validate_room_number("room one hundred").is_err());
/// ```
pub fn validate_room_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "room number".to_string(),
        });
    }

    if number.len() > 10 {
        return Err(ValidationError::TooLong {
            field: "room number".to_string(),
            max: 10,
        });
    }

    if !number.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "room number".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a person or customer name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 120 characters
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 254 characters
/// - Must contain a single `@` with text on both sides
///
/// Deliberately loose: the front desk types these in a hurry, and the only
/// hard requirement is that the address is usable as a unique lookup key.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected something like guest@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates an identity document number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 30 characters
pub fn validate_document_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "document number".to_string(),
        });
    }

    if number.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "document number".to_string(),
            max: 30,
        });
    }

    Ok(())
}

/// Validates a payment method label.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 40 characters
///
/// The method is free text ("cash", "visa", "transfer") rather than an enum:
/// the front office records whatever the property accepts.
pub fn validate_payment_method(method: &str) -> ValidationResult<()> {
    let method = method.trim();

    if method.is_empty() {
        return Err(ValidationError::Required {
            field: "payment method".to_string(),
        });
    }

    if method.len() > 40 {
        return Err(ValidationError::TooLong {
            field: "payment method".to_string(),
            max: 40,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a guest count against a room capacity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed the room capacity
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  New Reservation                                                        │
/// │                                                                         │
/// │  Operator enters guests: 3     Room 101 sleeps: 2                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_guest_count(3, 2) ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       ├── count <= 0? → "guest count must be positive"                 │
/// │       │                                                                 │
/// │       ├── count > capacity? → "guest count 3 exceeds room capacity 2"  │
/// │       │                                                                 │
/// │       └── OK → Proceed with reservation                                │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_guest_count(count: i64, capacity: i64) -> ValidationResult<()> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "guest count".to_string(),
        });
    }

    if count > capacity {
        return Err(ValidationError::GuestCountExceedsCapacity {
            requested: count,
            capacity,
        });
    }

    Ok(())
}

/// Validates a room capacity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_capacity(capacity: i64) -> ValidationResult<()> {
    if capacity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }

    Ok(())
}

/// Validates an interconnected-room count for suites.
///
/// ## Rules
/// - Must be at least 1 (the suite itself counts)
pub fn validate_interconnected_rooms(count: i64) -> ValidationResult<()> {
    if count < 1 {
        return Err(ValidationError::OutOfRange {
            field: "interconnected rooms".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a nightly rate in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (comped rooms)
///
/// ## Example
/// ```rust
/// use atrium_core::validation::validate_rate_cents;
///
/// assert!(validate_rate_cents(8000).is_ok());  // $80.00
/// assert!(validate_rate_cents(0).is_ok());     // Comped
/// assert!(validate_rate_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_rate_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativeAmount {
            field: "nightly rate".to_string(),
        });
    }

    Ok(())
}

/// Validates a billing amount in cents (stay totals, service charges,
/// deposits).
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a stay's dates are in order.
///
/// ## Rules
/// - Check-out must be STRICTLY after check-in (no zero-night bookings)
///
/// ## Example
/// ```rust
/// use atrium_core::validation::validate_date_range;
/// use chrono::NaiveDate;
///
/// let jun1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let jun4 = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
///
/// assert!(validate_date_range(jun1, jun4).is_ok());
/// assert!(validate_date_range(jun1, jun1).is_err()); // same day
/// assert!(validate_date_range(jun4, jun1).is_err()); // reversed
/// ```
pub fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> ValidationResult<()> {
    if check_out <= check_in {
        return Err(ValidationError::CheckOutNotAfterCheckIn {
            check_in,
            check_out,
        });
    }

    Ok(())
}

/// Validates that a planned check-in date has not already passed.
///
/// `today` is passed in rather than read from the clock so the rule itself
/// stays deterministic under test.
pub fn validate_check_in_not_past(check_in: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if check_in < today {
        return Err(ValidationError::CheckInDateInPast { date: check_in });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_room_number() {
        assert!(validate_room_number("101").is_ok());
        assert!(validate_room_number("  201 ").is_ok());
        assert!(validate_room_number("2-A").is_ok());
        assert!(validate_room_number("").is_err());
        assert!(validate_room_number("   ").is_err());
        assert!(validate_room_number("12345678901").is_err());
        assert!(validate_room_number("1 01").is_err());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Ana García").is_ok());
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("guest@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_document_number() {
        assert!(validate_document_number("X-1234567").is_ok());
        assert!(validate_document_number("").is_err());
        assert!(validate_document_number(&"9".repeat(31)).is_err());
    }

    #[test]
    fn test_payment_method() {
        assert!(validate_payment_method("cash").is_ok());
        assert!(validate_payment_method("  visa  ").is_ok());
        assert!(validate_payment_method("").is_err());
        assert!(validate_payment_method("   ").is_err());
    }

    #[test]
    fn test_guest_count() {
        assert!(validate_guest_count(1, 2).is_ok());
        assert!(validate_guest_count(2, 2).is_ok());
        assert!(validate_guest_count(0, 2).is_err());
        assert!(validate_guest_count(-1, 2).is_err());

        let err = validate_guest_count(3, 2).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::GuestCountExceedsCapacity {
                requested: 3,
                capacity: 2
            }
        ));
    }

    #[test]
    fn test_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(-4).is_err());
    }

    #[test]
    fn test_interconnected_rooms() {
        assert!(validate_interconnected_rooms(1).is_ok());
        assert!(validate_interconnected_rooms(3).is_ok());
        assert!(validate_interconnected_rooms(0).is_err());
    }

    #[test]
    fn test_rate_and_amounts() {
        assert!(validate_rate_cents(0).is_ok());
        assert!(validate_rate_cents(8000).is_ok());
        assert!(validate_rate_cents(-1).is_err());

        assert!(validate_amount_cents("services total", 3550).is_ok());
        assert!(validate_amount_cents("services total", 0).is_ok());
        let err = validate_amount_cents("services total", -1).unwrap_err();
        assert_eq!(err.to_string(), "services total must not be negative");
    }

    #[test]
    fn test_date_range() {
        assert!(validate_date_range(date(2025, 6, 1), date(2025, 6, 4)).is_ok());
        assert!(validate_date_range(date(2025, 6, 1), date(2025, 6, 1)).is_err());
        assert!(validate_date_range(date(2025, 6, 4), date(2025, 6, 1)).is_err());
    }

    #[test]
    fn test_check_in_not_past() {
        let today = date(2025, 6, 1);
        assert!(validate_check_in_not_past(date(2025, 6, 1), today).is_ok());
        assert!(validate_check_in_not_past(date(2025, 6, 2), today).is_ok());
        assert!(validate_check_in_not_past(date(2025, 5, 31), today).is_err());
    }
}
