//! # Error Types
//!
//! Domain-specific error types for atrium-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atrium-core errors (this file)                                        │
//! │  ├── ValidationError  - Malformed or out-of-range input                │
//! │  ├── StateError       - Operation vs. lifecycle state conflicts        │
//! │  ├── CapacityError    - Roster full (a state conflict, but callers     │
//! │  │                      want to say "room full" specifically)          │
//! │  └── CoreError        - Umbrella over the three kinds                  │
//! │                                                                         │
//! │  atrium-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Front-desk errors (in app)                                            │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: Validation/State/Capacity → CoreError → AppError → Operator     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (room number, counts, dates)
//! 3. Errors are enum variants, never String
//! 4. Every violation is detected before any mutation; no operation is
//!    best-effort

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{CheckInStatus, ReservationStatus};

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before any lifecycle logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Monetary amount must not be negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable date or amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Requested guest count does not fit the room.
    ///
    /// ## When This Occurs
    /// - Creating a reservation for more guests than the room sleeps
    /// - `set_guest_count` above the capacity snapshot
    /// - `set_room` to a room smaller than the current party
    #[error("guest count {requested} exceeds room capacity {capacity}")]
    GuestCountExceedsCapacity { requested: i64, capacity: i64 },

    /// The planned check-in date is already in the past.
    #[error("check-in date {date} is before today")]
    CheckInDateInPast { date: NaiveDate },

    /// Stay dates are not in order.
    ///
    /// Check-out must be strictly after check-in; a zero-night booking is
    /// rejected at creation (same-day departures only arise when a stay
    /// ends early).
    #[error("check-out date {check_out} must be after check-in date {check_in}")]
    CheckOutNotAfterCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// Duplicate value (e.g., duplicate customer email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// State Error
// =============================================================================

/// Lifecycle conflicts: the operation is well-formed but the aggregate is in
/// the wrong state for it.
///
/// ## When This Occurs
/// - Confirming a reservation that is not PENDING
/// - Cancelling a stay that already started
/// - Opening a second check-in register for the same reservation
/// - Settling a ledger twice
#[derive(Debug, Error)]
pub enum StateError {
    /// Only PENDING reservations can be confirmed.
    #[error("reservation is {current:?}, only pending reservations can be confirmed")]
    NotPending { current: ReservationStatus },

    /// Only CONFIRMED reservations can begin their stay.
    #[error("reservation is {current:?}, only confirmed reservations can begin a stay")]
    NotConfirmed { current: ReservationStatus },

    /// The operation needs a stay in progress.
    #[error("reservation is {current:?}, expected a stay in progress")]
    NotInProgress { current: ReservationStatus },

    /// Cancellation is only allowed before the stay starts.
    #[error("reservation is {current:?} and can no longer be cancelled")]
    CancellationRefused { current: ReservationStatus },

    /// A check-in register already exists for this reservation.
    #[error("a check-in register is already open for reservation {reservation_id}")]
    RegisterAlreadyOpen { reservation_id: String },

    /// The roster already has a titular guest.
    #[error("the roster already has a titular guest")]
    TitularAlreadyRegistered,

    /// Capacity ceiling cannot drop below the current roster.
    #[error("capacity {requested} is below the {registered} guests already registered")]
    CapacityBelowRoster { requested: i64, registered: i64 },

    /// Register transitions require an active register.
    #[error("check-in register is {current:?}, expected active")]
    RegisterNotActive { current: CheckInStatus },

    /// The check-out ledger was already settled; settled records are
    /// immutable.
    #[error("check-out is already settled")]
    AlreadySettled,
}

// =============================================================================
// Capacity Error
// =============================================================================

/// The check-in roster is full.
///
/// Strictly speaking this is a state conflict (the roster's state refuses the
/// operation), but front-office flows want to tell the operator "room full"
/// rather than a generic conflict, so it is its own kind.
/// [`CoreError::is_state`] still answers `true` for it.
#[derive(Debug, Error)]
#[error("roster is full: {registered} of {capacity} guests already registered")]
pub struct CapacityError {
    pub registered: i64,
    pub capacity: i64,
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for all domain operations.
///
/// Every fallible operation in atrium-core returns [`CoreResult`], and the
/// three kinds convert in via `#[from]` so call sites just use `?`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation incompatible with the current lifecycle state.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Roster full.
    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),
}

impl CoreError {
    /// Is this a validation failure?
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Is this a lifecycle conflict? Capacity errors count: they are a
    /// specialization of the state family.
    #[inline]
    pub fn is_state(&self) -> bool {
        matches!(self, CoreError::State(_) | CoreError::Capacity(_))
    }

    /// Is this specifically a full roster?
    #[inline]
    pub fn is_capacity(&self) -> bool {
        matches!(self, CoreError::Capacity(_))
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
