//! # Check-In Register
//!
//! The guest roster opened when a stay begins.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Check-In Register                            │
//! │                                                                     │
//! │   Reservation (IN_PROGRESS)                                         │
//! │        │                                                            │
//! │        ▼  open()                                                    │
//! │   ┌──────────────────────────────────────────────┐                  │
//! │   │ CheckIn            status: ACTIVE            │                  │
//! │   │   capacity ceiling (from the reservation)    │                  │
//! │   │   roster:  [titular guest, guest, guest...]  │                  │
//! │   │   deposit, notes                             │                  │
//! │   └──────────────────────────────────────────────┘                  │
//! │        │ add_guest()  - at most ONE titular                         │
//! │        │              - refused once the roster hits the ceiling    │
//! │        ▼                                                            │
//! │   finalize() ──► FINALIZED      cancel() ──► CANCELLED              │
//! │   (both close the register; a closed register rejects all edits)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CapacityError, CoreResult, StateError, ValidationError};
use crate::reservation::Reservation;
use crate::types::{CheckInStatus, Guest, ReservationStatus};
use crate::validation::validate_amount_cents;

// =============================================================================
// CheckIn
// =============================================================================

/// The register kept for one reservation's stay.
///
/// ## Invariants
/// - at most one roster entry has `titular == true`
/// - `roster_size() <= capacity` at all times
/// - every mutation requires `status == Active`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Reservation this register belongs to (one register per reservation).
    pub reservation_id: String,

    /// Room occupied during the stay.
    pub room_number: String,

    /// When the register was opened.
    pub entered_at: DateTime<Utc>,

    /// When the party is expected to leave.
    pub expected_departure: DateTime<Utc>,

    /// Deposit taken at the desk, in cents.
    pub deposit_cents: Option<i64>,

    /// Registered guests, in registration order.
    pub guests: Vec<Guest>,

    /// Free-form desk notes.
    pub notes: Option<String>,

    /// Register state.
    pub status: CheckInStatus,

    /// Maximum roster size.
    pub capacity: i64,

    /// Whether a titular guest is already on the roster.
    pub titular_registered: bool,
}

impl CheckIn {
    /// Opens the register for a stay that has begun.
    ///
    /// The reservation must be IN_PROGRESS. The roster ceiling is taken from
    /// the reservation's capacity snapshot and the expected departure from
    /// its check-out date.
    pub fn open(reservation: &Reservation) -> CoreResult<Self> {
        if reservation.status != ReservationStatus::InProgress {
            return Err(StateError::NotInProgress {
                current: reservation.status,
            }
            .into());
        }

        Ok(CheckIn {
            id: Uuid::new_v4().to_string(),
            reservation_id: reservation.id.clone(),
            room_number: reservation.room_number.clone(),
            entered_at: Utc::now(),
            expected_departure: reservation.check_out_date.and_time(NaiveTime::MIN).and_utc(),
            deposit_cents: None,
            guests: Vec::new(),
            notes: None,
            status: CheckInStatus::Active,
            capacity: reservation.room_capacity,
            titular_registered: false,
        })
    }

    /// Opens a free-standing register with no roster ceiling.
    ///
    /// Used for walk-in flows where no reservation snapshot exists yet;
    /// `set_capacity` installs a real ceiling later.
    pub fn new(reservation_id: impl Into<String>, room_number: impl Into<String>) -> Self {
        CheckIn {
            id: Uuid::new_v4().to_string(),
            reservation_id: reservation_id.into(),
            room_number: room_number.into(),
            entered_at: Utc::now(),
            expected_departure: Utc::now(),
            deposit_cents: None,
            guests: Vec::new(),
            notes: None,
            status: CheckInStatus::Active,
            capacity: i64::MAX,
            titular_registered: false,
        }
    }

    /// Number of guests on the roster.
    #[inline]
    pub fn roster_size(&self) -> usize {
        self.guests.len()
    }

    /// The titular guest, if one is registered.
    pub fn titular(&self) -> Option<&Guest> {
        self.guests.iter().find(|guest| guest.titular)
    }

    fn ensure_active(&self) -> CoreResult<()> {
        if self.status != CheckInStatus::Active {
            return Err(StateError::RegisterNotActive {
                current: self.status,
            }
            .into());
        }
        Ok(())
    }

    // =========================================================================
    // Roster
    // =========================================================================

    /// Adds a guest and returns the new roster size.
    ///
    /// ## Rules
    /// - the register must still be ACTIVE
    /// - refused when the roster is at capacity
    /// - refused when the guest is titular and one is already registered
    pub fn add_guest(&mut self, guest: Guest) -> CoreResult<usize> {
        self.ensure_active()?;

        let registered = self.guests.len() as i64;
        if registered >= self.capacity {
            return Err(CapacityError {
                registered,
                capacity: self.capacity,
            }
            .into());
        }
        if guest.titular && self.titular_registered {
            return Err(StateError::TitularAlreadyRegistered.into());
        }

        if guest.titular {
            self.titular_registered = true;
        }
        self.guests.push(guest);
        Ok(self.guests.len())
    }

    // =========================================================================
    // Amendments
    // =========================================================================

    /// Changes the roster ceiling.
    ///
    /// Refused when non-positive or below the number of guests already
    /// registered; shrinking never evicts anyone.
    pub fn set_capacity(&mut self, capacity: i64) -> CoreResult<()> {
        self.ensure_active()?;
        if capacity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "capacity".to_string(),
            }
            .into());
        }
        let registered = self.guests.len() as i64;
        if capacity < registered {
            return Err(StateError::CapacityBelowRoster {
                requested: capacity,
                registered,
            }
            .into());
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Records the deposit taken at the desk.
    pub fn set_deposit(&mut self, cents: i64) -> CoreResult<()> {
        self.ensure_active()?;
        validate_amount_cents("deposit", cents)?;
        self.deposit_cents = Some(cents);
        Ok(())
    }

    /// Replaces the desk notes.
    pub fn set_notes(&mut self, notes: Option<String>) -> CoreResult<()> {
        self.ensure_active()?;
        self.notes = notes;
        Ok(())
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// ACTIVE → FINALIZED. The roster is frozen afterwards.
    pub fn finalize(&mut self) -> CoreResult<()> {
        self.ensure_active()?;
        self.status = CheckInStatus::Finalized;
        Ok(())
    }

    /// ACTIVE → CANCELLED. Used when a register was opened by mistake.
    pub fn cancel(&mut self) -> CoreResult<()> {
        self.ensure_active()?;
        self.status = CheckInStatus::Cancelled;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
