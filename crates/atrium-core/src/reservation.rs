//! # Reservation Lifecycle
//!
//! The reservation aggregate: a stay booked by a customer for a room, moving
//! through a constrained state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reservation States                                  │
//! │                                                                         │
//! │   create()                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │   PENDING ──confirm()──► CONFIRMED ──begin_stay()──► IN_PROGRESS       │
//! │      │                       │                            │             │
//! │      │                       │                        end_stay()        │
//! │      └───────cancel()────────┘                            │             │
//! │                  │                                        ▼             │
//! │                  ▼                                    COMPLETED         │
//! │              CANCELLED                                                  │
//! │                                                                         │
//! │   NO_SHOW exists as a state but nothing transitions into it.            │
//! │                                                                         │
//! │   Wrong-state attempts are StateErrors and mutate NOTHING.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The reservation freezes the room's nightly rate and capacity at booking
//! time. Re-pricing a room later never changes existing bookings; capacity
//! checks keep using the number the guest was promised.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreResult, StateError};
use crate::money::Money;
use crate::pricing::{nights_between, stay_cost};
use crate::types::{Customer, ReservationStatus, Room};
use crate::validation::{validate_check_in_not_past, validate_date_range, validate_guest_count};

/// Appended to the notes when a cancellation has no stated reason.
const UNSPECIFIED_CANCEL_REASON: &str = "no reason given";

// =============================================================================
// Reservation
// =============================================================================

/// A booked stay.
///
/// ## Invariants
/// - `check_out_date` strictly after `check_in_date` at creation
///   (`end_stay` may collapse them for a same-day departure)
/// - `1 <= guest_count <= room_capacity` (the snapshot, not the live room)
/// - `total_cents = nightly_rate_cents × nights` - the PLAIN rate; suite
///   surcharges live in price quotes, never in this total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer who booked (owns the reservation).
    pub customer_id: String,

    /// Room number booked.
    pub room_number: String,

    /// Nightly rate in cents at booking time (frozen).
    pub nightly_rate_cents: i64,

    /// Room capacity at booking time (frozen).
    pub room_capacity: i64,

    /// Planned arrival; reset to the actual date by `begin_stay`.
    pub check_in_date: NaiveDate,

    /// Planned departure; reset to the actual date by `end_stay`.
    pub check_out_date: NaiveDate,

    /// Size of the party.
    pub guest_count: i64,

    /// Lifecycle state.
    pub status: ReservationStatus,

    /// Stay total in cents: nightly rate × nights.
    pub total_cents: i64,

    /// When the reservation was taken.
    pub created_on: NaiveDate,

    /// Free-form notes; cancellation reasons are appended here.
    pub notes: String,
}

impl Reservation {
    /// Creates a PENDING reservation.
    ///
    /// ## Validation (all before any construction)
    /// - check-in date not before today
    /// - check-out strictly after check-in
    /// - guest count >= 1 and <= the room's capacity
    ///
    /// ## Example
    /// ```rust,no_run
    /// use atrium_core::reservation::Reservation;
    /// use atrium_core::types::{Customer, Room, StandardFeatures};
    /// use chrono::{Days, Utc};
    ///
    /// let customer = Customer::new("Ana García", "ana@example.com", None, None).unwrap();
    /// let room = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
    ///
    /// let today = Utc::now().date_naive();
    /// let reservation = Reservation::new(
    ///     &customer,
    ///     &room,
    ///     today + Days::new(10),
    ///     today + Days::new(13),
    ///     2,
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(reservation.total_cents, 24000); // 3 nights × $80.00
    /// ```
    pub fn new(
        customer: &Customer,
        room: &Room,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        guest_count: i64,
        notes: Option<String>,
    ) -> CoreResult<Self> {
        let today = Utc::now().date_naive();
        validate_check_in_not_past(check_in_date, today)?;
        validate_date_range(check_in_date, check_out_date)?;
        validate_guest_count(guest_count, room.max_capacity)?;

        let mut reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            room_number: room.number.clone(),
            nightly_rate_cents: room.nightly_rate_cents,
            room_capacity: room.max_capacity,
            check_in_date,
            check_out_date,
            guest_count,
            status: ReservationStatus::Pending,
            total_cents: 0,
            created_on: today,
            notes: notes.unwrap_or_default(),
        };
        reservation.recompute_total();
        Ok(reservation)
    }

    /// Whole nights between the current check-in and check-out dates.
    #[inline]
    pub fn nights(&self) -> i64 {
        nights_between(self.check_in_date, self.check_out_date)
    }

    /// The frozen nightly rate as Money.
    #[inline]
    pub fn nightly_rate(&self) -> Money {
        Money::from_cents(self.nightly_rate_cents)
    }

    /// The stay total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Recomputes `total_cents` from the rate snapshot and current dates.
    fn recompute_total(&mut self) {
        self.total_cents = stay_cost(
            self.nightly_rate(),
            self.check_in_date,
            self.check_out_date,
        )
        .cents();
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// PENDING → CONFIRMED.
    pub fn confirm(&mut self) -> CoreResult<()> {
        if self.status != ReservationStatus::Pending {
            return Err(StateError::NotPending {
                current: self.status,
            }
            .into());
        }
        self.status = ReservationStatus::Confirmed;
        Ok(())
    }

    /// PENDING/CONFIRMED → CANCELLED.
    ///
    /// ## Behavior
    /// Refused once the stay has started (IN_PROGRESS), after it ended
    /// (COMPLETED), and when already CANCELLED. The reason is appended to the
    /// notes; a missing or blank reason records a fixed placeholder.
    pub fn cancel(&mut self, reason: Option<&str>) -> CoreResult<()> {
        match self.status {
            ReservationStatus::Pending | ReservationStatus::Confirmed => {}
            current => return Err(StateError::CancellationRefused { current }.into()),
        }

        let reason = match reason.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => UNSPECIFIED_CANCEL_REASON,
        };
        self.status = ReservationStatus::Cancelled;
        self.notes.push_str(&format!("\nCancelled: {reason}"));
        Ok(())
    }

    /// CONFIRMED → IN_PROGRESS.
    ///
    /// ## Behavior
    /// The check-in date is reset to today: the stay is billed from actual
    /// arrival, not the planned date.
    pub fn begin_stay(&mut self) -> CoreResult<()> {
        if self.status != ReservationStatus::Confirmed {
            return Err(StateError::NotConfirmed {
                current: self.status,
            }
            .into());
        }
        self.check_in_date = Utc::now().date_naive();
        self.status = ReservationStatus::InProgress;
        Ok(())
    }

    /// IN_PROGRESS → COMPLETED.
    ///
    /// ## Behavior
    /// The check-out date is reset to today and the total recomputed for the
    /// actual dates. A same-day departure recomputes to zero nights and a
    /// zero total.
    pub fn end_stay(&mut self) -> CoreResult<()> {
        if self.status != ReservationStatus::InProgress {
            return Err(StateError::NotInProgress {
                current: self.status,
            }
            .into());
        }
        self.check_out_date = Utc::now().date_naive();
        self.status = ReservationStatus::Completed;
        self.recompute_total();
        Ok(())
    }

    // =========================================================================
    // Amendments
    // =========================================================================

    /// Changes the party size, re-checked against the capacity snapshot.
    pub fn set_guest_count(&mut self, count: i64) -> CoreResult<()> {
        validate_guest_count(count, self.room_capacity)?;
        self.guest_count = count;
        Ok(())
    }

    /// Moves the planned arrival. Ordering against the current check-out is
    /// re-validated and the total recomputed.
    pub fn set_check_in_date(&mut self, date: NaiveDate) -> CoreResult<()> {
        validate_date_range(date, self.check_out_date)?;
        self.check_in_date = date;
        self.recompute_total();
        Ok(())
    }

    /// Moves the planned departure. Ordering against the current check-in is
    /// re-validated and the total recomputed.
    pub fn set_check_out_date(&mut self, date: NaiveDate) -> CoreResult<()> {
        validate_date_range(self.check_in_date, date)?;
        self.check_out_date = date;
        self.recompute_total();
        Ok(())
    }

    /// Moves the booking to another room.
    ///
    /// ## Behavior
    /// The party must fit the new room. On success the rate and capacity are
    /// re-snapshotted from it and the total recomputed at the new rate.
    pub fn set_room(&mut self, room: &Room) -> CoreResult<()> {
        validate_guest_count(self.guest_count, room.max_capacity)?;
        self.room_number = room.number.clone();
        self.nightly_rate_cents = room.nightly_rate_cents;
        self.room_capacity = room.max_capacity;
        self.recompute_total();
        Ok(())
    }

    /// Replaces the free-form notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::pricing::base_price;
    use crate::types::{StandardFeatures, SuiteFeatures};
    use chrono::Days;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn future(days: u64) -> NaiveDate {
        today() + Days::new(days)
    }

    fn test_customer() -> Customer {
        Customer::new("Ana García", "ana@example.com", None, None).unwrap()
    }

    fn test_room() -> Room {
        Room::standard(
            "101",
            8000,
            2,
            "Standard double",
            StandardFeatures {
                exterior_view: true,
                air_conditioning: true,
                heating: true,
            },
        )
        .unwrap()
    }

    fn booked() -> Reservation {
        Reservation::new(
            &test_customer(),
            &test_room(),
            future(10),
            future(13),
            2,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_create_pending_with_rate_times_nights() {
        let reservation = booked();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.nights(), 3);
        assert_eq!(reservation.total_cents, 24000); // 3 × $80.00
        assert_eq!(reservation.created_on, today());
        // Snapshots frozen from the room
        assert_eq!(reservation.nightly_rate_cents, 8000);
        assert_eq!(reservation.room_capacity, 2);
    }

    #[test]
    fn test_create_rejects_past_check_in() {
        let yesterday = today().pred_opt().unwrap();
        let err = Reservation::new(
            &test_customer(),
            &test_room(),
            yesterday,
            future(2),
            2,
            None,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_bad_date_order() {
        // Same-day booking
        let err =
            Reservation::new(&test_customer(), &test_room(), future(5), future(5), 2, None)
                .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::CheckOutNotAfterCheckIn { .. })
        ));

        // Reversed
        assert!(
            Reservation::new(&test_customer(), &test_room(), future(5), future(3), 2, None)
                .is_err()
        );
    }

    #[test]
    fn test_create_guest_count_bounds() {
        let customer = test_customer();
        let room = test_room(); // sleeps 2

        assert!(Reservation::new(&customer, &room, future(1), future(2), 0, None).is_err());
        assert!(Reservation::new(&customer, &room, future(1), future(2), 3, None).is_err());
        // Exactly at capacity is fine
        assert!(Reservation::new(&customer, &room, future(1), future(2), 2, None).is_ok());
    }

    #[test]
    fn test_confirm_only_from_pending() {
        let mut reservation = booked();
        reservation.confirm().unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);

        let err = reservation.confirm().unwrap_err();
        assert!(err.is_state());
        // Failed transition mutated nothing
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_cancel_appends_reason() {
        let mut reservation = booked();
        reservation.set_notes("booked by phone");
        reservation.cancel(Some("flight cancelled")).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Cancelled);
        assert_eq!(reservation.notes, "booked by phone\nCancelled: flight cancelled");
    }

    #[test]
    fn test_cancel_without_reason_records_placeholder() {
        let mut reservation = booked();
        reservation.cancel(None).unwrap();
        assert!(reservation.notes.ends_with("Cancelled: no reason given"));

        let mut reservation = booked();
        reservation.cancel(Some("   ")).unwrap();
        assert!(reservation.notes.ends_with("Cancelled: no reason given"));
    }

    #[test]
    fn test_cancel_from_confirmed_is_allowed() {
        let mut reservation = booked();
        reservation.confirm().unwrap();
        assert!(reservation.cancel(Some("overbooked")).is_ok());
    }

    #[test]
    fn test_cancel_refused_once_stay_started() {
        let mut reservation = booked();
        reservation.confirm().unwrap();
        reservation.begin_stay().unwrap();

        let err = reservation.cancel(Some("too late")).unwrap_err();
        assert!(err.is_state());
        assert_eq!(reservation.status, ReservationStatus::InProgress);
        // The refused cancel left no trace in the notes
        assert!(!reservation.notes.contains("Cancelled"));
    }

    #[test]
    fn test_cancel_twice_refused() {
        let mut reservation = booked();
        reservation.cancel(None).unwrap();
        assert!(reservation.cancel(None).is_err());
    }

    #[test]
    fn test_begin_stay_requires_confirmed_and_resets_arrival() {
        let mut reservation = booked();

        // Straight from PENDING is refused
        assert!(reservation.begin_stay().is_err());
        assert_eq!(reservation.status, ReservationStatus::Pending);

        reservation.confirm().unwrap();
        reservation.begin_stay().unwrap();

        assert_eq!(reservation.status, ReservationStatus::InProgress);
        // Billed from actual arrival, not the planned date
        assert_eq!(reservation.check_in_date, today());
    }

    #[test]
    fn test_end_stay_recomputes_for_actual_departure() {
        let mut reservation = booked();
        reservation.confirm().unwrap();
        reservation.begin_stay().unwrap();

        // Pretend the guest arrived two nights ago
        reservation.check_in_date = today() - Days::new(2);

        reservation.end_stay().unwrap();
        assert_eq!(reservation.status, ReservationStatus::Completed);
        assert_eq!(reservation.check_out_date, today());
        assert_eq!(reservation.total_cents, 16000); // 2 nights × $80.00
    }

    #[test]
    fn test_same_day_departure_totals_zero() {
        let mut reservation = booked();
        reservation.confirm().unwrap();
        reservation.begin_stay().unwrap();
        reservation.end_stay().unwrap();

        assert_eq!(reservation.nights(), 0);
        assert_eq!(reservation.total_cents, 0);
    }

    #[test]
    fn test_end_stay_requires_stay_in_progress() {
        let mut reservation = booked();
        assert!(reservation.end_stay().is_err());

        reservation.confirm().unwrap();
        assert!(reservation.end_stay().is_err());
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_set_guest_count_checks_snapshot_capacity() {
        let mut reservation = booked();

        reservation.set_guest_count(1).unwrap();
        assert_eq!(reservation.guest_count, 1);

        assert!(reservation.set_guest_count(0).is_err());
        assert!(reservation.set_guest_count(3).is_err());
        assert_eq!(reservation.guest_count, 1);
    }

    #[test]
    fn test_date_setters_revalidate_and_recompute() {
        let mut reservation = booked(); // 10 → 13, $240.00

        reservation.set_check_out_date(future(12)).unwrap();
        assert_eq!(reservation.total_cents, 16000); // now 2 nights

        reservation.set_check_in_date(future(11)).unwrap();
        assert_eq!(reservation.total_cents, 8000); // now 1 night

        // Would invert the range
        assert!(reservation.set_check_in_date(future(12)).is_err());
        assert!(reservation.set_check_out_date(future(11)).is_err());
        assert_eq!(reservation.total_cents, 8000);
    }

    #[test]
    fn test_set_room_resnapshots_and_reprices() {
        let mut reservation = booked(); // room 101, $80.00, sleeps 2

        let bigger = Room::standard("105", 9500, 4, "", StandardFeatures::default()).unwrap();
        reservation.set_room(&bigger).unwrap();

        assert_eq!(reservation.room_number, "105");
        assert_eq!(reservation.nightly_rate_cents, 9500);
        assert_eq!(reservation.room_capacity, 4);
        assert_eq!(reservation.total_cents, 28500); // 3 nights × $95.00
    }

    #[test]
    fn test_set_room_refuses_room_too_small() {
        let mut reservation = booked(); // party of 2

        let single = Room::standard("102", 6000, 1, "", StandardFeatures::default()).unwrap();
        let err = reservation.set_room(&single).unwrap_err();
        assert!(err.is_validation());
        // Snapshot untouched
        assert_eq!(reservation.room_number, "101");
        assert_eq!(reservation.nightly_rate_cents, 8000);
    }

    #[test]
    fn test_suite_surcharges_stay_out_of_reservation_total() {
        let suite = Room::suite(
            "201",
            15000,
            4,
            "Executive suite",
            SuiteFeatures {
                jacuzzi: true,
                minibar: true,
                room_service: true,
                interconnected_rooms: 2,
            },
        )
        .unwrap();

        let reservation =
            Reservation::new(&test_customer(), &suite, future(10), future(12), 2, None).unwrap();

        // The quote carries +$120.00 of surcharges...
        assert_eq!(base_price(&suite).cents(), 15000 + 12000);
        // ...but the booked total is the plain rate × nights
        assert_eq!(reservation.total_cents, 30000);
    }

    #[test]
    fn test_no_show_never_produced() {
        // Walk the longest path and both cancel paths; NO_SHOW must not appear
        let mut full = booked();
        assert_ne!(full.status, ReservationStatus::NoShow);
        full.confirm().unwrap();
        assert_ne!(full.status, ReservationStatus::NoShow);
        full.begin_stay().unwrap();
        assert_ne!(full.status, ReservationStatus::NoShow);
        full.end_stay().unwrap();
        assert_ne!(full.status, ReservationStatus::NoShow);

        let mut early = booked();
        early.cancel(None).unwrap();
        assert_ne!(early.status, ReservationStatus::NoShow);

        let mut late = booked();
        late.confirm().unwrap();
        late.cancel(None).unwrap();
        assert_ne!(late.status, ReservationStatus::NoShow);
    }
}
