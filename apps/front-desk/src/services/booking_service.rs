//! # Booking Service
//!
//! Reservation lifecycle orchestration: rooms, bookings, check-in registers
//! and check-out ledgers.
//!
//! ## Lifecycle Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reservation Lifecycle                                │
//! │                                                                         │
//! │  create_reservation          PENDING      (room marked occupied)        │
//! │         │                                                               │
//! │  confirm_reservation         CONFIRMED                                  │
//! │         │                                                               │
//! │  check_in                    IN_PROGRESS  (register opened, titular     │
//! │         │                                  on the roster, deposit)      │
//! │  add_guest (repeatable)      IN_PROGRESS  (roster grows, guest count    │
//! │         │                                  follows)                     │
//! │  settle_check_out            COMPLETED    (ledger settled, stay total   │
//! │                                            recomputed for the actual    │
//! │                                            departure, room freed)       │
//! │                                                                         │
//! │  cancel_reservation works from PENDING or CONFIRMED and frees the room  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Core aggregates are plain mutable state. Every state-transition or ledger
//! operation runs under a per-reservation async mutex so two terminals
//! hammering the same reservation serialize instead of interleaving their
//! load-mutate-store cycles. Compound operations validate every precondition
//! before the first persisted mutation, so a refused operation leaves no
//! trace.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};

use atrium_core::types::{Customer, Guest, ReservationStatus, Room};
use atrium_core::validation::{validate_amount_cents, validate_payment_method};
use atrium_core::{CheckIn, CheckOut, CoreError, Money, Reservation, StateError, ValidationError};
use atrium_db::Database;

use crate::dto::{
    CheckInDto, CheckOutDto, NewGuestRequest, NewReservationRequest, ReservationDto, RoomDto,
    SettlementSummary, UpdateReservationRequest,
};
use crate::error::{AppError, AppResult};

/// Reservation, check-in and check-out orchestration.
#[derive(Debug, Clone)]
pub struct BookingService {
    db: Database,
    /// One async mutex per reservation id, created on first use.
    locks: Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl BookingService {
    /// Creates a new booking service over the shared database handle.
    pub fn new(db: Database) -> Self {
        BookingService {
            db,
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Returns the mutex guarding a reservation, creating it on first use.
    ///
    /// The registry lock is a std mutex held only for the map access; the
    /// returned tokio mutex is what operations hold across awaits.
    fn reservation_lock(&self, reservation_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("Lock registry mutex poisoned");
        locks
            .entry(reservation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // =========================================================================
    // Room catalog
    // =========================================================================

    /// Registers a new room in the inventory.
    ///
    /// The room arrives already built (and therefore validated) through
    /// [`Room::standard`] or [`Room::suite`].
    pub async fn register_room(&self, room: Room) -> AppResult<RoomDto> {
        self.db.rooms().insert(&room).await?;
        info!(number = %room.number, room_type = ?room.room_type(), "room registered");
        Ok(RoomDto::from(&room))
    }

    /// Gets a room by number, with its quoted base price.
    pub async fn get_room(&self, number: &str) -> AppResult<RoomDto> {
        let room = self
            .db
            .rooms()
            .get(number)
            .await?
            .ok_or_else(|| AppError::not_found("Room", number))?;
        Ok(RoomDto::from(&room))
    }

    /// Lists the whole room inventory.
    pub async fn list_rooms(&self) -> AppResult<Vec<RoomDto>> {
        let rooms = self.db.rooms().list().await?;
        Ok(rooms.iter().map(RoomDto::from).collect())
    }

    /// Lists rooms currently free to book.
    pub async fn list_available_rooms(&self) -> AppResult<Vec<RoomDto>> {
        let rooms = self.db.rooms().list_available().await?;
        Ok(rooms.iter().map(RoomDto::from).collect())
    }

    /// Lists free rooms that sleep a party of the given size.
    pub async fn rooms_for_party(&self, guests: i64) -> AppResult<Vec<RoomDto>> {
        let rooms = self.db.rooms().list_with_capacity(guests).await?;
        Ok(rooms.iter().map(RoomDto::from).collect())
    }

    // =========================================================================
    // Reservations
    // =========================================================================

    /// Creates a reservation and marks the room occupied.
    ///
    /// ## Preconditions
    /// - Customer exists and is active
    /// - Room exists, is available, and has no overlapping live reservation
    /// - Dates and guest count pass domain validation
    pub async fn create_reservation(
        &self,
        request: NewReservationRequest,
    ) -> AppResult<ReservationDto> {
        debug!(
            customer_id = %request.customer_id,
            room = %request.room_number,
            from = %request.check_in_date,
            to = %request.check_out_date,
            "create reservation"
        );

        let customer = self
            .db
            .customers()
            .get_by_id(&request.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", &request.customer_id))?;
        if !customer.active {
            return Err(AppError::validation(format!(
                "customer '{}' is inactive",
                customer.full_name
            )));
        }

        let room = self
            .db
            .rooms()
            .get(&request.room_number)
            .await?
            .ok_or_else(|| AppError::not_found("Room", &request.room_number))?;
        if !room.available {
            return Err(AppError::room_unavailable(format!(
                "room {} is currently occupied or reserved",
                room.number
            )));
        }

        let clashes = self
            .db
            .reservations()
            .list_overlapping(&room.number, request.check_in_date, request.check_out_date)
            .await?;
        if !clashes.is_empty() {
            return Err(AppError::room_unavailable(format!(
                "room {} already has a reservation between {} and {}",
                room.number, request.check_in_date, request.check_out_date
            )));
        }

        let reservation = Reservation::new(
            &customer,
            &room,
            request.check_in_date,
            request.check_out_date,
            request.guest_count,
            request.notes,
        )?;

        self.db.reservations().insert(&reservation).await?;
        self.db.rooms().set_available(&room.number, false).await?;

        info!(
            id = %reservation.id,
            room = %reservation.room_number,
            nights = reservation.nights(),
            total = %reservation.total(),
            "reservation created"
        );
        Ok(ReservationDto::from(&reservation))
    }

    /// Gets a reservation by id.
    pub async fn get_reservation(&self, id: &str) -> AppResult<ReservationDto> {
        let reservation = self.load_reservation(id).await?;
        Ok(ReservationDto::from(&reservation))
    }

    /// Lists every reservation, newest stay first.
    pub async fn list_reservations(&self) -> AppResult<Vec<ReservationDto>> {
        let reservations = self.db.reservations().list().await?;
        Ok(reservations.iter().map(ReservationDto::from).collect())
    }

    /// Lists a customer's reservations.
    pub async fn list_by_customer(&self, customer_id: &str) -> AppResult<Vec<ReservationDto>> {
        let reservations = self.db.reservations().list_by_customer(customer_id).await?;
        Ok(reservations.iter().map(ReservationDto::from).collect())
    }

    /// Lists a room's reservations.
    pub async fn list_by_room(&self, room_number: &str) -> AppResult<Vec<ReservationDto>> {
        let reservations = self.db.reservations().list_by_room(room_number).await?;
        Ok(reservations.iter().map(ReservationDto::from).collect())
    }

    /// Lists reservations whose stay touches the given window.
    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ReservationDto>> {
        let reservations = self.db.reservations().list_between(from, to).await?;
        Ok(reservations.iter().map(ReservationDto::from).collect())
    }

    /// Whether a room's date window is clear of live reservations.
    ///
    /// This answers the date question only; the room's coarse availability
    /// flag is a separate check at creation time.
    pub async fn check_availability(
        &self,
        room_number: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<bool> {
        if self.db.rooms().get(room_number).await?.is_none() {
            return Err(AppError::not_found("Room", room_number));
        }
        let clashes = self
            .db
            .reservations()
            .list_overlapping(room_number, from, to)
            .await?;
        Ok(clashes.is_empty())
    }

    /// Confirms a pending reservation.
    pub async fn confirm_reservation(&self, id: &str) -> AppResult<ReservationDto> {
        let lock = self.reservation_lock(id);
        let _guard = lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;
        reservation.confirm()?;
        self.db.reservations().update(&reservation).await?;

        info!(id = %reservation.id, "reservation confirmed");
        Ok(ReservationDto::from(&reservation))
    }

    /// Cancels a reservation and frees the room.
    ///
    /// Allowed from PENDING or CONFIRMED. The reason (or a placeholder) is
    /// appended to the reservation notes.
    pub async fn cancel_reservation(
        &self,
        id: &str,
        reason: Option<&str>,
    ) -> AppResult<ReservationDto> {
        let lock = self.reservation_lock(id);
        let _guard = lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;
        reservation.cancel(reason)?;
        self.db.reservations().update(&reservation).await?;
        self.db
            .rooms()
            .set_available(&reservation.room_number, true)
            .await?;

        info!(id = %reservation.id, room = %reservation.room_number, "reservation cancelled");
        Ok(ReservationDto::from(&reservation))
    }

    /// Applies a partial update to a reservation that has not started.
    ///
    /// Dates, guest count and notes go through the core setters so totals
    /// stay consistent with the stay window.
    pub async fn update_reservation(
        &self,
        id: &str,
        request: UpdateReservationRequest,
    ) -> AppResult<ReservationDto> {
        let lock = self.reservation_lock(id);
        let _guard = lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;
        Self::ensure_editable(&reservation)?;

        match (request.check_in_date, request.check_out_date) {
            (Some(check_in), Some(check_out)) => {
                // Apply in an order that keeps the intermediate window valid
                // when the whole stay shifts forward or backward.
                if check_in >= reservation.check_out_date {
                    reservation.set_check_out_date(check_out)?;
                    reservation.set_check_in_date(check_in)?;
                } else {
                    reservation.set_check_in_date(check_in)?;
                    reservation.set_check_out_date(check_out)?;
                }
            }
            (Some(check_in), None) => reservation.set_check_in_date(check_in)?,
            (None, Some(check_out)) => reservation.set_check_out_date(check_out)?,
            (None, None) => {}
        }
        if let Some(count) = request.guest_count {
            reservation.set_guest_count(count)?;
        }
        if let Some(notes) = request.notes {
            reservation.set_notes(notes);
        }

        self.db.reservations().update(&reservation).await?;

        info!(
            id = %reservation.id,
            from = %reservation.check_in_date,
            to = %reservation.check_out_date,
            total = %reservation.total(),
            "reservation updated"
        );
        Ok(ReservationDto::from(&reservation))
    }

    /// Moves a live reservation to another room.
    ///
    /// The target must be free; the rate and capacity snapshots are re-taken
    /// and the total recomputed. The old room is freed, the new one occupied.
    pub async fn move_reservation(&self, id: &str, room_number: &str) -> AppResult<ReservationDto> {
        let lock = self.reservation_lock(id);
        let _guard = lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;
        if matches!(
            reservation.status,
            ReservationStatus::Completed | ReservationStatus::Cancelled | ReservationStatus::NoShow
        ) {
            return Err(AppError::state_conflict(format!(
                "reservation is {:?} and can no longer be moved",
                reservation.status
            )));
        }

        let room = self
            .db
            .rooms()
            .get(room_number)
            .await?
            .ok_or_else(|| AppError::not_found("Room", room_number))?;
        if !room.available {
            return Err(AppError::room_unavailable(format!(
                "room {} is currently occupied or reserved",
                room.number
            )));
        }
        let clashes = self
            .db
            .reservations()
            .list_overlapping(
                &room.number,
                reservation.check_in_date,
                reservation.check_out_date,
            )
            .await?;
        if clashes.iter().any(|other| other.id != reservation.id) {
            return Err(AppError::room_unavailable(format!(
                "room {} already has a reservation in that window",
                room.number
            )));
        }

        let previous_room = reservation.room_number.clone();
        reservation.set_room(&room)?;

        self.db.reservations().update(&reservation).await?;
        self.db.rooms().set_available(&previous_room, true).await?;
        self.db.rooms().set_available(&room.number, false).await?;

        info!(
            id = %reservation.id,
            from_room = %previous_room,
            to_room = %room.number,
            total = %reservation.total(),
            "reservation moved"
        );
        Ok(ReservationDto::from(&reservation))
    }

    // =========================================================================
    // Check-in
    // =========================================================================

    /// Checks a confirmed reservation in.
    ///
    /// ## Flow
    /// 1. Refuse if a register already exists for the reservation
    /// 2. `begin_stay()` stamps the arrival and moves to IN_PROGRESS
    /// 3. A register opens with the booking customer as titular guest
    /// 4. The optional security deposit is recorded
    pub async fn check_in(
        &self,
        reservation_id: &str,
        deposit_cents: Option<i64>,
    ) -> AppResult<CheckInDto> {
        let lock = self.reservation_lock(reservation_id);
        let _guard = lock.lock().await;

        debug!(reservation_id = %reservation_id, "check in");

        let mut reservation = self.load_reservation(reservation_id).await?;
        if self
            .db
            .check_ins()
            .get_by_reservation(reservation_id)
            .await?
            .is_some()
        {
            return Err(CoreError::State(StateError::RegisterAlreadyOpen {
                reservation_id: reservation_id.to_string(),
            })
            .into());
        }
        let customer = self
            .db
            .customers()
            .get_by_id(&reservation.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", &reservation.customer_id))?;

        reservation.begin_stay()?;

        let mut register = CheckIn::open(&reservation)?;
        register.add_guest(titular_guest(&customer)?)?;
        if let Some(cents) = deposit_cents {
            register.set_deposit(cents)?;
        }

        self.db.check_ins().insert(&register).await?;
        self.db.reservations().update(&reservation).await?;

        info!(
            reservation_id = %reservation.id,
            register_id = %register.id,
            room = %register.room_number,
            titular = %customer.full_name,
            "guest checked in"
        );
        Ok(CheckInDto::from(&register))
    }

    /// Adds a guest to the open register of an in-progress stay.
    ///
    /// The reservation's guest count follows the roster size.
    pub async fn add_guest(
        &self,
        reservation_id: &str,
        request: NewGuestRequest,
    ) -> AppResult<CheckInDto> {
        let lock = self.reservation_lock(reservation_id);
        let _guard = lock.lock().await;

        let mut reservation = self.load_reservation(reservation_id).await?;
        if reservation.status != ReservationStatus::InProgress {
            return Err(
                CoreError::State(StateError::NotInProgress {
                    current: reservation.status,
                })
                .into(),
            );
        }
        let mut register = self.load_register(reservation_id).await?;

        let guest = Guest::new(
            request.first_name,
            request.last_name,
            request.document_type,
            request.document_number,
            request.email,
            request.phone,
            request.titular,
        )?;
        let roster_size = register.add_guest(guest)?;
        reservation.set_guest_count(roster_size as i64)?;

        self.db.check_ins().update(&register).await?;
        self.db.reservations().update(&reservation).await?;

        info!(
            reservation_id = %reservation.id,
            roster_size = roster_size,
            "guest added to roster"
        );
        Ok(CheckInDto::from(&register))
    }

    /// Gets the check-in register for a reservation.
    pub async fn get_check_in(&self, reservation_id: &str) -> AppResult<CheckInDto> {
        let register = self.load_register(reservation_id).await?;
        Ok(CheckInDto::from(&register))
    }

    // =========================================================================
    // Check-out
    // =========================================================================

    /// Opens a zeroed check-out ledger for an in-progress stay.
    ///
    /// Settlement opens one lazily anyway; this exists so the desk can start
    /// collecting service charges before the guest is at the counter.
    pub async fn open_check_out(&self, reservation_id: &str) -> AppResult<CheckOutDto> {
        let lock = self.reservation_lock(reservation_id);
        let _guard = lock.lock().await;

        let reservation = self.load_reservation(reservation_id).await?;
        if reservation.status != ReservationStatus::InProgress {
            return Err(
                CoreError::State(StateError::NotInProgress {
                    current: reservation.status,
                })
                .into(),
            );
        }
        let register = self.load_register(reservation_id).await?;
        if self
            .db
            .check_outs()
            .get_by_reservation(reservation_id)
            .await?
            .is_some()
        {
            return Err(AppError::state_conflict(format!(
                "a check-out ledger is already open for reservation {}",
                reservation_id
            )));
        }

        let ledger = CheckOut::open(&register.id, reservation_id);
        self.db.check_outs().insert(&ledger).await?;

        info!(reservation_id = %reservation_id, ledger_id = %ledger.id, "check-out opened");
        Ok(CheckOutDto::from(&ledger))
    }

    /// Gets the check-out ledger for a reservation.
    pub async fn get_check_out(&self, reservation_id: &str) -> AppResult<CheckOutDto> {
        let ledger = self
            .db
            .check_outs()
            .get_by_reservation(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Check-out ledger", reservation_id))?;
        Ok(CheckOutDto::from(&ledger))
    }

    /// Settles the stay: ends it, bills it, frees the room.
    ///
    /// ## Flow
    /// 1. Validate everything: stay in progress, register present, ledger
    ///    not settled, amounts and payment method well-formed
    /// 2. `end_stay()` stamps the departure and recomputes the stay total
    ///    for the nights actually spent
    /// 3. The ledger settles with stay + services and the payment details
    /// 4. The room returns to the available pool
    ///
    /// The ledger is opened lazily when none exists yet.
    pub async fn settle_check_out(
        &self,
        reservation_id: &str,
        services_cents: i64,
        payment_method: &str,
        payment_reference: Option<&str>,
    ) -> AppResult<SettlementSummary> {
        let lock = self.reservation_lock(reservation_id);
        let _guard = lock.lock().await;

        debug!(reservation_id = %reservation_id, "settle check-out");

        let mut reservation = self.load_reservation(reservation_id).await?;
        if reservation.status != ReservationStatus::InProgress {
            return Err(
                CoreError::State(StateError::NotInProgress {
                    current: reservation.status,
                })
                .into(),
            );
        }
        let register = self.load_register(reservation_id).await?;

        let existing = self
            .db
            .check_outs()
            .get_by_reservation(reservation_id)
            .await?;
        let fresh = existing.is_none();
        let mut ledger =
            existing.unwrap_or_else(|| CheckOut::open(&register.id, reservation_id));

        // Everything that can refuse does so before the first mutation.
        if ledger.is_settled() {
            return Err(CoreError::State(StateError::AlreadySettled).into());
        }
        validate_amount_cents("services total", services_cents)?;
        validate_payment_method(payment_method)?;

        reservation.end_stay()?;
        let stay_cents = reservation.total_cents;
        let grand_cents =
            ledger.settle(stay_cents, services_cents, payment_method, payment_reference)?;

        if fresh {
            self.db.check_outs().insert(&ledger).await?;
        } else {
            self.db.check_outs().update(&ledger).await?;
        }
        self.db.reservations().update(&reservation).await?;
        self.db
            .rooms()
            .set_available(&reservation.room_number, true)
            .await?;

        info!(
            reservation_id = %reservation.id,
            ledger_id = %ledger.id,
            stay = %Money::from_cents(stay_cents),
            services = %Money::from_cents(services_cents),
            grand = %Money::from_cents(grand_cents),
            "check-out settled"
        );

        let payment_method = ledger
            .payment_method
            .clone()
            .unwrap_or_else(|| payment_method.trim().to_string());
        Ok(SettlementSummary {
            reservation_id: reservation.id.clone(),
            check_out_id: ledger.id.clone(),
            room_number: reservation.room_number.clone(),
            nights: reservation.nights(),
            stay_total_cents: stay_cents,
            services_total_cents: services_cents,
            grand_total_cents: grand_cents,
            grand_total: Money::from_cents(grand_cents).to_string(),
            payment_method,
        })
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn load_reservation(&self, id: &str) -> AppResult<Reservation> {
        self.db
            .reservations()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation", id))
    }

    async fn load_register(&self, reservation_id: &str) -> AppResult<CheckIn> {
        self.db
            .check_ins()
            .get_by_reservation(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::state_conflict(format!(
                    "no check-in register exists for reservation {}",
                    reservation_id
                ))
            })
    }

    fn ensure_editable(reservation: &Reservation) -> AppResult<()> {
        match reservation.status {
            ReservationStatus::Pending | ReservationStatus::Confirmed => Ok(()),
            other => Err(AppError::state_conflict(format!(
                "reservation is {:?} and can no longer be modified",
                other
            ))),
        }
    }
}

/// Builds the titular roster entry from the booking customer.
///
/// The profile carries no identity document, so the register records the
/// customer id as the document reference. Single-word names fill both name
/// fields; the roster requires both.
fn titular_guest(customer: &Customer) -> Result<Guest, ValidationError> {
    let full_name = customer.full_name.trim();
    let (first_name, last_name) = match full_name.rsplit_once(' ') {
        Some((first, last)) => (first, last),
        None => (full_name, full_name),
    };
    Guest::new(
        first_name,
        last_name,
        "customer profile",
        &customer.id,
        Some(customer.email.clone()),
        customer.phone.clone(),
        true,
    )
}

// =============================================================================
// Service Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NewCustomerRequest;
    use crate::error::ErrorCode;
    use crate::services::CustomerService;
    use atrium_core::types::{CheckInStatus, SettlementStatus, StandardFeatures, SuiteFeatures};
    use atrium_db::DbConfig;
    use chrono::{Days, Utc};

    async fn services() -> (CustomerService, BookingService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (CustomerService::new(db.clone()), BookingService::new(db))
    }

    fn day(offset: u64) -> NaiveDate {
        Utc::now().date_naive() + Days::new(offset)
    }

    async fn seed_customer(customers: &CustomerService) -> String {
        customers
            .register(NewCustomerRequest {
                full_name: "Ana García".to_string(),
                email: "ana.garcia@example.com".to_string(),
                phone: Some("+34 600 111 222".to_string()),
                address: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_double_room(booking: &BookingService) {
        let room = Room::standard(
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
        .unwrap();
        booking.register_room(room).await.unwrap();
    }

    fn booking_request(customer_id: &str) -> NewReservationRequest {
        NewReservationRequest {
            customer_id: customer_id.to_string(),
            room_number: "101".to_string(),
            check_in_date: day(1),
            check_out_date: day(4),
            guest_count: 2,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle_book_to_settlement() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        // Book: three nights at $80.00
        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.nights, 3);
        assert_eq!(reservation.total_cents, 24000);
        assert!(!booking.get_room("101").await.unwrap().available);

        let confirmed = booking.confirm_reservation(&reservation.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        // Check in with a deposit; the titular lands on the roster
        let register = booking
            .check_in(&reservation.id, Some(5000))
            .await
            .unwrap();
        assert_eq!(register.status, CheckInStatus::Active);
        assert_eq!(register.roster_size, 1);
        assert!(register.titular_registered);
        assert_eq!(register.deposit_cents, Some(5000));
        assert_eq!(register.guests[0].last_name, "García");
        assert!(register.guests[0].titular);

        let in_progress = booking.get_reservation(&reservation.id).await.unwrap();
        assert_eq!(in_progress.status, ReservationStatus::InProgress);

        // Second guest joins; the reservation's count follows the roster
        let register = booking
            .add_guest(
                &reservation.id,
                NewGuestRequest {
                    first_name: "Luis".to_string(),
                    last_name: "García".to_string(),
                    document_type: "passport".to_string(),
                    document_number: "X-123".to_string(),
                    email: None,
                    phone: None,
                    titular: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(register.roster_size, 2);
        assert_eq!(
            booking.get_reservation(&reservation.id).await.unwrap().guest_count,
            2
        );

        // Settle: arrival and departure both stamped today, so the stay
        // recomputes to zero nights and only services are billed
        let summary = booking
            .settle_check_out(&reservation.id, 4550, "card", Some("AUTH-91"))
            .await
            .unwrap();
        assert_eq!(summary.stay_total_cents, 0);
        assert_eq!(summary.services_total_cents, 4550);
        assert_eq!(summary.grand_total_cents, 4550);
        assert_eq!(summary.grand_total, "$45.50");
        assert_eq!(summary.payment_method, "card");

        let settled = booking.get_reservation(&reservation.id).await.unwrap();
        assert_eq!(settled.status, ReservationStatus::Completed);
        assert!(booking.get_room("101").await.unwrap().available);

        let ledger = booking.get_check_out(&reservation.id).await.unwrap();
        assert_eq!(ledger.status, SettlementStatus::Settled);
        assert_eq!(ledger.grand_total_cents, 4550);
    }

    #[tokio::test]
    async fn test_create_reservation_refuses_taken_room() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();

        let err = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomUnavailable);
    }

    #[tokio::test]
    async fn test_create_reservation_refuses_inactive_customer() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        customers.deactivate(&customer_id).await.unwrap();

        let err = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("inactive"));
    }

    #[tokio::test]
    async fn test_check_in_requires_confirmed_reservation() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();

        let err = booking.check_in(&reservation.id, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
        assert!(err.message.contains("confirmed"));

        // Nothing was persisted by the refused attempt
        assert_eq!(
            booking.get_reservation(&reservation.id).await.unwrap().status,
            ReservationStatus::Pending
        );
        let register_err = booking.get_check_in(&reservation.id).await.unwrap_err();
        assert_eq!(register_err.code, ErrorCode::StateConflict);
    }

    #[tokio::test]
    async fn test_duplicate_check_in_refused() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();

        let err = booking.check_in(&reservation.id, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
        assert!(err.message.contains("already open"));
    }

    #[tokio::test]
    async fn test_roster_capacity_enforced() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();

        let second = NewGuestRequest {
            first_name: "Luis".to_string(),
            last_name: "García".to_string(),
            document_type: "passport".to_string(),
            document_number: "X-123".to_string(),
            email: None,
            phone: None,
            titular: false,
        };
        booking.add_guest(&reservation.id, second.clone()).await.unwrap();

        let third = NewGuestRequest {
            first_name: "Marta".to_string(),
            last_name: "Ruiz".to_string(),
            document_number: "Y-999".to_string(),
            ..second
        };
        let err = booking.add_guest(&reservation.id, third).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoomFull);
        assert!(err.message.contains("2 of 2"));

        // Roster unchanged after the refusal
        assert_eq!(
            booking.get_check_in(&reservation.id).await.unwrap().roster_size,
            2
        );
    }

    #[tokio::test]
    async fn test_second_titular_refused() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();

        let err = booking
            .add_guest(
                &reservation.id,
                NewGuestRequest {
                    first_name: "Luis".to_string(),
                    last_name: "García".to_string(),
                    document_type: "passport".to_string(),
                    document_number: "X-123".to_string(),
                    email: None,
                    phone: None,
                    titular: true,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
        assert!(err.message.contains("titular"));
    }

    #[tokio::test]
    async fn test_cancel_frees_room_and_ends_lifecycle() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        let cancelled = booking
            .cancel_reservation(&reservation.id, Some("plans changed"))
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(cancelled.notes.contains("Cancelled: plans changed"));
        assert!(booking.get_room("101").await.unwrap().available);

        let err = booking.confirm_reservation(&reservation.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);

        // The freed room can be booked again for the same window
        booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_settle_requires_stay_in_progress() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();

        let err = booking
            .settle_check_out(&reservation.id, 0, "cash", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
        assert!(err.message.contains("in progress"));
    }

    #[tokio::test]
    async fn test_settle_twice_refused() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();
        booking
            .settle_check_out(&reservation.id, 2000, "cash", None)
            .await
            .unwrap();

        let err = booking
            .settle_check_out(&reservation.id, 9999, "card", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);

        // The settled figures are untouched by the second attempt
        let ledger = booking.get_check_out(&reservation.id).await.unwrap();
        assert_eq!(ledger.services_total_cents, 2000);
        assert_eq!(ledger.payment_method.as_deref(), Some("cash"));
    }

    #[tokio::test]
    async fn test_settle_rejects_bad_input_without_ending_stay() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();

        let err = booking
            .settle_check_out(&reservation.id, -100, "card", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = booking
            .settle_check_out(&reservation.id, 100, "   ", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // The stay is still in progress and can settle normally
        assert_eq!(
            booking.get_reservation(&reservation.id).await.unwrap().status,
            ReservationStatus::InProgress
        );
        booking
            .settle_check_out(&reservation.id, 100, "card", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_open_check_out_before_settlement() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        booking.confirm_reservation(&reservation.id).await.unwrap();
        booking.check_in(&reservation.id, None).await.unwrap();

        let ledger = booking.open_check_out(&reservation.id).await.unwrap();
        assert_eq!(ledger.status, SettlementStatus::Pending);
        assert_eq!(ledger.grand_total_cents, 0);

        let err = booking.open_check_out(&reservation.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);

        // Settlement reuses the open ledger instead of creating another
        let summary = booking
            .settle_check_out(&reservation.id, 1500, "cash", None)
            .await
            .unwrap();
        assert_eq!(summary.check_out_id, ledger.id);
    }

    #[tokio::test]
    async fn test_update_reservation_moves_window_and_total() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();
        assert_eq!(reservation.total_cents, 24000);

        // Shift the whole stay forward past the old window
        let updated = booking
            .update_reservation(
                &reservation.id,
                UpdateReservationRequest {
                    check_in_date: Some(day(10)),
                    check_out_date: Some(day(12)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.check_in_date, day(10));
        assert_eq!(updated.nights, 2);
        assert_eq!(updated.total_cents, 16000);

        let err = booking
            .update_reservation(
                &reservation.id,
                UpdateReservationRequest {
                    guest_count: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("capacity"));
    }

    #[tokio::test]
    async fn test_move_reservation_re_snapshots_room() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;
        let suite = Room::suite(
            "201",
            15000,
            4,
            "Executive suite",
            SuiteFeatures {
                jacuzzi: true,
                ..Default::default()
            },
        )
        .unwrap();
        booking.register_room(suite).await.unwrap();

        let reservation = booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();

        let moved = booking.move_reservation(&reservation.id, "201").await.unwrap();
        assert_eq!(moved.room_number, "201");
        assert_eq!(moved.nightly_rate_cents, 15000);
        // Plain rate times nights, no suite surcharges in the stay total
        assert_eq!(moved.total_cents, 45000);
        assert!(booking.get_room("101").await.unwrap().available);
        assert!(!booking.get_room("201").await.unwrap().available);

        let err = booking.move_reservation(&reservation.id, "999").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_check_availability_is_date_aware() {
        let (customers, booking) = services().await;
        let customer_id = seed_customer(&customers).await;
        seed_double_room(&booking).await;

        booking
            .create_reservation(booking_request(&customer_id))
            .await
            .unwrap();

        // Overlapping window clashes; back-to-back window does not
        assert!(!booking.check_availability("101", day(2), day(5)).await.unwrap());
        assert!(booking.check_availability("101", day(4), day(6)).await.unwrap());

        let err = booking.check_availability("999", day(1), day(2)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_rooms_for_party_uses_capacity() {
        let (customers, booking) = services().await;
        let _ = seed_customer(&customers).await;
        seed_double_room(&booking).await;
        let single = Room::standard("103", 6000, 1, "Single", StandardFeatures::default()).unwrap();
        booking.register_room(single).await.unwrap();

        let fits_two = booking.rooms_for_party(2).await.unwrap();
        assert_eq!(fits_two.len(), 1);
        assert_eq!(fits_two[0].number, "101");
    }
}
