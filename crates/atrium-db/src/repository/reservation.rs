//! # Reservation Repository
//!
//! Database operations for bookings.
//!
//! ## Overlap Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Does [from, to) clash with a booking?                  │
//! │                                                                         │
//! │  Two half-open ranges intersect when each starts before the other       │
//! │  ends:                                                                  │
//! │                                                                         │
//! │      check_in_date < to  AND  check_out_date > from                     │
//! │                                                                         │
//! │  booking   ├────────────┤                                               │
//! │  window           ├───────────┤        → clash                          │
//! │  window                  ├────┤        → clash (starts on last night)   │
//! │  window                       ├───┤    → no clash (starts on checkout)  │
//! │                                                                         │
//! │  Only live bookings count: pending, confirmed, in_progress. A           │
//! │  cancelled or completed stay never blocks a room.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates are stored as `YYYY-MM-DD` TEXT, so lexicographic comparison in SQL
//! is chronological comparison.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::ReservationRow;
use atrium_core::reservation::Reservation;
use atrium_core::types::ReservationStatus;
use chrono::NaiveDate;

const RESERVATION_COLUMNS: &str = "id, customer_id, room_number, nightly_rate_cents, \
     room_capacity, check_in_date, check_out_date, guest_count, status, total_cents, \
     created_on, notes";

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Inserts a new reservation.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Customer or room doesn't exist
    pub async fn insert(&self, reservation: &Reservation) -> DbResult<()> {
        debug!(
            id = %reservation.id,
            room = %reservation.room_number,
            "Inserting reservation"
        );

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, customer_id, room_number, nightly_rate_cents, room_capacity,
                check_in_date, check_out_date, guest_count, status, total_cents,
                created_on, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.customer_id)
        .bind(&reservation.room_number)
        .bind(reservation.nightly_rate_cents)
        .bind(reservation.room_capacity)
        .bind(reservation.check_in_date)
        .bind(reservation.check_out_date)
        .bind(reservation.guest_count)
        .bind(reservation.status)
        .bind(reservation.total_cents)
        .bind(reservation.created_on)
        .bind(&reservation.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a reservation by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Reservation::from))
    }

    /// Lists every reservation, newest arrival first.
    pub async fn list(&self) -> DbResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY check_in_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Lists a customer's reservations, newest arrival first.
    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE customer_id = ?1 ORDER BY check_in_date DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Lists a room's reservations, newest arrival first.
    pub async fn list_by_room(&self, room_number: &str) -> DbResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE room_number = ?1 ORDER BY check_in_date DESC"
        ))
        .bind(room_number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Lists reservations whose stay intersects `[from, to)`, any status,
    /// earliest arrival first. Backs the occupancy calendar.
    pub async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE check_in_date < ?2 AND check_out_date > ?1 \
             ORDER BY check_in_date"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Lists live bookings of one room that clash with `[from, to)`.
    ///
    /// Live means pending, confirmed or in_progress; cancelled and completed
    /// stays never block a room.
    pub async fn list_overlapping(
        &self,
        room_number: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE room_number = ?1 \
               AND status IN (?2, ?3, ?4) \
               AND check_in_date < ?6 AND check_out_date > ?5 \
             ORDER BY check_in_date"
        ))
        .bind(room_number)
        .bind(ReservationStatus::Pending)
        .bind(ReservationStatus::Confirmed)
        .bind(ReservationStatus::InProgress)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    /// Updates an existing reservation.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Reservation doesn't exist
    pub async fn update(&self, reservation: &Reservation) -> DbResult<()> {
        debug!(id = %reservation.id, status = ?reservation.status, "Updating reservation");

        let result = sqlx::query(
            r#"
            UPDATE reservations SET
                customer_id = ?2,
                room_number = ?3,
                nightly_rate_cents = ?4,
                room_capacity = ?5,
                check_in_date = ?6,
                check_out_date = ?7,
                guest_count = ?8,
                status = ?9,
                total_cents = ?10,
                notes = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.customer_id)
        .bind(&reservation.room_number)
        .bind(reservation.nightly_rate_cents)
        .bind(reservation.room_capacity)
        .bind(reservation.check_in_date)
        .bind(reservation.check_out_date)
        .bind(reservation.guest_count)
        .bind(reservation.status)
        .bind(reservation.total_cents)
        .bind(&reservation.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", &reservation.id));
        }

        Ok(())
    }

    /// Counts reservations (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
