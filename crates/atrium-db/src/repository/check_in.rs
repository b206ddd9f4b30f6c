//! # Check-In Repository
//!
//! Database operations for registers and their rosters.
//!
//! ## Two Tables, One Aggregate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckIn { guests: Vec<Guest>, .. }                                     │
//! │       │                                                                 │
//! │       ▼  one transaction                                                │
//! │  check_ins:        1 row   (register header)                           │
//! │  check_in_guests:  N rows  (roster lines, position 0..N)               │
//! │                                                                         │
//! │  Updates rewrite the roster wholesale: delete + re-insert inside the   │
//! │  same transaction. Rosters are tiny (room capacity), so simplicity     │
//! │  beats diffing.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::{CheckInRow, GuestRow};
use atrium_core::checkin::CheckIn;

const CHECK_IN_COLUMNS: &str = "id, reservation_id, room_number, entered_at, \
     expected_departure, deposit_cents, notes, status, capacity, titular_registered";

const GUEST_COLUMNS: &str = "id, check_in_id, position, first_name, last_name, \
     document_type, document_number, email, phone, titular";

/// Repository for check-in register database operations.
#[derive(Debug, Clone)]
pub struct CheckInRepository {
    pool: SqlitePool,
}

impl CheckInRepository {
    /// Creates a new CheckInRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckInRepository { pool }
    }

    /// Inserts a register and its roster in one transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The reservation already has a register
    /// * `Err(DbError::ForeignKeyViolation)` - The reservation doesn't exist
    pub async fn insert(&self, check_in: &CheckIn) -> DbResult<()> {
        debug!(
            id = %check_in.id,
            reservation_id = %check_in.reservation_id,
            guests = check_in.roster_size(),
            "Inserting check-in register"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO check_ins (
                id, reservation_id, room_number, entered_at, expected_departure,
                deposit_cents, notes, status, capacity, titular_registered
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&check_in.id)
        .bind(&check_in.reservation_id)
        .bind(&check_in.room_number)
        .bind(check_in.entered_at)
        .bind(check_in.expected_departure)
        .bind(check_in.deposit_cents)
        .bind(&check_in.notes)
        .bind(check_in.status)
        .bind(check_in.capacity)
        .bind(check_in.titular_registered)
        .execute(&mut *tx)
        .await?;

        insert_roster(&mut tx, check_in).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Updates a register, rewriting its roster, in one transaction.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Register doesn't exist
    pub async fn update(&self, check_in: &CheckIn) -> DbResult<()> {
        debug!(
            id = %check_in.id,
            guests = check_in.roster_size(),
            "Updating check-in register"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE check_ins SET
                room_number = ?2,
                entered_at = ?3,
                expected_departure = ?4,
                deposit_cents = ?5,
                notes = ?6,
                status = ?7,
                capacity = ?8,
                titular_registered = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&check_in.id)
        .bind(&check_in.room_number)
        .bind(check_in.entered_at)
        .bind(check_in.expected_departure)
        .bind(check_in.deposit_cents)
        .bind(&check_in.notes)
        .bind(check_in.status)
        .bind(check_in.capacity)
        .bind(check_in.titular_registered)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Check-in", &check_in.id));
        }

        sqlx::query("DELETE FROM check_in_guests WHERE check_in_id = ?1")
            .bind(&check_in.id)
            .execute(&mut *tx)
            .await?;

        insert_roster(&mut tx, check_in).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a register (with roster) by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CheckIn>> {
        let row: Option<CheckInRow> = sqlx::query_as(&format!(
            "SELECT {CHECK_IN_COLUMNS} FROM check_ins WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let guests = self.load_roster(&row.id).await?;
                Ok(Some(row.into_check_in(guests)))
            }
            None => Ok(None),
        }
    }

    /// Gets the register (with roster) opened for a reservation, if any.
    pub async fn get_by_reservation(&self, reservation_id: &str) -> DbResult<Option<CheckIn>> {
        let row: Option<CheckInRow> = sqlx::query_as(&format!(
            "SELECT {CHECK_IN_COLUMNS} FROM check_ins WHERE reservation_id = ?1"
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let guests = self.load_roster(&row.id).await?;
                Ok(Some(row.into_check_in(guests)))
            }
            None => Ok(None),
        }
    }

    async fn load_roster(&self, check_in_id: &str) -> DbResult<Vec<GuestRow>> {
        let guests: Vec<GuestRow> = sqlx::query_as(&format!(
            "SELECT {GUEST_COLUMNS} FROM check_in_guests \
             WHERE check_in_id = ?1 ORDER BY position"
        ))
        .bind(check_in_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }
}

/// Inserts every roster line of a register inside the given transaction.
async fn insert_roster(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    check_in: &CheckIn,
) -> DbResult<()> {
    for (position, guest) in check_in.guests.iter().enumerate() {
        let row = GuestRow::from_guest(&check_in.id, position as i64, guest);
        sqlx::query(
            r#"
            INSERT INTO check_in_guests (
                id, check_in_id, position, first_name, last_name,
                document_type, document_number, email, phone, titular
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&row.id)
        .bind(&row.check_in_id)
        .bind(row.position)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.document_type)
        .bind(&row.document_number)
        .bind(&row.email)
        .bind(&row.phone)
        .bind(row.titular)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::reservation::Reservation;
    use atrium_core::types::{Customer, Guest, Room, StandardFeatures};
    use chrono::{Days, Utc};

    fn guest(first: &str, titular: bool) -> Guest {
        Guest::new(first, "Mora", "passport", "X-12345", None, None, titular).unwrap()
    }

    /// Seeds customer + room + an IN_PROGRESS reservation and returns the db
    /// handle with the reservation.
    async fn db_with_stay() -> (Database, Reservation) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = Customer::new("Ana García", "ana@example.com", None, None).unwrap();
        db.customers().insert(&customer).await.unwrap();

        let room = Room::standard("101", 8000, 3, "", StandardFeatures::default()).unwrap();
        db.rooms().insert(&room).await.unwrap();

        let today = Utc::now().date_naive();
        let mut reservation = Reservation::new(
            &customer,
            &room,
            today + Days::new(1),
            today + Days::new(3),
            2,
            None,
        )
        .unwrap();
        db.reservations().insert(&reservation).await.unwrap();

        reservation.confirm().unwrap();
        reservation.begin_stay().unwrap();
        db.reservations().update(&reservation).await.unwrap();

        (db, reservation)
    }

    #[tokio::test]
    async fn test_register_roundtrip_keeps_roster_order() {
        let (db, reservation) = db_with_stay().await;
        let repo = db.check_ins();

        let mut register = CheckIn::open(&reservation).unwrap();
        register.add_guest(guest("Luis", true)).unwrap();
        register.add_guest(guest("Marta", false)).unwrap();
        register.set_deposit(10000).unwrap();
        repo.insert(&register).await.unwrap();

        let loaded = repo
            .get_by_reservation(&reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, register.id);
        assert_eq!(loaded.roster_size(), 2);
        assert_eq!(loaded.guests[0].first_name, "Luis");
        assert!(loaded.guests[0].titular);
        assert_eq!(loaded.guests[1].first_name, "Marta");
        assert!(loaded.titular_registered);
        assert_eq!(loaded.deposit_cents, Some(10000));
        assert_eq!(loaded.capacity, 3);
    }

    #[tokio::test]
    async fn test_second_register_for_reservation_rejected() {
        let (db, reservation) = db_with_stay().await;
        let repo = db.check_ins();

        let first = CheckIn::open(&reservation).unwrap();
        repo.insert(&first).await.unwrap();

        let second = CheckIn::open(&reservation).unwrap();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_rewrites_roster() {
        let (db, reservation) = db_with_stay().await;
        let repo = db.check_ins();

        let mut register = CheckIn::open(&reservation).unwrap();
        register.add_guest(guest("Luis", true)).unwrap();
        repo.insert(&register).await.unwrap();

        register.add_guest(guest("Marta", false)).unwrap();
        register.finalize().unwrap();
        repo.update(&register).await.unwrap();

        let loaded = repo.get_by_id(&register.id).await.unwrap().unwrap();
        assert_eq!(loaded.roster_size(), 2);
        assert_eq!(loaded.status, atrium_core::types::CheckInStatus::Finalized);
    }

    #[tokio::test]
    async fn test_missing_register_is_none() {
        let (db, _) = db_with_stay().await;
        assert!(db.check_ins().get_by_id("nope").await.unwrap().is_none());
        assert!(db
            .check_ins()
            .get_by_reservation("nope")
            .await
            .unwrap()
            .is_none());
    }
}
