//! # Check-Out Repository
//!
//! Database operations for settlement ledgers.
//!
//! One ledger per register and per reservation, both enforced by UNIQUE
//! constraints; a second settlement attempt fails at the domain layer first
//! and at the schema as a last line.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::CheckOutRow;
use atrium_core::checkout::CheckOut;

const CHECK_OUT_COLUMNS: &str = "id, check_in_id, reservation_id, departed_at, \
     stay_total_cents, services_total_cents, grand_total_cents, notes, payment_method, \
     payment_reference, status";

/// Repository for check-out ledger database operations.
#[derive(Debug, Clone)]
pub struct CheckOutRepository {
    pool: SqlitePool,
}

impl CheckOutRepository {
    /// Creates a new CheckOutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckOutRepository { pool }
    }

    /// Inserts a new ledger.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The register or reservation already
    ///   has a ledger
    pub async fn insert(&self, check_out: &CheckOut) -> DbResult<()> {
        debug!(
            id = %check_out.id,
            reservation_id = %check_out.reservation_id,
            "Inserting check-out ledger"
        );

        sqlx::query(
            r#"
            INSERT INTO check_outs (
                id, check_in_id, reservation_id, departed_at,
                stay_total_cents, services_total_cents, grand_total_cents,
                notes, payment_method, payment_reference, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&check_out.id)
        .bind(&check_out.check_in_id)
        .bind(&check_out.reservation_id)
        .bind(check_out.departed_at)
        .bind(check_out.stay_total_cents)
        .bind(check_out.services_total_cents)
        .bind(check_out.grand_total_cents)
        .bind(&check_out.notes)
        .bind(&check_out.payment_method)
        .bind(&check_out.payment_reference)
        .bind(check_out.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing ledger.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Ledger doesn't exist
    pub async fn update(&self, check_out: &CheckOut) -> DbResult<()> {
        debug!(id = %check_out.id, status = ?check_out.status, "Updating check-out ledger");

        let result = sqlx::query(
            r#"
            UPDATE check_outs SET
                departed_at = ?2,
                stay_total_cents = ?3,
                services_total_cents = ?4,
                grand_total_cents = ?5,
                notes = ?6,
                payment_method = ?7,
                payment_reference = ?8,
                status = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&check_out.id)
        .bind(check_out.departed_at)
        .bind(check_out.stay_total_cents)
        .bind(check_out.services_total_cents)
        .bind(check_out.grand_total_cents)
        .bind(&check_out.notes)
        .bind(&check_out.payment_method)
        .bind(&check_out.payment_reference)
        .bind(check_out.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Check-out", &check_out.id));
        }

        Ok(())
    }

    /// Gets a ledger by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CheckOut>> {
        let row: Option<CheckOutRow> = sqlx::query_as(&format!(
            "SELECT {CHECK_OUT_COLUMNS} FROM check_outs WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CheckOut::from))
    }

    /// Gets the ledger opened for a reservation, if any.
    pub async fn get_by_reservation(&self, reservation_id: &str) -> DbResult<Option<CheckOut>> {
        let row: Option<CheckOutRow> = sqlx::query_as(&format!(
            "SELECT {CHECK_OUT_COLUMNS} FROM check_outs WHERE reservation_id = ?1"
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CheckOut::from))
    }

    /// Gets the ledger opened for a register, if any.
    pub async fn get_by_check_in(&self, check_in_id: &str) -> DbResult<Option<CheckOut>> {
        let row: Option<CheckOutRow> = sqlx::query_as(&format!(
            "SELECT {CHECK_OUT_COLUMNS} FROM check_outs WHERE check_in_id = ?1"
        ))
        .bind(check_in_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CheckOut::from))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::checkin::CheckIn;
    use atrium_core::reservation::Reservation;
    use atrium_core::types::{Customer, Room, SettlementStatus, StandardFeatures};
    use chrono::{Days, Utc};

    /// Seeds everything up to an open register, returning (db, check_in).
    async fn db_with_register() -> (Database, CheckIn) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let customer = Customer::new("Ana García", "ana@example.com", None, None).unwrap();
        db.customers().insert(&customer).await.unwrap();

        let room = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
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

        let register = CheckIn::open(&reservation).unwrap();
        db.check_ins().insert(&register).await.unwrap();

        (db, register)
    }

    #[tokio::test]
    async fn test_ledger_roundtrip_after_settlement() {
        let (db, register) = db_with_register().await;
        let repo = db.check_outs();

        let mut ledger = CheckOut::open(&register.id, &register.reservation_id);
        repo.insert(&ledger).await.unwrap();

        ledger.settle(16000, 3550, "visa", Some("auth-991")).unwrap();
        repo.update(&ledger).await.unwrap();

        let loaded = repo
            .get_by_reservation(&register.reservation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status, SettlementStatus::Settled);
        assert_eq!(loaded.grand_total_cents, 19550);
        assert_eq!(loaded.payment_method.as_deref(), Some("visa"));

        let by_register = repo.get_by_check_in(&register.id).await.unwrap();
        assert!(by_register.is_some());
    }

    #[tokio::test]
    async fn test_second_ledger_for_register_rejected() {
        let (db, register) = db_with_register().await;
        let repo = db.check_outs();

        let first = CheckOut::open(&register.id, &register.reservation_id);
        repo.insert(&first).await.unwrap();

        let second = CheckOut::open(&register.id, &register.reservation_id);
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_ledger_is_not_found() {
        let (db, register) = db_with_register().await;

        let ghost = CheckOut::open(&register.id, "other-res");
        let err = db.check_outs().update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
