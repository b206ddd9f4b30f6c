//! # Room Repository
//!
//! Database operations for the room inventory.
//!
//! ## Feature Flattening
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Room { kind: RoomKind::Suite(SuiteFeatures { jacuzzi: true, .. }) }    │
//! │       │                                                                 │
//! │       ▼  RoomRow::from(&room)                                           │
//! │  rooms: room_type='suite', jacuzzi=1, minibar=0, ...                    │
//! │       │                                                                 │
//! │       ▼  Room::from(row)                                                │
//! │  Room { kind: RoomKind::Suite(..) }    (other family's columns ignored) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::RoomRow;
use atrium_core::types::Room;

const ROOM_COLUMNS: &str = "number, room_type, nightly_rate_cents, max_capacity, available, \
     description, exterior_view, air_conditioning, heating, jacuzzi, minibar, room_service, \
     interconnected_rooms, created_at, updated_at";

/// Repository for room database operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    /// Inserts a new room.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Room number already exists
    pub async fn insert(&self, room: &Room) -> DbResult<()> {
        debug!(number = %room.number, room_type = ?room.room_type(), "Inserting room");

        let row = RoomRow::from(room);
        sqlx::query(
            r#"
            INSERT INTO rooms (
                number, room_type, nightly_rate_cents, max_capacity, available,
                description, exterior_view, air_conditioning, heating,
                jacuzzi, minibar, room_service, interconnected_rooms,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&row.number)
        .bind(row.room_type)
        .bind(row.nightly_rate_cents)
        .bind(row.max_capacity)
        .bind(row.available)
        .bind(&row.description)
        .bind(row.exterior_view)
        .bind(row.air_conditioning)
        .bind(row.heating)
        .bind(row.jacuzzi)
        .bind(row.minibar)
        .bind(row.room_service)
        .bind(row.interconnected_rooms)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a room by number.
    pub async fn get(&self, number: &str) -> DbResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE number = ?1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Room::from))
    }

    /// Lists every room, ordered by number.
    pub async fn list(&self) -> DbResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    /// Lists rooms currently free to book, ordered by number.
    pub async fn list_available(&self) -> DbResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE available = 1 ORDER BY number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    /// Lists available rooms that sleep at least `guests`, ordered by number.
    pub async fn list_with_capacity(&self, guests: i64) -> DbResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms \
             WHERE available = 1 AND max_capacity >= ?1 ORDER BY number"
        ))
        .bind(guests)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    /// Updates an existing room.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Room doesn't exist
    pub async fn update(&self, room: &Room) -> DbResult<()> {
        debug!(number = %room.number, "Updating room");

        let row = RoomRow::from(room);
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE rooms SET
                room_type = ?2,
                nightly_rate_cents = ?3,
                max_capacity = ?4,
                available = ?5,
                description = ?6,
                exterior_view = ?7,
                air_conditioning = ?8,
                heating = ?9,
                jacuzzi = ?10,
                minibar = ?11,
                room_service = ?12,
                interconnected_rooms = ?13,
                updated_at = ?14
            WHERE number = ?1
            "#,
        )
        .bind(&row.number)
        .bind(row.room_type)
        .bind(row.nightly_rate_cents)
        .bind(row.max_capacity)
        .bind(row.available)
        .bind(&row.description)
        .bind(row.exterior_view)
        .bind(row.air_conditioning)
        .bind(row.heating)
        .bind(row.jacuzzi)
        .bind(row.minibar)
        .bind(row.room_service)
        .bind(row.interconnected_rooms)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", &room.number));
        }

        Ok(())
    }

    /// Flips the availability flag without rewriting the whole row.
    ///
    /// ## Usage
    /// The booking service marks the room occupied when a reservation takes
    /// it and frees it again on cancellation or settlement.
    pub async fn set_available(&self, number: &str, available: bool) -> DbResult<()> {
        debug!(number = %number, available = %available, "Setting room availability");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE rooms SET available = ?2, updated_at = ?3 WHERE number = ?1",
        )
        .bind(number)
        .bind(available)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", number));
        }

        Ok(())
    }

    /// Counts rooms (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::types::{StandardFeatures, SuiteFeatures};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_load_suite() {
        let db = test_db().await;
        let repo = db.rooms();

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
        repo.insert(&suite).await.unwrap();

        let loaded = repo.get("201").await.unwrap().unwrap();
        assert_eq!(loaded.kind, suite.kind);
        assert_eq!(loaded.nightly_rate_cents, 15000);
        assert!(loaded.available);
    }

    #[tokio::test]
    async fn test_duplicate_room_number_rejected() {
        let db = test_db().await;
        let repo = db.rooms();

        let room = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
        repo.insert(&room).await.unwrap();

        let clone = Room::standard("101", 9000, 3, "", StandardFeatures::default()).unwrap();
        let err = repo.insert(&clone).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_availability_flag_drives_listing() {
        let db = test_db().await;
        let repo = db.rooms();

        let a = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
        let b = Room::standard("102", 8500, 2, "", StandardFeatures::default()).unwrap();
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        repo.set_available("101", false).await.unwrap();

        let available = repo.list_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].number, "102");
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_with_capacity_filters_small_rooms() {
        let db = test_db().await;
        let repo = db.rooms();

        let single = Room::standard("103", 6000, 1, "", StandardFeatures::default()).unwrap();
        let double = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
        repo.insert(&single).await.unwrap();
        repo.insert(&double).await.unwrap();

        let fits_two = repo.list_with_capacity(2).await.unwrap();
        assert_eq!(fits_two.len(), 1);
        assert_eq!(fits_two[0].number, "101");
    }

    #[tokio::test]
    async fn test_set_available_missing_room_is_not_found() {
        let db = test_db().await;
        let err = db.rooms().set_available("999", false).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
