//! # Demo Data Seeding
//!
//! Curated starter data so a fresh database has something to book.
//!
//! ## What Gets Seeded
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Floor 1 - standard rooms                                               │
//! │    101  $80.00/night   sleeps 2   exterior view, A/C, heating           │
//! │    102  $85.00/night   sleeps 2   A/C, heating                          │
//! │    103  $60.00/night   sleeps 1   heating                               │
//! │                                                                         │
//! │  Floor 2 - suites                                                       │
//! │    201  $150.00/night  sleeps 4   jacuzzi, minibar, room service,       │
//! │                                   2 interconnected rooms                │
//! │    202  $120.00/night  sleeps 3   minibar                               │
//! │                                                                         │
//! │  One demo customer: Ana García <ana.garcia@example.com>                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seeding is idempotent: if any room already exists, nothing is written.

use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use atrium_core::types::{Customer, Room, StandardFeatures, SuiteFeatures};
use atrium_core::validation::ValidationResult;

/// Seeds the demo property and customer into an empty database.
///
/// ## Returns
/// * `Ok(true)` - Demo data was written
/// * `Ok(false)` - Database already had rooms; nothing was touched
pub async fn seed_demo_data(db: &Database) -> DbResult<bool> {
    if db.rooms().count().await? > 0 {
        info!("Rooms already present, skipping demo seed");
        return Ok(false);
    }

    let rooms = demo_rooms().map_err(|e| DbError::Internal(e.to_string()))?;
    for room in &rooms {
        db.rooms().insert(room).await?;
    }

    let customer = demo_customer().map_err(|e| DbError::Internal(e.to_string()))?;
    if db
        .customers()
        .get_by_email(&customer.email)
        .await?
        .is_none()
    {
        db.customers().insert(&customer).await?;
    }

    info!(rooms = rooms.len(), "Demo data seeded");
    Ok(true)
}

/// The curated demo property.
fn demo_rooms() -> ValidationResult<Vec<Room>> {
    Ok(vec![
        Room::standard(
            "101",
            8000,
            2,
            "Standard double, garden side",
            StandardFeatures {
                exterior_view: true,
                air_conditioning: true,
                heating: true,
            },
        )?,
        Room::standard(
            "102",
            8500,
            2,
            "Standard double",
            StandardFeatures {
                exterior_view: false,
                air_conditioning: true,
                heating: true,
            },
        )?,
        Room::standard(
            "103",
            6000,
            1,
            "Single, courtyard side",
            StandardFeatures {
                exterior_view: false,
                air_conditioning: false,
                heating: true,
            },
        )?,
        Room::suite(
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
        )?,
        Room::suite(
            "202",
            12000,
            3,
            "Junior suite",
            SuiteFeatures {
                jacuzzi: false,
                minibar: true,
                room_service: false,
                interconnected_rooms: 1,
            },
        )?,
    ])
}

/// The demo customer every fresh desk can book against.
fn demo_customer() -> ValidationResult<Customer> {
    Customer::new(
        "Ana García",
        "ana.garcia@example.com",
        Some("+34 600 111 222".to_string()),
        Some("Calle Mayor 1, Madrid".to_string()),
    )
}

/// Generates one deterministic standard room for bulk seeding.
///
/// Used by the seed binary to grow the demo property beyond the curated
/// floors: room numbers follow `{floor}{index:02}` and the features cycle so
/// the inventory isn't uniform.
pub fn generate_standard_room(floor: u32, index: u32) -> ValidationResult<Room> {
    let number = format!("{floor}{index:02}");
    let seed = (floor * 100 + index) as i64;

    // $55.00 - $94.99, stepping by floor and position
    let rate_cents = 5500 + (seed * 17) % 4000;
    let capacity = 1 + seed % 3;

    Room::standard(
        number,
        rate_cents,
        capacity,
        format!("Standard room, floor {floor}"),
        StandardFeatures {
            exterior_view: seed % 2 == 0,
            air_conditioning: seed % 3 != 0,
            heating: true,
        },
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(seed_demo_data(&db).await.unwrap());
        assert_eq!(db.rooms().count().await.unwrap(), 5);
        assert_eq!(db.customers().count().await.unwrap(), 1);

        // Second run is a no-op
        assert!(!seed_demo_data(&db).await.unwrap());
        assert_eq!(db.rooms().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_demo_suite_is_bookable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        let suite = db.rooms().get("201").await.unwrap().unwrap();
        assert_eq!(suite.max_capacity, 4);
        assert_eq!(suite.nightly_rate_cents, 15000);
        assert!(suite.available);
    }

    #[test]
    fn test_generated_rooms_are_valid_and_distinct() {
        let a = generate_standard_room(3, 1).unwrap();
        let b = generate_standard_room(3, 2).unwrap();

        assert_eq!(a.number, "301");
        assert_eq!(b.number, "302");
        assert!(a.nightly_rate_cents >= 5500);
        assert!((1..=3).contains(&a.max_capacity));
        assert_ne!(a.nightly_rate_cents, b.nightly_rate_cents);
    }
}
