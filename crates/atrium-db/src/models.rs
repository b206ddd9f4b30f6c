//! # Row Models
//!
//! Flat structs matching the SQLite schema one column per field, decoded with
//! `sqlx::FromRow` and converted to/from the domain types in `atrium-core`.
//!
//! ## Why Not Decode Domain Types Directly
//! The domain types are not table-shaped: `Room` nests its features in a
//! `RoomKind` enum while the `rooms` table flattens them into columns, and
//! `CheckIn` owns its roster while the guests live in their own table. A row
//! model per table keeps the SQL mapping in one place and keeps sqlx details
//! out of `atrium-core`.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use atrium_core::checkin::CheckIn;
use atrium_core::checkout::CheckOut;
use atrium_core::reservation::Reservation;
use atrium_core::types::{
    CheckInStatus, Customer, Guest, ReservationStatus, Room, RoomKind, RoomType,
    SettlementStatus, StandardFeatures, SuiteFeatures,
};

// =============================================================================
// Customers
// =============================================================================

/// One row of the `customers` table.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    /// UUID primary key.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Unique, normalized to lowercase by the domain layer.
    pub email: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// False once deactivated; deactivated customers cannot book.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Rooms
// =============================================================================

/// One row of the `rooms` table, features flattened.
///
/// `room_type` says which feature columns are meaningful; the other family's
/// columns are stored at their defaults and ignored on load.
#[derive(Debug, Clone, FromRow)]
pub struct RoomRow {
    /// Room number, the natural primary key.
    pub number: String,
    /// Which feature family applies.
    pub room_type: RoomType,
    /// Nightly rate in cents.
    pub nightly_rate_cents: i64,
    /// How many guests the room sleeps.
    pub max_capacity: i64,
    /// False while a stay occupies the room.
    pub available: bool,
    /// Free-form description.
    pub description: String,
    pub exterior_view: bool,
    pub air_conditioning: bool,
    pub heating: bool,
    pub jacuzzi: bool,
    pub minibar: bool,
    pub room_service: bool,
    pub interconnected_rooms: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Room> for RoomRow {
    fn from(room: &Room) -> Self {
        let mut row = RoomRow {
            number: room.number.clone(),
            room_type: room.room_type(),
            nightly_rate_cents: room.nightly_rate_cents,
            max_capacity: room.max_capacity,
            available: room.available,
            description: room.description.clone(),
            exterior_view: false,
            air_conditioning: false,
            heating: false,
            jacuzzi: false,
            minibar: false,
            room_service: false,
            interconnected_rooms: 1,
            created_at: room.created_at,
            updated_at: room.updated_at,
        };
        match &room.kind {
            RoomKind::Standard(features) => {
                row.exterior_view = features.exterior_view;
                row.air_conditioning = features.air_conditioning;
                row.heating = features.heating;
            }
            RoomKind::Suite(features) => {
                row.jacuzzi = features.jacuzzi;
                row.minibar = features.minibar;
                row.room_service = features.room_service;
                row.interconnected_rooms = features.interconnected_rooms;
            }
        }
        row
    }
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        let kind = match row.room_type {
            RoomType::Standard => RoomKind::Standard(StandardFeatures {
                exterior_view: row.exterior_view,
                air_conditioning: row.air_conditioning,
                heating: row.heating,
            }),
            RoomType::Suite => RoomKind::Suite(SuiteFeatures {
                jacuzzi: row.jacuzzi,
                minibar: row.minibar,
                room_service: row.room_service,
                interconnected_rooms: row.interconnected_rooms,
            }),
        };
        Room {
            number: row.number,
            nightly_rate_cents: row.nightly_rate_cents,
            max_capacity: row.max_capacity,
            available: row.available,
            description: row.description,
            kind,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// One row of the `reservations` table. Maps 1:1 onto [`Reservation`].
#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    /// UUID primary key.
    pub id: String,
    /// Booking customer.
    pub customer_id: String,
    /// Booked room.
    pub room_number: String,
    /// Rate snapshot taken at booking time.
    pub nightly_rate_cents: i64,
    /// Capacity snapshot taken at booking time.
    pub room_capacity: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i64,
    pub status: ReservationStatus,
    /// Plain rate × nights, in cents.
    pub total_cents: i64,
    pub created_on: NaiveDate,
    pub notes: String,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            customer_id: row.customer_id,
            room_number: row.room_number,
            nightly_rate_cents: row.nightly_rate_cents,
            room_capacity: row.room_capacity,
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            guest_count: row.guest_count,
            status: row.status,
            total_cents: row.total_cents,
            created_on: row.created_on,
            notes: row.notes,
        }
    }
}

// =============================================================================
// Check-In Registers
// =============================================================================

/// One row of the `check_ins` table, without its roster.
///
/// The roster lives in `check_in_guests`; [`CheckInRow::into_check_in`]
/// reassembles the full register.
#[derive(Debug, Clone, FromRow)]
pub struct CheckInRow {
    /// UUID primary key.
    pub id: String,
    /// Owning reservation (unique: one register per reservation).
    pub reservation_id: String,
    pub room_number: String,
    pub entered_at: DateTime<Utc>,
    pub expected_departure: DateTime<Utc>,
    pub deposit_cents: Option<i64>,
    pub notes: Option<String>,
    pub status: CheckInStatus,
    /// Roster ceiling.
    pub capacity: i64,
    pub titular_registered: bool,
}

impl CheckInRow {
    /// Combines the register row with its roster rows, which must already be
    /// in `position` order.
    pub fn into_check_in(self, guests: Vec<GuestRow>) -> CheckIn {
        CheckIn {
            id: self.id,
            reservation_id: self.reservation_id,
            room_number: self.room_number,
            entered_at: self.entered_at,
            expected_departure: self.expected_departure,
            deposit_cents: self.deposit_cents,
            guests: guests.into_iter().map(Guest::from).collect(),
            notes: self.notes,
            status: self.status,
            capacity: self.capacity,
            titular_registered: self.titular_registered,
        }
    }
}

/// One row of the `check_in_guests` table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestRow {
    /// UUID primary key.
    pub id: String,
    /// Owning register.
    pub check_in_id: String,
    /// Registration order within the roster.
    pub position: i64,
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub titular: bool,
}

impl GuestRow {
    /// Builds the row for one roster line.
    pub fn from_guest(check_in_id: &str, position: i64, guest: &Guest) -> Self {
        GuestRow {
            id: guest.id.clone(),
            check_in_id: check_in_id.to_string(),
            position,
            first_name: guest.first_name.clone(),
            last_name: guest.last_name.clone(),
            document_type: guest.document_type.clone(),
            document_number: guest.document_number.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            titular: guest.titular,
        }
    }
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Guest {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            document_type: row.document_type,
            document_number: row.document_number,
            email: row.email,
            phone: row.phone,
            titular: row.titular,
        }
    }
}

// =============================================================================
// Check-Out Ledgers
// =============================================================================

/// One row of the `check_outs` table. Maps 1:1 onto [`CheckOut`].
#[derive(Debug, Clone, FromRow)]
pub struct CheckOutRow {
    /// UUID primary key.
    pub id: String,
    /// Owning register (unique: one ledger per register).
    pub check_in_id: String,
    /// Owning reservation (unique as well).
    pub reservation_id: String,
    pub departed_at: DateTime<Utc>,
    pub stay_total_cents: i64,
    pub services_total_cents: i64,
    pub grand_total_cents: i64,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub status: SettlementStatus,
}

impl From<CheckOutRow> for CheckOut {
    fn from(row: CheckOutRow) -> Self {
        CheckOut {
            id: row.id,
            check_in_id: row.check_in_id,
            reservation_id: row.reservation_id,
            departed_at: row.departed_at,
            stay_total_cents: row.stay_total_cents,
            services_total_cents: row.services_total_cents,
            grand_total_cents: row.grand_total_cents,
            notes: row.notes,
            payment_method: row.payment_method,
            payment_reference: row.payment_reference,
            status: row.status,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_row_roundtrip_keeps_suite_features() {
        let suite = Room::suite(
            "201",
            15000,
            4,
            "Executive suite",
            SuiteFeatures {
                jacuzzi: true,
                minibar: true,
                room_service: false,
                interconnected_rooms: 2,
            },
        )
        .unwrap();

        let row = RoomRow::from(&suite);
        assert_eq!(row.room_type, RoomType::Suite);
        assert!(row.jacuzzi);
        assert_eq!(row.interconnected_rooms, 2);
        // Standard columns stay at their defaults
        assert!(!row.air_conditioning);

        let back = Room::from(row);
        assert_eq!(back.kind, suite.kind);
        assert_eq!(back.nightly_rate_cents, 15000);
    }

    #[test]
    fn test_room_row_roundtrip_keeps_standard_features() {
        let standard = Room::standard(
            "101",
            8000,
            2,
            "Standard double",
            StandardFeatures {
                exterior_view: true,
                air_conditioning: true,
                heating: false,
            },
        )
        .unwrap();

        let row = RoomRow::from(&standard);
        assert_eq!(row.room_type, RoomType::Standard);
        assert!(row.exterior_view);
        assert!(!row.jacuzzi);

        let back = Room::from(row);
        assert_eq!(back.kind, standard.kind);
    }

    #[test]
    fn test_guest_row_keeps_roster_position() {
        let guest = Guest::new("Luis", "Mora", "passport", "X-12345", None, None, true).unwrap();
        let row = GuestRow::from_guest("checkin-1", 3, &guest);

        assert_eq!(row.check_in_id, "checkin-1");
        assert_eq!(row.position, 3);
        assert!(row.titular);

        let back = Guest::from(row);
        assert_eq!(back.id, guest.id);
        assert_eq!(back.full_name(), "Luis Mora");
    }
}
