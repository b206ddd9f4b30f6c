//! # Domain Types
//!
//! Core types for Atrium PMS: rooms, customers, guests, lifecycle states.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Domain Type Map                                  │
//! │                                                                         │
//! │  Customer ────────┐                                                     │
//! │                   ▼                                                     │
//! │  Room ──────► Reservation ──────► CheckIn ──────► CheckOut             │
//! │   │            (snapshot of        (roster of      (stay + services    │
//! │   │             rate/capacity)      Guests)          = grand total)    │
//! │   │                                                                     │
//! │   └── RoomKind::Standard { exterior_view, air_conditioning, heating }  │
//! │       RoomKind::Suite    { jacuzzi, minibar, room_service,             │
//! │                            interconnected_rooms }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One record type per room: the variant-specific attributes live in the
//! [`RoomKind`] payload instead of a type hierarchy, so persistence and
//! listings deal with exactly one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{
    validate_capacity, validate_email, validate_full_name, validate_interconnected_rooms,
    validate_rate_cents, validate_room_number, ValidationResult,
};

// =============================================================================
// Room Type Tag
// =============================================================================

/// Discriminant for the two room families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Standard,
    Suite,
}

// =============================================================================
// Room Feature Payloads
// =============================================================================

/// Attributes specific to standard rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardFeatures {
    /// Window facing the street/garden rather than the interior courtyard.
    pub exterior_view: bool,
    pub air_conditioning: bool,
    pub heating: bool,
}

/// Attributes specific to suites.
///
/// This is a plain configuration struct: name the features you want, take
/// defaults for the rest.
///
/// ## Example
/// ```rust
/// use atrium_core::types::SuiteFeatures;
///
/// let features = SuiteFeatures {
///     jacuzzi: true,
///     room_service: true,
///     ..Default::default()
/// };
/// assert!(!features.minibar);
/// assert_eq!(features.interconnected_rooms, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteFeatures {
    pub jacuzzi: bool,
    pub minibar: bool,
    pub room_service: bool,
    /// How many rooms the suite spans, counting itself. Always >= 1.
    pub interconnected_rooms: i64,
}

impl Default for SuiteFeatures {
    fn default() -> Self {
        SuiteFeatures {
            jacuzzi: false,
            minibar: false,
            room_service: false,
            interconnected_rooms: 1,
        }
    }
}

/// The variant payload carried by every [`Room`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomKind {
    Standard(StandardFeatures),
    Suite(SuiteFeatures),
}

impl RoomKind {
    /// Returns the discriminant tag for this payload.
    #[inline]
    pub fn room_type(&self) -> RoomType {
        match self {
            RoomKind::Standard(_) => RoomType::Standard,
            RoomKind::Suite(_) => RoomType::Suite,
        }
    }
}

// =============================================================================
// Room
// =============================================================================

/// A rentable room.
///
/// One record for both families; [`RoomKind`] carries what differs. The room
/// number is the business key (what operators type), the rate is integer
/// cents, and `available` flips as stays begin and end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room number - business identifier, unique per property.
    pub number: String,

    /// Nightly rate in cents (smallest currency unit).
    pub nightly_rate_cents: i64,

    /// Maximum number of guests the room sleeps.
    pub max_capacity: i64,

    /// Whether the room can currently be booked.
    pub available: bool,

    /// Free-form description shown in listings.
    pub description: String,

    /// Family-specific attributes.
    pub kind: RoomKind,

    /// When the room was registered.
    pub created_at: DateTime<Utc>,

    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room after validating number, rate, capacity, and the
    /// variant payload. Rooms start available.
    pub fn new(
        number: impl Into<String>,
        nightly_rate_cents: i64,
        max_capacity: i64,
        description: impl Into<String>,
        kind: RoomKind,
    ) -> ValidationResult<Self> {
        let number = number.into();
        validate_room_number(&number)?;
        validate_rate_cents(nightly_rate_cents)?;
        validate_capacity(max_capacity)?;
        if let RoomKind::Suite(features) = &kind {
            validate_interconnected_rooms(features.interconnected_rooms)?;
        }

        let now = Utc::now();
        Ok(Room {
            number: number.trim().to_string(),
            nightly_rate_cents,
            max_capacity,
            available: true,
            description: description.into(),
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    /// Convenience constructor for a standard room.
    pub fn standard(
        number: impl Into<String>,
        nightly_rate_cents: i64,
        max_capacity: i64,
        description: impl Into<String>,
        features: StandardFeatures,
    ) -> ValidationResult<Self> {
        Room::new(
            number,
            nightly_rate_cents,
            max_capacity,
            description,
            RoomKind::Standard(features),
        )
    }

    /// Convenience constructor for a suite.
    pub fn suite(
        number: impl Into<String>,
        nightly_rate_cents: i64,
        max_capacity: i64,
        description: impl Into<String>,
        features: SuiteFeatures,
    ) -> ValidationResult<Self> {
        Room::new(
            number,
            nightly_rate_cents,
            max_capacity,
            description,
            RoomKind::Suite(features),
        )
    }

    /// Returns the discriminant tag.
    #[inline]
    pub fn room_type(&self) -> RoomType {
        self.kind.room_type()
    }

    /// Returns the nightly rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.nightly_rate_cents)
    }

    /// Updates the nightly rate. Existing reservations keep the rate they
    /// snapshotted at booking time.
    pub fn set_nightly_rate(&mut self, cents: i64) -> ValidationResult<()> {
        validate_rate_cents(cents)?;
        self.nightly_rate_cents = cents;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Updates the maximum capacity. Existing reservations keep the capacity
    /// they snapshotted at booking time.
    pub fn set_max_capacity(&mut self, capacity: i64) -> ValidationResult<()> {
        validate_capacity(capacity)?;
        self.max_capacity = capacity;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the room occupied (a stay is active or booked into it).
    pub fn mark_occupied(&mut self) {
        self.available = false;
        self.updated_at = Utc::now();
    }

    /// Marks the room available for booking again.
    pub fn mark_available(&mut self) {
        self.available = true;
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer profile: the person who books and pays.
///
/// Distinct from [`Guest`]: the customer owns reservations; guests are the
/// people actually sleeping in the room, listed on the check-in roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full display name.
    pub full_name: String,

    /// Contact email - unique lookup key among customers.
    pub email: String,

    /// Optional contact phone.
    pub phone: Option<String>,

    /// Optional postal address.
    pub address: Option<String>,

    /// Whether the profile is active (deactivation is logical, never a
    /// delete - history keeps pointing at the row).
    pub active: bool,

    /// When the profile was registered.
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an active customer profile after validating name and email.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> ValidationResult<Self> {
        let full_name = full_name.into();
        let email = email.into();
        validate_full_name(&full_name)?;
        validate_email(&email)?;

        let now = Utc::now();
        Ok(Customer {
            id: Uuid::new_v4().to_string(),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone,
            address,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the display name.
    pub fn set_full_name(&mut self, full_name: &str) -> ValidationResult<()> {
        validate_full_name(full_name)?;
        self.full_name = full_name.trim().to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Updates the email. Uniqueness against other customers is the
    /// service's job; this only checks the shape.
    pub fn set_email(&mut self, email: &str) -> ValidationResult<()> {
        validate_email(email)?;
        self.email = email.trim().to_lowercase();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Logical delete: the profile stops appearing in active listings but
    /// reservations keep referencing it.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Guest
// =============================================================================

/// A person on a check-in roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Identity document type ("passport", "id card", ...), free text.
    pub document_type: String,
    pub document_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// The titular guest is the responsible party; exactly one per roster.
    pub titular: bool,
}

impl Guest {
    /// Creates a guest after validating names and document number.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        document_type: impl Into<String>,
        document_number: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
        titular: bool,
    ) -> ValidationResult<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let document_number = document_number.into();
        validate_full_name(&first_name)?;
        validate_full_name(&last_name)?;
        crate::validation::validate_document_number(&document_number)?;

        Ok(Guest {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            document_type: document_type.into(),
            document_number: document_number.trim().to_string(),
            email,
            phone,
            titular,
        })
    }

    /// "First Last" for rosters and logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Reservation Status
// =============================================================================

/// The lifecycle state of a reservation.
///
/// ```text
/// PENDING ──confirm()──► CONFIRMED ──begin_stay()──► IN_PROGRESS
///    │                       │                            │
///    │                       │                       end_stay()
///    └──────cancel()─────────┘                            │
///                │                                        ▼
///                ▼                                    COMPLETED
///            CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed, awaiting arrival.
    Confirmed,
    /// Guest has arrived; stay underway.
    InProgress,
    /// Stay ended and settled.
    Completed,
    /// Cancelled before the stay started.
    Cancelled,
    /// Guest never arrived. No transition currently produces this state;
    /// it exists so reports and imports can represent it.
    NoShow,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

// =============================================================================
// Check-in / Settlement States
// =============================================================================

/// The lifecycle state of a check-in register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    /// Roster open, stay underway.
    Active,
    /// Closed normally by the front office.
    Finalized,
    /// Closed as erroneous.
    Cancelled,
}

impl Default for CheckInStatus {
    fn default() -> Self {
        CheckInStatus::Active
    }
}

/// Whether a check-out ledger has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Ledger open, totals still editable.
    Pending,
    /// Paid; the record is immutable from here on.
    Settled,
}

impl Default for SettlementStatus {
    fn default() -> Self {
        SettlementStatus::Pending
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_room_construction() {
        let room = Room::standard(
            "101",
            8000,
            2,
            "Standard double, street side",
            StandardFeatures {
                exterior_view: true,
                air_conditioning: true,
                heating: true,
            },
        )
        .unwrap();

        assert_eq!(room.number, "101");
        assert_eq!(room.room_type(), RoomType::Standard);
        assert_eq!(room.rate().cents(), 8000);
        assert!(room.available);
    }

    #[test]
    fn test_suite_defaults() {
        let features = SuiteFeatures {
            jacuzzi: true,
            ..Default::default()
        };
        assert!(!features.minibar);
        assert!(!features.room_service);
        assert_eq!(features.interconnected_rooms, 1);

        let suite = Room::suite("201", 15000, 4, "Executive suite", features).unwrap();
        assert_eq!(suite.room_type(), RoomType::Suite);
    }

    #[test]
    fn test_room_validation() {
        let features = StandardFeatures::default();
        assert!(Room::standard("", 8000, 2, "", features).is_err());
        assert!(Room::standard("101", -1, 2, "", features).is_err());
        assert!(Room::standard("101", 8000, 0, "", features).is_err());

        let bad_suite = SuiteFeatures {
            interconnected_rooms: 0,
            ..Default::default()
        };
        assert!(Room::suite("201", 15000, 4, "", bad_suite).is_err());
    }

    #[test]
    fn test_room_setters_revalidate() {
        let mut room = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();

        assert!(room.set_nightly_rate(-5).is_err());
        assert_eq!(room.nightly_rate_cents, 8000);

        room.set_nightly_rate(9000).unwrap();
        assert_eq!(room.nightly_rate_cents, 9000);

        assert!(room.set_max_capacity(0).is_err());
        room.set_max_capacity(3).unwrap();
        assert_eq!(room.max_capacity, 3);
    }

    #[test]
    fn test_room_availability_toggles() {
        let mut room = Room::standard("101", 8000, 2, "", StandardFeatures::default()).unwrap();
        assert!(room.available);
        room.mark_occupied();
        assert!(!room.available);
        room.mark_available();
        assert!(room.available);
    }

    #[test]
    fn test_customer_lifecycle() {
        let mut customer = Customer::new(
            "Ana García",
            "Ana.Garcia@Example.com",
            Some("+34 600 000 000".to_string()),
            None,
        )
        .unwrap();

        // Emails are normalized to lowercase for the uniqueness key
        assert_eq!(customer.email, "ana.garcia@example.com");
        assert!(customer.active);

        customer.deactivate();
        assert!(!customer.active);
    }

    #[test]
    fn test_customer_validation() {
        assert!(Customer::new("", "a@b.com", None, None).is_err());
        assert!(Customer::new("Ana", "not-an-email", None, None).is_err());
    }

    #[test]
    fn test_guest_full_name() {
        let guest = Guest::new("Ana", "García", "passport", "X-1234567", None, None, true).unwrap();
        assert_eq!(guest.full_name(), "Ana García");
        assert!(guest.titular);
    }

    #[test]
    fn test_status_serialization() {
        // Persisted as snake_case strings; the in_progress spelling is load-bearing
        let json = serde_json::to_string(&ReservationStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let json = serde_json::to_string(&ReservationStatus::NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
        let json = serde_json::to_string(&SettlementStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_room_kind_tagged_serialization() {
        let kind = RoomKind::Suite(SuiteFeatures {
            jacuzzi: true,
            minibar: true,
            room_service: true,
            interconnected_rooms: 2,
        });
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"type\":\"suite\""));
        assert!(json.contains("\"interconnectedRooms\":2"));
    }
}
