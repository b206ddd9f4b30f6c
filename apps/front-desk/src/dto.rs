//! # Data Transfer Objects
//!
//! Snapshot types the services hand to the menu layer.
//!
//! ## Why DTO?
//! - Decouples internal domain model from the presentation contract
//! - Allows selective field exposure plus derived figures (nights, display
//!   strings, quoted base price)
//! - Handles serde rename to camelCase so structured logs and any future
//!   non-console surface share one shape
//!
//! ## Convention
//! Response DTOs are built with `From<&Domain>` and are plain data; request
//! DTOs carry operator input into the services. Neither kind has behavior.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use atrium_core::pricing;
use atrium_core::types::{
    CheckInStatus, Customer, Guest, ReservationStatus, Room, RoomKind, RoomType, SettlementStatus,
};
use atrium_core::{CheckIn, CheckOut, Reservation};

// =============================================================================
// Response DTOs
// =============================================================================

/// Customer profile snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
}

impl From<&Customer> for CustomerDto {
    fn from(c: &Customer) -> Self {
        CustomerDto {
            id: c.id.clone(),
            full_name: c.full_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            address: c.address.clone(),
            active: c.active,
        }
    }
}

/// Room snapshot with the quoted figures the desk reads out.
///
/// `nightly_rate_cents` is the plain rate that flows into reservation totals;
/// `base_price_cents` is the quote including suite surcharges. For standard
/// rooms the two are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub number: String,
    pub room_type: RoomType,
    pub kind: RoomKind,
    pub nightly_rate_cents: i64,
    pub nightly_rate: String,
    pub base_price_cents: i64,
    pub base_price: String,
    pub comfort: bool,
    pub max_capacity: i64,
    pub available: bool,
    pub description: String,
}

impl From<&Room> for RoomDto {
    fn from(r: &Room) -> Self {
        let quote = pricing::base_price(r);
        RoomDto {
            number: r.number.clone(),
            room_type: r.room_type(),
            kind: r.kind,
            nightly_rate_cents: r.nightly_rate_cents,
            nightly_rate: r.rate().to_string(),
            base_price_cents: quote.cents(),
            base_price: quote.to_string(),
            comfort: pricing::is_comfort(r),
            max_capacity: r.max_capacity,
            available: r.available,
            description: r.description.clone(),
        }
    }
}

/// Reservation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: String,
    pub customer_id: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub guest_count: i64,
    pub status: ReservationStatus,
    pub nightly_rate_cents: i64,
    pub total_cents: i64,
    pub total: String,
    pub created_on: NaiveDate,
    pub notes: String,
}

impl From<&Reservation> for ReservationDto {
    fn from(r: &Reservation) -> Self {
        ReservationDto {
            id: r.id.clone(),
            customer_id: r.customer_id.clone(),
            room_number: r.room_number.clone(),
            check_in_date: r.check_in_date,
            check_out_date: r.check_out_date,
            nights: r.nights(),
            guest_count: r.guest_count,
            status: r.status,
            nightly_rate_cents: r.nightly_rate_cents,
            total_cents: r.total_cents,
            total: r.total().to_string(),
            created_on: r.created_on,
            notes: r.notes.clone(),
        }
    }
}

/// Guest roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub titular: bool,
}

impl From<&Guest> for GuestDto {
    fn from(g: &Guest) -> Self {
        GuestDto {
            id: g.id.clone(),
            first_name: g.first_name.clone(),
            last_name: g.last_name.clone(),
            document_type: g.document_type.clone(),
            document_number: g.document_number.clone(),
            email: g.email.clone(),
            phone: g.phone.clone(),
            titular: g.titular,
        }
    }
}

/// Check-in register snapshot including the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDto {
    pub id: String,
    pub reservation_id: String,
    pub room_number: String,
    pub entered_at: DateTime<Utc>,
    pub expected_departure: DateTime<Utc>,
    pub deposit_cents: Option<i64>,
    pub status: CheckInStatus,
    pub capacity: i64,
    pub roster_size: usize,
    pub titular_registered: bool,
    pub guests: Vec<GuestDto>,
    pub notes: Option<String>,
}

impl From<&CheckIn> for CheckInDto {
    fn from(c: &CheckIn) -> Self {
        CheckInDto {
            id: c.id.clone(),
            reservation_id: c.reservation_id.clone(),
            room_number: c.room_number.clone(),
            entered_at: c.entered_at,
            expected_departure: c.expected_departure,
            deposit_cents: c.deposit_cents,
            status: c.status,
            capacity: c.capacity,
            roster_size: c.roster_size(),
            titular_registered: c.titular_registered,
            guests: c.guests.iter().map(GuestDto::from).collect(),
            notes: c.notes.clone(),
        }
    }
}

/// Check-out ledger snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutDto {
    pub id: String,
    pub check_in_id: String,
    pub reservation_id: String,
    pub departed_at: DateTime<Utc>,
    pub stay_total_cents: i64,
    pub services_total_cents: i64,
    pub grand_total_cents: i64,
    pub grand_total: String,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub status: SettlementStatus,
    pub notes: Option<String>,
}

impl From<&CheckOut> for CheckOutDto {
    fn from(c: &CheckOut) -> Self {
        CheckOutDto {
            id: c.id.clone(),
            check_in_id: c.check_in_id.clone(),
            reservation_id: c.reservation_id.clone(),
            departed_at: c.departed_at,
            stay_total_cents: c.stay_total_cents,
            services_total_cents: c.services_total_cents,
            grand_total_cents: c.grand_total_cents,
            grand_total: c.grand_total().to_string(),
            payment_method: c.payment_method.clone(),
            payment_reference: c.payment_reference.clone(),
            status: c.status,
            notes: c.notes.clone(),
        }
    }
}

/// What a successful settlement hands back to the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    pub reservation_id: String,
    pub check_out_id: String,
    pub room_number: String,
    pub nights: i64,
    pub stay_total_cents: i64,
    pub services_total_cents: i64,
    pub grand_total_cents: i64,
    pub grand_total: String,
    pub payment_method: String,
}

// =============================================================================
// Request DTOs
// =============================================================================

/// Input for registering a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomerRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial update for a customer profile. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for creating a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservationRequest {
    pub customer_id: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i64,
    pub notes: Option<String>,
}

/// Partial update for a reservation. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub guest_count: Option<i64>,
    pub notes: Option<String>,
}

/// Input for adding a guest to an open check-in register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuestRequest {
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub titular: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
