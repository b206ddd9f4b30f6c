//! # Room Pricing
//!
//! Price quoting and comfort classification for rooms.
//!
//! ## Pricing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      base_price(room)                                   │
//! │                                                                         │
//! │  Standard room:   nightly rate, nothing else                           │
//! │                                                                         │
//! │  Suite:           nightly rate                                         │
//! │                   + $50.00 if jacuzzi                                  │
//! │                   + $30.00 if room service                             │
//! │                   + $40.00 per interconnected room beyond the first    │
//! │                   (minibar never affects price)                        │
//! │                                                                         │
//! │  NOTE: base_price is the per-night QUOTE. Reservation totals use the   │
//! │  plain nightly rate - see `Reservation::recompute_total`.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: no error paths, no I/O, no clock.

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{Room, RoomKind};

// =============================================================================
// Surcharge Constants
// =============================================================================

/// Per-night surcharge a jacuzzi adds to a suite's quoted price.
///
/// ## Note
/// Applied once to the quote, never multiplied by stay length anywhere in
/// the engine.
pub const JACUZZI_SURCHARGE_CENTS: i64 = 5000;

/// Per-night surcharge for suites offering room service.
pub const ROOM_SERVICE_SURCHARGE_CENTS: i64 = 3000;

/// Surcharge per interconnected room beyond the first.
///
/// A suite spanning 2 rooms quotes one extra-room surcharge, 3 rooms quote
/// two, and so on.
pub const EXTRA_ROOM_SURCHARGE_CENTS: i64 = 4000;

// =============================================================================
// Quoting
// =============================================================================

/// Quotes the per-night base price for a room.
///
/// ## Example
/// ```rust
/// use atrium_core::pricing::base_price;
/// use atrium_core::types::{Room, SuiteFeatures};
///
/// let suite = Room::suite("201", 15000, 4, "", SuiteFeatures {
///     jacuzzi: true,
///     room_service: true,
///     interconnected_rooms: 2,
///     ..Default::default()
/// }).unwrap();
///
/// // $150.00 + $50.00 + $30.00 + $40.00 = $270.00
/// assert_eq!(base_price(&suite).cents(), 27000);
/// ```
pub fn base_price(room: &Room) -> Money {
    let rate = room.rate();
    match &room.kind {
        RoomKind::Standard(_) => rate,
        RoomKind::Suite(features) => {
            let mut price = rate;
            if features.jacuzzi {
                price += Money::from_cents(JACUZZI_SURCHARGE_CENTS);
            }
            if features.room_service {
                price += Money::from_cents(ROOM_SERVICE_SURCHARGE_CENTS);
            }
            if features.interconnected_rooms > 1 {
                price += Money::from_cents(EXTRA_ROOM_SURCHARGE_CENTS)
                    * (features.interconnected_rooms - 1);
            }
            price
        }
    }
}

/// Classifies a room as comfortable.
///
/// ## Rules
/// - Standard: air conditioning AND heating
/// - Suite: jacuzzi AND minibar AND room service, all three
pub fn is_comfort(room: &Room) -> bool {
    match &room.kind {
        RoomKind::Standard(features) => features.air_conditioning && features.heating,
        RoomKind::Suite(features) => {
            features.jacuzzi && features.minibar && features.room_service
        }
    }
}

// =============================================================================
// Stay Cost
// =============================================================================

/// Whole nights between two dates (calendar-day difference).
///
/// Same-day in/out is zero nights. A reversed range goes negative; callers
/// that care validate ordering first.
#[inline]
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Cost of a stay: nightly rate × whole nights.
///
/// ## Example
/// ```rust
/// use atrium_core::money::Money;
/// use atrium_core::pricing::stay_cost;
/// use chrono::NaiveDate;
///
/// let rate = Money::from_cents(8000); // $80.00
/// let jun1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let jun4 = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
///
/// // 3 nights at $80.00 = $240.00
/// assert_eq!(stay_cost(rate, jun1, jun4).cents(), 24000);
/// ```
#[inline]
pub fn stay_cost(nightly_rate: Money, check_in: NaiveDate, check_out: NaiveDate) -> Money {
    nightly_rate.multiply_nights(nights_between(check_in, check_out))
}

// =============================================================================
// Unit Tests
// =============================================================================
