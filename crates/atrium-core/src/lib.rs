//! # atrium-core: Pure Business Logic for Atrium PMS
//!
//! This crate is the **heart** of Atrium PMS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atrium PMS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 front-desk (Console App)                        │   │
//! │  │    Rooms menu ──► Booking menu ──► Check-in ──► Check-out      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Application Services                         │   │
//! │  │    CustomerService, BookingService (orchestration + locks)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atrium-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │  │  types  │ │ pricing │ │ reservation │ │ checkin │ │checkout│ │   │
//! │  │  │  Room   │ │ quotes  │ │  lifecycle  │ │ roster  │ │ ledger │ │   │
//! │  │  │Customer │ │ comfort │ │   machine   │ │ ceiling │ │ settle │ │   │
//! │  │  └─────────┘ └─────────┘ └─────────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    atrium-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Room, Customer, Guest, status enums)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Nightly quotes, suite surcharges, comfort checks
//! - [`reservation`] - The reservation lifecycle state machine
//! - [`checkin`] - The guest roster opened when a stay begins
//! - [`checkout`] - The bill settled when a stay ends
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atrium_core::money::Money;
//! use atrium_core::pricing::base_price;
//! use atrium_core::types::{Room, SuiteFeatures};
//!
//! let suite = Room::suite(
//!     "201",
//!     15000, // $150.00/night, never a float
//!     4,
//!     "Executive suite",
//!     SuiteFeatures {
//!         jacuzzi: true,
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! // The jacuzzi adds a flat $50.00 to the nightly quote
//! assert_eq!(base_price(&suite), Money::from_cents(20000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkin;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reservation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atrium_core::Reservation` instead of
// `use atrium_core::reservation::Reservation`

pub use checkin::CheckIn;
pub use checkout::CheckOut;
pub use error::{CapacityError, CoreError, CoreResult, StateError, ValidationError};
pub use money::Money;
pub use reservation::Reservation;
pub use types::*;
