//! # Repository Module
//!
//! Database repository implementations for Atrium PMS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  BookingService                                                        │
//! │       │                                                                 │
//! │       │  db.reservations().get_by_id("...")                            │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ReservationRepository                                                 │
//! │  ├── insert(&self, reservation)                                        │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_overlapping(&self, room, from, to)                           │
//! │  └── update(&self, reservation)                                        │
//! │       │                                                                 │
//! │       │  SQL Query → Row model → Domain type                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test against an in-memory database                          │
//! │  • SQL is isolated in one place                                        │
//! │  • Services never see sqlx types                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD and email lookup
//! - [`room::RoomRepository`] - Room inventory and availability flag
//! - [`reservation::ReservationRepository`] - Booking CRUD and overlap queries
//! - [`check_in::CheckInRepository`] - Register plus roster persistence
//! - [`check_out::CheckOutRepository`] - Settlement ledger persistence

pub mod check_in;
pub mod check_out;
pub mod customer;
pub mod reservation;
pub mod room;
