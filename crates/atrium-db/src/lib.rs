//! # atrium-db: Database Layer for Atrium PMS
//!
//! This crate provides database access for the Atrium property management
//! system. It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atrium PMS Data Flow                             │
//! │                                                                         │
//! │  BookingService (create_reservation)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     atrium-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (room.rs ...) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ RoomRepo      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │◄───│ ReservationRpo│    │ ...          │  │   │
//! │  │   │ Management    │    │ CheckInRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │        ~/.local/share/atrium-pms/atrium.db (or in-memory)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`models`] - Table-shaped row structs bridging SQL and domain types
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (room, reservation, etc.)
//! - [`seed`] - Idempotent demo data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atrium_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/atrium.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let free_rooms = db.rooms().list_available().await?;
//! let booking = db.reservations().get_by_id("uuid-here").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::check_in::CheckInRepository;
pub use repository::check_out::CheckOutRepository;
pub use repository::customer::CustomerRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::room::RoomRepository;
