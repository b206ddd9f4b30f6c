//! # Atrium Front Desk Entry Point
//!
//! This is the main entry point for the front desk console application.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atrium PMS Front Desk                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Operator Terminal                             │  │
//! │  │  • Room inventory & quotes     • Reservations                    │  │
//! │  │  • Customer registration       • Check-in / roster               │  │
//! │  │  • Availability search         • Check-out / settlement          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                          menu loop (stdin)                              │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Starts the tokio runtime                         │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► Logging, database, seeding, service wiring       │  │
//! │  │                                                                  │  │
//! │  │  services/ ──► CustomerService, BookingService                  │  │
//! │  │                                                                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  atrium.db (local file, WAL mode)                                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for better testability
    front_desk_lib::run().await
}
