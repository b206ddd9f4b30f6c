//! # Atrium Front Desk Library
//!
//! Core library for the Atrium PMS front desk application.
//! This is the main entry point that wires the database, the services and
//! the operator menu together.
//!
//! ## Module Organization
//! ```text
//! front_desk_lib/
//! ├── lib.rs                  ◄─── You are here (startup & wiring)
//! ├── services/
//! │   ├── mod.rs              ◄─── Service exports
//! │   ├── customer_service.rs ◄─── Customer profiles
//! │   └── booking_service.rs  ◄─── Reservations, check-in/out
//! ├── menu.rs                 ◄─── Operator menu loop (stdin/stdout)
//! ├── dto.rs                  ◄─── DTO snapshots the menu renders
//! └── error.rs                ◄─── App error type (code + message)
//! ```

pub mod dto;
pub mod error;
pub mod menu;
pub mod services;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use atrium_db::{Database, DbConfig};
use services::{BookingService, CustomerService};

/// Runs the front desk application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Determine Database Path ──────────────────────────────────────────► │
/// │     • macOS: ~/Library/Application Support/com.atrium.pms/atrium.db     │
/// │     • Windows: %APPDATA%\atrium\pms\atrium.db                           │
/// │     • Linux: ~/.local/share/atrium-pms/atrium.db                        │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Seed Demo Data (first run only) ──────────────────────────────────► │
/// │     • A handful of rooms and a demo customer                            │
/// │                                                                         │
/// │  5. Build Services & Run the Menu Loop ───────────────────────────────► │
/// │     • CustomerService and BookingService over one pool                  │
/// │     • Operator menu on stdin/stdout until quit                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Atrium PMS Front Desk");

    let db_path = database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    if atrium_db::seed::seed_demo_data(&db).await? {
        info!("Demo data seeded (first run)");
    }

    let customers = CustomerService::new(db.clone());
    let booking = BookingService::new(db);
    info!("Services initialized");

    menu::run_loop(&customers, &booking).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atrium=trace` - Show trace for atrium crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atrium=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.atrium.pms/atrium.db`
/// - **Windows**: `%APPDATA%\atrium\pms\atrium.db`
/// - **Linux**: `~/.local/share/atrium-pms/atrium.db`
///
/// ## Development Override
/// Set `ATRIUM_DB_PATH` environment variable to use a custom path.
fn database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Check for override
    if let Ok(path) = std::env::var("ATRIUM_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    // Use platform-specific app data directory
    let proj_dirs = ProjectDirs::from("com", "atrium", "pms")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("atrium.db"))
}
