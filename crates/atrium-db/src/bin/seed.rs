//! # Seed Data Generator
//!
//! Populates the database with demo rooms and a demo customer for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the curated demo property (5 rooms + 1 customer)
//! cargo run -p atrium-db --bin seed
//!
//! # Also generate extra floors of standard rooms (floors 3..N, 8 rooms each)
//! cargo run -p atrium-db --bin seed -- --floors 6
//!
//! # Specify database path
//! cargo run -p atrium-db --bin seed -- --db ./data/atrium.db
//! ```
//!
//! The seeder is idempotent: a database that already has rooms is left
//! untouched.

use std::env;

use atrium_db::seed::{generate_standard_room, seed_demo_data};
use atrium_db::{Database, DbConfig};

/// Rooms generated per extra floor.
const ROOMS_PER_FLOOR: u32 = 8;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut floors: u32 = 2;
    let mut db_path = String::from("./atrium_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--floors" | "-f" => {
                if i + 1 < args.len() {
                    floors = args[i + 1].parse().unwrap_or(2);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Atrium PMS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --floors <N>   Generate standard rooms up to floor N (default: 2,");
                println!("                     meaning only the curated demo floors are seeded)");
                println!("  -d, --db <PATH>    Database file path (default: ./atrium_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🏨 Atrium PMS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Floors:   {}", floors);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Curated demo property: floors 1-2 plus the demo customer
    if !seed_demo_data(&db).await? {
        let existing = db.rooms().count().await?;
        println!("⚠ Database already has {} rooms", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!("✓ Seeded demo property (rooms 101-103, 201-202)");
    println!("✓ Seeded demo customer");

    // Extra floors of generated standard rooms
    if floors > 2 {
        println!();
        println!("Generating extra floors...");

        let mut generated = 0;
        let start = std::time::Instant::now();

        for floor in 3..=floors {
            for index in 1..=ROOMS_PER_FLOOR {
                let room = generate_standard_room(floor, index)?;
                if let Err(e) = db.rooms().insert(&room).await {
                    eprintln!("Failed to insert room {}: {}", room.number, e);
                    continue;
                }
                generated += 1;
            }
            println!("  Floor {} done ({} rooms)", floor, ROOMS_PER_FLOOR);
        }

        let elapsed = start.elapsed();
        println!();
        println!("✓ Generated {} extra rooms in {:?}", generated, elapsed);
    }

    let total = db.rooms().count().await?;
    println!();
    println!("✓ Seed complete! {} rooms ready to book.", total);

    Ok(())
}
