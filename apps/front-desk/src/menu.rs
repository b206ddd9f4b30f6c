//! # Operator Menu
//!
//! The looped text menu the front desk runs on. Operator input arrives over
//! stdin, answers go to stdout, diagnostics go to tracing.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  🏨 Atrium PMS Front Desk                                               │
//! │                                                                         │
//! │   Rooms                       Reservations                              │
//! │    1) List rooms               6) Create reservation                    │
//! │    2) Available rooms          7) List reservations                     │
//! │    3) Register room            8) Confirm reservation                   │
//! │                                9) Cancel reservation                    │
//! │   Customers                   14) Check availability                    │
//! │    4) Register customer                                                 │
//! │    5) List customers          Stay                                      │
//! │                               10) Check in                              │
//! │                               11) Add guest to roster                   │
//! │                               12) View register                         │
//! │                               13) Settle check-out                      │
//! │                                                                         │
//! │    0) Quit                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler prints its outcome and returns to the menu; errors never
//! tear the loop down.

use std::io::{self, Write};

use chrono::NaiveDate;
use tracing::debug;

use atrium_core::types::{Room, RoomType, StandardFeatures, SuiteFeatures};
use atrium_core::Money;

use crate::dto::{
    CheckInDto, NewCustomerRequest, NewGuestRequest, NewReservationRequest, ReservationDto,
    RoomDto,
};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::services::{BookingService, CustomerService};

/// Runs the menu loop until the operator quits or stdin closes.
pub async fn run_loop(
    customers: &CustomerService,
    booking: &BookingService,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🏨 Atrium PMS Front Desk");
    println!("========================");

    loop {
        print_menu();

        let mut raw = String::new();
        print!("> ");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut raw)? == 0 {
            // stdin closed
            break;
        }
        let choice = raw.trim();
        debug!(choice = %choice, "menu selection");

        let result = match choice {
            "1" => show_rooms(booking, false).await,
            "2" => show_rooms(booking, true).await,
            "3" => register_room(booking).await,
            "4" => register_customer(customers).await,
            "5" => list_customers(customers).await,
            "6" => create_reservation(customers, booking).await,
            "7" => list_reservations(booking).await,
            "8" => confirm_reservation(booking).await,
            "9" => cancel_reservation(booking).await,
            "10" => check_in(booking).await,
            "11" => add_guest(booking).await,
            "12" => view_register(booking).await,
            "13" => settle_check_out(booking).await,
            "14" => check_availability(booking).await,
            "0" | "q" => break,
            "" => continue,
            other => {
                println!("  Unknown option '{}'", other);
                continue;
            }
        };

        if let Err(err) = result {
            print_error(&err);
        }
        println!();
    }

    println!("Goodbye.");
    Ok(())
}

fn print_menu() {
    println!();
    println!(" Rooms                      Reservations");
    println!("  1) List rooms              6) Create reservation");
    println!("  2) Available rooms         7) List reservations");
    println!("  3) Register room           8) Confirm reservation");
    println!("                             9) Cancel reservation");
    println!(" Customers                  14) Check availability");
    println!("  4) Register customer");
    println!("  5) List customers         Stay");
    println!("                            10) Check in");
    println!("                            11) Add guest to roster");
    println!("                            12) View register");
    println!("                            13) Settle check-out");
    println!();
    println!("  0) Quit");
}

/// Prints an error with operator-friendly wording for the common codes.
fn print_error(err: &AppError) {
    match err.code {
        ErrorCode::RoomFull => println!("✗ Room full: {}", err.message),
        ErrorCode::RoomUnavailable => {
            println!("✗ {} (try the availability search)", err.message)
        }
        _ => println!("✗ {}", err),
    }
}

// =============================================================================
// Room handlers
// =============================================================================

async fn show_rooms(booking: &BookingService, only_available: bool) -> AppResult<()> {
    let rooms = if only_available {
        booking.list_available_rooms().await?
    } else {
        booking.list_rooms().await?
    };
    if rooms.is_empty() {
        println!("  No rooms.");
        return Ok(());
    }
    for room in &rooms {
        print_room(room);
    }
    Ok(())
}

fn print_room(room: &RoomDto) {
    let kind = match room.room_type {
        RoomType::Standard => "standard",
        RoomType::Suite => "suite",
    };
    let state = if room.available { "available" } else { "occupied " };
    let comfort = if room.comfort { "  [comfort]" } else { "" };
    println!(
        "  {:<6} {:<8} {:>9}/night  quote {:>9}  sleeps {}  {}  {}{}",
        room.number,
        kind,
        room.nightly_rate,
        room.base_price,
        room.max_capacity,
        state,
        room.description,
        comfort
    );
}

async fn register_room(booking: &BookingService) -> AppResult<()> {
    let number = read_line("Room number: ")?;
    let kind = read_line("Type (standard/suite): ")?;
    let rate_cents = parse_cents(&read_line("Nightly rate ($): ")?)?;
    let capacity = parse_count(&read_line("Max capacity: ")?)?;
    let description = read_line("Description: ")?;

    let room = match kind.to_lowercase().as_str() {
        "suite" | "s" => {
            let features = SuiteFeatures {
                jacuzzi: read_bool("Jacuzzi? (y/n): ")?,
                minibar: read_bool("Minibar? (y/n): ")?,
                room_service: read_bool("Room service? (y/n): ")?,
                interconnected_rooms: match read_optional("Interconnected rooms [1]: ")? {
                    Some(count) => parse_count(&count)?,
                    None => 1,
                },
            };
            Room::suite(number, rate_cents, capacity, description, features)?
        }
        _ => {
            let features = StandardFeatures {
                exterior_view: read_bool("Exterior view? (y/n): ")?,
                air_conditioning: read_bool("Air conditioning? (y/n): ")?,
                heating: read_bool("Heating? (y/n): ")?,
            };
            Room::standard(number, rate_cents, capacity, description, features)?
        }
    };

    let dto = booking.register_room(room).await?;
    println!("✓ Room {} registered, quote {}/night", dto.number, dto.base_price);
    Ok(())
}

// =============================================================================
// Customer handlers
// =============================================================================

async fn register_customer(customers: &CustomerService) -> AppResult<()> {
    let request = NewCustomerRequest {
        full_name: read_line("Full name: ")?,
        email: read_line("Email: ")?,
        phone: read_optional("Phone (optional): ")?,
        address: read_optional("Address (optional): ")?,
    };
    let dto = customers.register(request).await?;
    println!("✓ Customer {} registered ({})", dto.full_name, dto.email);
    Ok(())
}

async fn list_customers(customers: &CustomerService) -> AppResult<()> {
    let list = customers.list_active().await?;
    if list.is_empty() {
        println!("  No active customers.");
        return Ok(());
    }
    for customer in &list {
        let phone = customer.phone.as_deref().unwrap_or("-");
        println!(
            "  {:<30} <{}>  {}",
            customer.full_name, customer.email, phone
        );
    }
    Ok(())
}

// =============================================================================
// Reservation handlers
// =============================================================================

async fn create_reservation(
    customers: &CustomerService,
    booking: &BookingService,
) -> AppResult<()> {
    let email = read_line("Customer email: ")?;
    let customer = customers
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("Customer", &email))?;

    let request = NewReservationRequest {
        customer_id: customer.id,
        room_number: read_line("Room number: ")?,
        check_in_date: parse_date(&read_line("Check-in date (YYYY-MM-DD): ")?)?,
        check_out_date: parse_date(&read_line("Check-out date (YYYY-MM-DD): ")?)?,
        guest_count: parse_count(&read_line("Guests: ")?)?,
        notes: read_optional("Notes (optional): ")?,
    };

    let dto = booking.create_reservation(request).await?;
    println!(
        "✓ Reservation {} created: room {}, {} night(s), total {}",
        short(&dto.id),
        dto.room_number,
        dto.nights,
        dto.total
    );
    println!("  Confirm it to lock the booking in.");
    Ok(())
}

async fn list_reservations(booking: &BookingService) -> AppResult<()> {
    let list = booking.list_reservations().await?;
    if list.is_empty() {
        println!("  No reservations.");
        return Ok(());
    }
    for reservation in &list {
        print_reservation(reservation);
    }
    Ok(())
}

fn print_reservation(r: &ReservationDto) {
    println!(
        "  {}  room {:<6} {} → {}  {} night(s)  {} guest(s)  {:<11} {}",
        short(&r.id),
        r.room_number,
        r.check_in_date,
        r.check_out_date,
        r.nights,
        r.guest_count,
        format!("{:?}", r.status),
        r.total
    );
}

async fn confirm_reservation(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let dto = booking.confirm_reservation(&id).await?;
    println!("✓ Reservation {} confirmed", short(&dto.id));
    Ok(())
}

async fn cancel_reservation(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let reason = read_optional("Reason (optional): ")?;
    let dto = booking.cancel_reservation(&id, reason.as_deref()).await?;
    println!(
        "✓ Reservation {} cancelled, room {} freed",
        short(&dto.id),
        dto.room_number
    );
    Ok(())
}

async fn check_availability(booking: &BookingService) -> AppResult<()> {
    let room = read_line("Room number: ")?;
    let from = parse_date(&read_line("From (YYYY-MM-DD): ")?)?;
    let to = parse_date(&read_line("To (YYYY-MM-DD): ")?)?;

    if booking.check_availability(&room, from, to).await? {
        println!("✓ Room {} is clear of reservations from {} to {}", room, from, to);
    } else {
        println!("✗ Room {} clashes with an existing reservation in that window", room);
    }
    Ok(())
}

// =============================================================================
// Stay handlers
// =============================================================================

async fn check_in(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let deposit = match read_optional("Security deposit ($, optional): ")? {
        Some(amount) => Some(parse_cents(&amount)?),
        None => None,
    };

    let register = booking.check_in(&id, deposit).await?;
    println!("✓ Checked in. Register {} opened for room {}", short(&register.id), register.room_number);
    print_roster(&register);
    Ok(())
}

async fn add_guest(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let document_type = match read_optional("Document type [id card]: ")? {
        Some(kind) => kind,
        None => "id card".to_string(),
    };
    let request = NewGuestRequest {
        first_name: read_line("First name: ")?,
        last_name: read_line("Last name: ")?,
        document_type,
        document_number: read_line("Document number: ")?,
        email: read_optional("Email (optional): ")?,
        phone: read_optional("Phone (optional): ")?,
        titular: read_bool("Titular guest? (y/n): ")?,
    };

    let register = booking.add_guest(&id, request).await?;
    println!("✓ Guest added.");
    print_roster(&register);
    Ok(())
}

async fn view_register(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let register = booking.get_check_in(&id).await?;
    println!(
        "  Register {} for room {} ({:?})",
        short(&register.id),
        register.room_number,
        register.status
    );
    println!(
        "  Entered {}  expected departure {}",
        register.entered_at.format("%Y-%m-%d %H:%M"),
        register.expected_departure.format("%Y-%m-%d")
    );
    if let Some(cents) = register.deposit_cents {
        println!("  Deposit {}", Money::from_cents(cents));
    }
    print_roster(&register);
    Ok(())
}

fn print_roster(register: &CheckInDto) {
    println!("  Roster {}/{}:", register.roster_size, register.capacity);
    for guest in &register.guests {
        let titular = if guest.titular { "  [titular]" } else { "" };
        println!(
            "    {} {} ({} {}){}",
            guest.first_name, guest.last_name, guest.document_type, guest.document_number, titular
        );
    }
}

async fn settle_check_out(booking: &BookingService) -> AppResult<()> {
    let id = read_line("Reservation id: ")?;
    let services_cents = match read_optional("Services total ($, empty for none): ")? {
        Some(amount) => parse_cents(&amount)?,
        None => 0,
    };
    let method = read_line("Payment method: ")?;
    let reference = read_optional("Payment reference (optional): ")?;

    let summary = booking
        .settle_check_out(&id, services_cents, &method, reference.as_deref())
        .await?;

    println!("✓ Check-out settled");
    println!("  Room {}, {} night(s)", summary.room_number, summary.nights);
    println!("  Stay      {}", Money::from_cents(summary.stay_total_cents));
    println!("  Services  {}", Money::from_cents(summary.services_total_cents));
    println!("  ─────────────────");
    println!("  Total     {}  paid by {}", summary.grand_total, summary.payment_method);
    Ok(())
}

// =============================================================================
// Input helpers
// =============================================================================

/// Prompts and reads one trimmed line from stdin.
fn read_line(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| AppError::internal(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| AppError::internal(e.to_string()))?;
    Ok(line.trim().to_string())
}

/// Like [`read_line`], but an empty answer becomes `None`.
fn read_optional(prompt: &str) -> AppResult<Option<String>> {
    let line = read_line(prompt)?;
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// y/yes (any case) is true, everything else false.
fn read_bool(prompt: &str) -> AppResult<bool> {
    let answer = read_line(prompt)?.to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!(
            "'{}' is not a date (expected YYYY-MM-DD)",
            input.trim()
        ))
    })
}

/// Parses an operator amount ("80", "45.50") into cents.
fn parse_cents(input: &str) -> AppResult<i64> {
    Ok(Money::parse(input)?.cents())
}

fn parse_count(input: &str) -> AppResult<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("'{}' is not a number", input.trim())))
}

/// First eight characters of a UUID, enough to identify it at the desk.
fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_only() {
        assert_eq!(
            parse_date(" 2026-09-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
        let err = parse_date("01/09/2026").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_cents_handles_whole_and_decimal() {
        assert_eq!(parse_cents("80").unwrap(), 8000);
        assert_eq!(parse_cents("45.50").unwrap(), 4550);
        assert!(parse_cents("eighty").is_err());
    }

    #[test]
    fn test_parse_count_rejects_text() {
        assert_eq!(parse_count(" 3 ").unwrap(), 3);
        assert_eq!(
            parse_count("three").unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_short_id_never_panics() {
        assert_eq!(short("123456789abc"), "12345678");
        assert_eq!(short("abc"), "abc");
    }
}
