//! # App Error Type
//!
//! Unified error type for front-desk operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Atrium PMS                             │
//! │                                                                         │
//! │  Operator Menu               Services                                   │
//! │  ─────────────               ────────                                   │
//! │                                                                         │
//! │  "3) Create reservation"                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Operation                                               │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ─── CoreError::State/Capacity ──── AppError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  printed to the operator as                                             │
//! │    ✗ [ROOM_FULL] roster is full: 4 of 4 guests already registered       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors implement `Serialize` so they can be logged as structured JSON and
//! carried by any future non-console surface unchanged. Each error holds a
//! machine-readable `code` and a human-readable `message`.

use serde::Serialize;

use atrium_core::{CoreError, ValidationError};
use atrium_db::DbError;

/// Application error surfaced to the operator.
///
/// ## Serialization
/// What a structured log line (or a future API surface) carries when an
/// operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Reservation not found: 7f3a..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
///
/// ## Usage at the Menu
/// The menu switches on the code to pick the operator wording:
/// `ROOM_FULL` prints a "roster is full" notice, `ROOM_UNAVAILABLE` suggests
/// the availability search, everything else prints the message as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operation incompatible with the current lifecycle state
    StateConflict,

    /// Check-in roster is at its capacity ceiling
    RoomFull,

    /// Room is occupied or clashes with another reservation
    RoomUnavailable,

    /// Customer email already registered
    DuplicateEmail,

    /// Database operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a state conflict error.
    pub fn state_conflict(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::StateConflict, message)
    }

    /// Creates a room unavailable error.
    pub fn room_unavailable(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::RoomUnavailable, message)
    }

    /// Creates a duplicate email error.
    pub fn duplicate_email(email: &str) -> Self {
        AppError::new(
            ErrorCode::DuplicateEmail,
            format!("a customer with email '{}' already exists", email),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                if field.ends_with("email") {
                    AppError::duplicate_email(&value)
                } else {
                    AppError::new(
                        ErrorCode::ValidationError,
                        format!("{} '{}' already exists", field, value),
                    )
                }
            }
            DbError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Bare validation errors (from constructors and field validators) take the
/// same route as `CoreError::Validation`.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::from(CoreError::Validation(err))
    }
}

/// Converts domain errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(ValidationError::Duplicate { field, value })
                if field == "email" =>
            {
                AppError::duplicate_email(&value)
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
            CoreError::State(e) => AppError::state_conflict(e.to_string()),
            CoreError::Capacity(e) => AppError::new(ErrorCode::RoomFull, e.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================
