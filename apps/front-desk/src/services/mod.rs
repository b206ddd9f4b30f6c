//! Front-desk service implementations.
//!
//! This module contains the orchestrating services behind the operator menu.
//! Services own every cross-aggregate flow: they validate, fetch, mutate
//! through the core methods, persist, log, and hand back DTO snapshots.

pub mod booking_service;
pub mod customer_service;

pub use booking_service::BookingService;
pub use customer_service::CustomerService;
