//! # Check-Out Ledger
//!
//! The bill settled when a stay ends.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Check-Out Ledger                             │
//! │                                                                     │
//! │   open()                                                            │
//! │     │                                                               │
//! │     ▼                                                               │
//! │   PENDING   stay_total ──┐                                          │
//! │             services ────┼──► grand_total = stay + services         │
//! │                          │                                          │
//! │     │  settle(stay, services, method, reference)                    │
//! │     │    - validates EVERYTHING before touching a field             │
//! │     ▼                                                               │
//! │   SETTLED   immutable: every later edit or settle is refused        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why "validate everything first"
//! A settle call that fails halfway would leave a half-priced bill on disk.
//! All amount and payment validation happens before the first field is
//! assigned, so a refused settlement leaves the ledger exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreResult, StateError};
use crate::money::Money;
use crate::types::SettlementStatus;
use crate::validation::{validate_amount_cents, validate_payment_method};

// =============================================================================
// CheckOut
// =============================================================================

/// The bill for one stay.
///
/// ## Invariants
/// - `grand_total_cents == stay_total_cents + services_total_cents`
/// - all three totals are non-negative
/// - once SETTLED, nothing changes again
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOut {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Register this bill belongs to (one bill per register).
    pub check_in_id: String,

    /// Reservation the stay was booked under.
    pub reservation_id: String,

    /// When the party left; stamped at settlement.
    pub departed_at: DateTime<Utc>,

    /// Room charge for the stay, in cents.
    pub stay_total_cents: i64,

    /// Extras consumed during the stay, in cents.
    pub services_total_cents: i64,

    /// `stay + services`, in cents.
    pub grand_total_cents: i64,

    /// Free-form billing notes.
    pub notes: Option<String>,

    /// How the bill was paid ("cash", "visa ending 4242", ...). Free text,
    /// recorded as given.
    pub payment_method: Option<String>,

    /// Receipt or transaction reference from the payment terminal.
    pub payment_reference: Option<String>,

    /// Settlement state.
    pub status: SettlementStatus,
}

impl CheckOut {
    /// Opens a zeroed PENDING ledger for a register.
    pub fn open(check_in_id: impl Into<String>, reservation_id: impl Into<String>) -> Self {
        CheckOut {
            id: Uuid::new_v4().to_string(),
            check_in_id: check_in_id.into(),
            reservation_id: reservation_id.into(),
            departed_at: Utc::now(),
            stay_total_cents: 0,
            services_total_cents: 0,
            grand_total_cents: 0,
            notes: None,
            payment_method: None,
            payment_reference: None,
            status: SettlementStatus::Pending,
        }
    }

    /// The room charge as Money.
    #[inline]
    pub fn stay_total(&self) -> Money {
        Money::from_cents(self.stay_total_cents)
    }

    /// The extras charge as Money.
    #[inline]
    pub fn services_total(&self) -> Money {
        Money::from_cents(self.services_total_cents)
    }

    /// The full bill as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.status == SettlementStatus::Settled
    }

    fn ensure_pending(&self) -> CoreResult<()> {
        if self.is_settled() {
            return Err(StateError::AlreadySettled.into());
        }
        Ok(())
    }

    // =========================================================================
    // Amendments (pending ledgers only)
    // =========================================================================

    /// Sets the room charge and refreshes the grand total.
    pub fn set_stay_total(&mut self, cents: i64) -> CoreResult<()> {
        self.ensure_pending()?;
        validate_amount_cents("stay total", cents)?;
        self.stay_total_cents = cents;
        self.grand_total_cents = self.stay_total_cents + self.services_total_cents;
        Ok(())
    }

    /// Sets the extras charge and refreshes the grand total.
    pub fn set_services_total(&mut self, cents: i64) -> CoreResult<()> {
        self.ensure_pending()?;
        validate_amount_cents("services total", cents)?;
        self.services_total_cents = cents;
        self.grand_total_cents = self.stay_total_cents + self.services_total_cents;
        Ok(())
    }

    /// Records how the bill will be paid.
    pub fn set_payment_method(&mut self, method: &str) -> CoreResult<()> {
        self.ensure_pending()?;
        validate_payment_method(method)?;
        self.payment_method = Some(method.trim().to_string());
        Ok(())
    }

    /// Records the payment terminal reference.
    pub fn set_payment_reference(&mut self, reference: Option<String>) -> CoreResult<()> {
        self.ensure_pending()?;
        self.payment_reference = reference;
        Ok(())
    }

    /// Replaces the billing notes.
    pub fn set_notes(&mut self, notes: Option<String>) -> CoreResult<()> {
        self.ensure_pending()?;
        self.notes = notes;
        Ok(())
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Settles the bill in one step and returns the grand total in cents.
    ///
    /// ## Rules
    /// - refused on an already settled ledger
    /// - both amounts must be non-negative
    /// - the payment method must be non-blank
    ///
    /// All checks run before the first field is assigned; a refused
    /// settlement leaves the ledger untouched.
    pub fn settle(
        &mut self,
        stay_cents: i64,
        services_cents: i64,
        method: &str,
        reference: Option<&str>,
    ) -> CoreResult<i64> {
        self.ensure_pending()?;
        validate_amount_cents("stay total", stay_cents)?;
        validate_amount_cents("services total", services_cents)?;
        validate_payment_method(method)?;

        self.stay_total_cents = stay_cents;
        self.services_total_cents = services_cents;
        self.grand_total_cents = stay_cents + services_cents;
        self.payment_method = Some(method.trim().to_string());
        self.payment_reference = reference.map(str::to_string);
        self.departed_at = Utc::now();
        self.status = SettlementStatus::Settled;
        Ok(self.grand_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> CheckOut {
        CheckOut::open("checkin-1", "res-1")
    }

    #[test]
    fn test_open_is_zeroed_and_pending() {
        let bill = ledger();
        assert_eq!(bill.status, SettlementStatus::Pending);
        assert_eq!(bill.stay_total_cents, 0);
        assert_eq!(bill.services_total_cents, 0);
        assert_eq!(bill.grand_total_cents, 0);
        assert!(bill.payment_method.is_none());
        assert!(!bill.is_settled());
    }

    #[test]
    fn test_totals_track_grand_total() {
        let mut bill = ledger();
        bill.set_stay_total(24000).unwrap();
        assert_eq!(bill.grand_total_cents, 24000);

        bill.set_services_total(3550).unwrap();
        assert_eq!(bill.grand_total_cents, 27550);

        bill.set_stay_total(20000).unwrap();
        assert_eq!(bill.grand_total_cents, 23550);
        assert_eq!(bill.grand_total(), Money::from_cents(23550));
    }

    #[test]
    fn test_negative_amounts_refused() {
        let mut bill = ledger();
        assert!(bill.set_stay_total(-1).is_err());
        assert!(bill.set_services_total(-100).is_err());
        assert_eq!(bill.grand_total_cents, 0);
    }

    #[test]
    fn test_settle_returns_grand_total() {
        let mut bill = ledger();
        let grand = bill
            .settle(24000, 3550, "visa", Some("auth-991"))
            .unwrap();

        assert_eq!(grand, 27550);
        assert!(bill.is_settled());
        assert_eq!(bill.stay_total_cents, 24000);
        assert_eq!(bill.services_total_cents, 3550);
        assert_eq!(bill.payment_method.as_deref(), Some("visa"));
        assert_eq!(bill.payment_reference.as_deref(), Some("auth-991"));
    }

    #[test]
    fn test_settle_trims_payment_method() {
        let mut bill = ledger();
        bill.settle(1000, 0, "  cash  ", None).unwrap();
        assert_eq!(bill.payment_method.as_deref(), Some("cash"));
        assert!(bill.payment_reference.is_none());
    }

    #[test]
    fn test_settle_twice_refused_totals_unchanged() {
        let mut bill = ledger();
        bill.settle(24000, 3550, "cash", None).unwrap();

        let err = bill.settle(1, 1, "visa", None).unwrap_err();
        assert!(err.is_state());
        assert_eq!(bill.grand_total_cents, 27550);
        assert_eq!(bill.payment_method.as_deref(), Some("cash"));
    }

    #[test]
    fn test_settle_validates_before_mutating() {
        let mut bill = ledger();
        bill.set_stay_total(5000).unwrap();

        // Negative services: refused with nothing applied
        assert!(bill.settle(24000, -1, "cash", None).is_err());
        assert_eq!(bill.stay_total_cents, 5000);
        assert_eq!(bill.status, SettlementStatus::Pending);

        // Blank payment method: same story
        assert!(bill.settle(24000, 3550, "   ", None).is_err());
        assert_eq!(bill.stay_total_cents, 5000);
        assert!(bill.payment_method.is_none());
    }

    #[test]
    fn test_settled_ledger_is_immutable() {
        let mut bill = ledger();
        bill.settle(24000, 0, "cash", None).unwrap();

        assert!(bill.set_stay_total(1).is_err());
        assert!(bill.set_services_total(1).is_err());
        assert!(bill.set_payment_method("visa").is_err());
        assert!(bill.set_payment_reference(Some("x".to_string())).is_err());
        assert!(bill.set_notes(Some("x".to_string())).is_err());
        assert_eq!(bill.grand_total_cents, 24000);
    }

    #[test]
    fn test_zero_amount_settlement_is_valid() {
        // Same-day departure: zero nights, nothing consumed
        let mut bill = ledger();
        let grand = bill.settle(0, 0, "cash", None).unwrap();
        assert_eq!(grand, 0);
        assert!(bill.is_settled());
    }
}
