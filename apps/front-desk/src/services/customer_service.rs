//! # Customer Service
//!
//! Customer profile management for the front desk.
//!
//! ## Responsibilities
//! - Registration with email uniqueness (checked here, backed by the
//!   database unique index)
//! - Profile updates, logical deactivation, lookups for the booking flow
//!
//! Email is the operator-facing lookup key: the desk asks "what's your
//! email?" long before anyone sees a UUID.

use tracing::{debug, info};

use atrium_core::types::Customer;
use atrium_db::Database;

use crate::dto::{CustomerDto, NewCustomerRequest, UpdateCustomerRequest};
use crate::error::{AppError, AppResult};

/// Customer profile operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    /// Creates a new customer service over the shared database handle.
    pub fn new(db: Database) -> Self {
        CustomerService { db }
    }

    /// Registers a new customer.
    ///
    /// ## Returns
    /// * `Err(DUPLICATE_EMAIL)` - A customer with this email already exists
    /// * `Err(VALIDATION_ERROR)` - Name or email malformed
    pub async fn register(&self, request: NewCustomerRequest) -> AppResult<CustomerDto> {
        debug!(email = %request.email, "register customer");

        let customer = Customer::new(
            request.full_name,
            request.email,
            request.phone,
            request.address,
        )?;

        // The unique index would catch this too, but checking first gives the
        // operator the specific message instead of a constraint error.
        if self.db.customers().get_by_email(&customer.email).await?.is_some() {
            return Err(AppError::duplicate_email(&customer.email));
        }

        self.db.customers().insert(&customer).await?;
        info!(id = %customer.id, email = %customer.email, "customer registered");

        Ok(CustomerDto::from(&customer))
    }

    /// Gets a customer by id.
    pub async fn get(&self, id: &str) -> AppResult<CustomerDto> {
        let customer = self
            .db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", id))?;
        Ok(CustomerDto::from(&customer))
    }

    /// Looks a customer up by email (trimmed, case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<CustomerDto>> {
        let normalized = email.trim().to_lowercase();
        let customer = self.db.customers().get_by_email(&normalized).await?;
        Ok(customer.as_ref().map(CustomerDto::from))
    }

    /// Lists active customers ordered by name.
    pub async fn list_active(&self) -> AppResult<Vec<CustomerDto>> {
        let customers = self.db.customers().list_active().await?;
        Ok(customers.iter().map(CustomerDto::from).collect())
    }

    /// Applies a partial profile update.
    ///
    /// Email changes re-check uniqueness against everyone except the
    /// customer being updated.
    pub async fn update(&self, id: &str, request: UpdateCustomerRequest) -> AppResult<CustomerDto> {
        debug!(id = %id, "update customer");

        let mut customer = self
            .db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", id))?;

        if let Some(full_name) = &request.full_name {
            customer.set_full_name(full_name)?;
        }
        if let Some(email) = &request.email {
            let previous = customer.email.clone();
            customer.set_email(email)?;
            if customer.email != previous {
                if let Some(existing) = self.db.customers().get_by_email(&customer.email).await? {
                    if existing.id != customer.id {
                        return Err(AppError::duplicate_email(&customer.email));
                    }
                }
            }
        }
        if let Some(phone) = request.phone {
            customer.phone = Some(phone);
        }
        if let Some(address) = request.address {
            customer.address = Some(address);
        }

        self.db.customers().update(&customer).await?;
        info!(id = %customer.id, "customer updated");

        Ok(CustomerDto::from(&customer))
    }

    /// Logically deactivates a customer. History keeps pointing at the row.
    pub async fn deactivate(&self, id: &str) -> AppResult<()> {
        self.db.customers().deactivate(id).await?;
        info!(id = %id, "customer deactivated");
        Ok(())
    }

    /// Whether the customer exists and is active. Missing counts as `false`.
    pub async fn exists_active(&self, id: &str) -> AppResult<bool> {
        let customer = self.db.customers().get_by_id(id).await?;
        Ok(customer.map(|c| c.active).unwrap_or(false))
    }
}

// =============================================================================
// Service Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use atrium_db::DbConfig;

    async fn service() -> CustomerService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CustomerService::new(db)
    }

    fn ana() -> NewCustomerRequest {
        NewCustomerRequest {
            full_name: "Ana García".to_string(),
            email: "Ana.Garcia@Example.com".to_string(),
            phone: Some("+34 600 111 222".to_string()),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let svc = service().await;
        let dto = svc.register(ana()).await.unwrap();
        assert_eq!(dto.email, "ana.garcia@example.com");

        let found = svc.get_by_email("  ANA.GARCIA@example.com ").await.unwrap();
        assert_eq!(found.unwrap().id, dto.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_refused() {
        let svc = service().await;
        svc.register(ana()).await.unwrap();

        let err = svc.register(ana()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_update_email_checks_other_customers_only() {
        let svc = service().await;
        let first = svc.register(ana()).await.unwrap();
        svc.register(NewCustomerRequest {
            full_name: "Luis Pérez".to_string(),
            email: "luis@example.com".to_string(),
            phone: None,
            address: None,
        })
        .await
        .unwrap();

        // Re-submitting your own email is fine
        let same = svc
            .update(
                &first.id,
                UpdateCustomerRequest {
                    email: Some("ana.garcia@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same.email, "ana.garcia@example.com");

        // Taking someone else's is not
        let err = svc
            .update(
                &first.id,
                UpdateCustomerRequest {
                    email: Some("luis@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_deactivate_drops_from_active_listing() {
        let svc = service().await;
        let dto = svc.register(ana()).await.unwrap();

        assert!(svc.exists_active(&dto.id).await.unwrap());
        svc.deactivate(&dto.id).await.unwrap();

        assert!(!svc.exists_active(&dto.id).await.unwrap());
        assert!(svc.list_active().await.unwrap().is_empty());
        // The profile itself is still there
        assert!(!svc.get(&dto.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_get_missing_customer_is_not_found() {
        let svc = service().await;
        let err = svc.get("no-such-id").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
