//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - CRUD with logical deactivation (never DELETE)
//! - Email lookup backing the uniqueness rule
//!
//! ## Why Logical Deactivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Completed reservations keep referencing the customer forever.          │
//! │  Deleting the row would orphan that history, so deactivation just       │
//! │  flips `active` off: the customer can no longer book, but every past    │
//! │  stay still joins cleanly.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::models::CustomerRow;
use atrium_core::types::Customer;

const CUSTOMER_COLUMNS: &str =
    "id, full_name, email, phone, address, active, created_at, updated_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, email = %customer.email, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, full_name, email, phone, address, active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Gets a customer by email.
    ///
    /// The domain layer stores emails lowercased; callers should normalize
    /// before looking up.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Lists active customers, ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE active = 1 ORDER BY full_name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Updates an existing customer.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    /// * `Err(DbError::UniqueViolation)` - New email already registered
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                full_name = ?2,
                email = ?3,
                phone = ?4,
                address = ?5,
                active = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deactivates a customer (logical delete).
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating customer");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts active customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_load_customer() {
        let db = test_db().await;
        let repo = db.customers();

        let customer = Customer::new(
            "Ana García",
            "Ana@Example.com",
            Some("+34 600 111 222".to_string()),
            None,
        )
        .unwrap();
        repo.insert(&customer).await.unwrap();

        let loaded = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(loaded.full_name, "Ana García");
        // Email was normalized by the domain constructor before insert
        assert_eq!(loaded.email, "ana@example.com");
        assert!(loaded.active);

        let by_email = repo.get_by_email("ana@example.com").await.unwrap();
        assert!(by_email.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let repo = db.customers();

        let first = Customer::new("Ana García", "ana@example.com", None, None).unwrap();
        repo.insert(&first).await.unwrap();

        let second = Customer::new("Other Ana", "ana@example.com", None, None).unwrap();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_active_list() {
        let db = test_db().await;
        let repo = db.customers();

        let customer = Customer::new("Ana García", "ana@example.com", None, None).unwrap();
        repo.insert(&customer).await.unwrap();
        assert_eq!(repo.list_active().await.unwrap().len(), 1);

        repo.deactivate(&customer.id).await.unwrap();
        assert_eq!(repo.list_active().await.unwrap().len(), 0);

        // Still loadable by id: history keeps its reference
        let loaded = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert!(!loaded.active);
    }

    #[tokio::test]
    async fn test_update_missing_customer_is_not_found() {
        let db = test_db().await;
        let repo = db.customers();

        let ghost = Customer::new("Ghost", "ghost@example.com", None, None).unwrap();
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
