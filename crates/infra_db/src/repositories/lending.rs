//! Lending repository implementation
//!
//! Database access for customers, loans and the append-only payments table.
//! Queries are plain SQL bound at runtime and mapped through `FromRow` row
//! types; the adapter layer converts rows into domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for customers, loans and payments
#[derive(Debug, Clone)]
pub struct LendingRepository {
    pool: PgPool,
}

impl LendingRepository {
    /// Creates a new LendingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Customers
    // ========================================================================

    pub async fn insert_customer(&self, customer: &CustomerRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO customers (customer_id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(customer.customer_id)
        .bind(&customer.name)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> Result<CustomerRow, DatabaseError> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, name, created_at
            FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", customer_id))
    }

    // ========================================================================
    // Loans
    // ========================================================================

    pub async fn insert_loan(&self, loan: &LoanRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO loans (
                loan_id, customer_id, principal_amount, total_amount,
                interest_rate_yearly, term_years, monthly_installment,
                status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(loan.loan_id)
        .bind(loan.customer_id)
        .bind(loan.principal_amount)
        .bind(loan.total_amount)
        .bind(loan.interest_rate_yearly)
        .bind(loan.term_years)
        .bind(loan.monthly_installment)
        .bind(loan.status)
        .bind(loan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_loan(&self, loan_id: Uuid) -> Result<LoanRow, DatabaseError> {
        sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT loan_id, customer_id, principal_amount, total_amount,
                   interest_rate_yearly, term_years, monthly_installment,
                   status, created_at
            FROM loans
            WHERE loan_id = $1
            "#,
        )
        .bind(loan_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Loan", loan_id))
    }

    /// Loans of a customer in the order they were created
    pub async fn loans_for_customer(&self, customer_id: Uuid) -> Result<Vec<LoanRow>, DatabaseError> {
        let loans = sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT loan_id, customer_id, principal_amount, total_amount,
                   interest_rate_yearly, term_years, monthly_installment,
                   status, created_at
            FROM loans
            WHERE customer_id = $1
            ORDER BY seq
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Sets a loan's status to `PAID_OFF`
    ///
    /// Only active loans are updated, so the transition is one-way at the
    /// storage level too.
    pub async fn mark_paid_off(&self, loan_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET status = 'PAID_OFF'
            WHERE loan_id = $1 AND status = 'ACTIVE'
            "#,
        )
        .bind(loan_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Either already paid off or missing; only the latter is an error
            self.get_loan(loan_id).await?;
        }

        Ok(())
    }

    // ========================================================================
    // Payments
    // ========================================================================

    pub async fn insert_payment(&self, payment: &PaymentRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO payments (payment_id, loan_id, amount, payment_type, paid_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(payment.payment_id)
        .bind(payment.loan_id)
        .bind(payment.amount)
        .bind(payment.payment_type)
        .bind(payment.paid_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Payments of a loan, oldest first
    pub async fn payments_for_loan(&self, loan_id: Uuid) -> Result<Vec<PaymentRow>, DatabaseError> {
        let payments = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, loan_id, amount, payment_type, paid_at
            FROM payments
            WHERE loan_id = $1
            ORDER BY paid_at, seq
            "#,
        )
        .bind(loan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Verifies the database answers queries
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Customer database row
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub customer_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Loan database row
#[derive(Debug, Clone, FromRow)]
pub struct LoanRow {
    pub loan_id: Uuid,
    pub customer_id: Uuid,
    pub principal_amount: Decimal,
    pub total_amount: Decimal,
    pub interest_rate_yearly: Decimal,
    pub term_years: i32,
    pub monthly_installment: Decimal,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

/// Payment database row
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub payment_id: Uuid,
    pub loan_id: Uuid,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub paid_at: DateTime<Utc>,
}

/// Loan status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "loan_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    PaidOff,
}

/// Payment type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Emi,
    LumpSum,
}
