//! PostgreSQL Ledger Store Adapter
//!
//! Implements the lending domain's `LedgerStore` port on top of
//! [`LendingRepository`], converting between row types and domain models and
//! translating database errors into port errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLedgerStore;
//! use domain_lending::{LedgerStore, LoanAccountingEngine};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool));
//! let engine = LoanAccountingEngine::new(store);
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    CustomerId, DomainPort, HealthCheckResult, HealthCheckable, LoanId, PaymentId, PortError,
};
use domain_lending::{Customer, LedgerStore, Loan, LoanStatus, Payment, PaymentType};

use crate::error::DatabaseError;
use crate::repositories::lending::{
    CustomerRow, LendingRepository, LoanRow, LoanStatus as DbLoanStatus, PaymentRow,
    PaymentType as DbPaymentType,
};

const ADAPTER_ID: &str = "postgres-ledger-store";

/// PostgreSQL-backed implementation of the `LedgerStore` port
#[derive(Debug, Clone)]
pub struct PostgresLedgerStore {
    repository: LendingRepository,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LendingRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &LendingRepository {
        &self.repository
    }
}

impl DomainPort for PostgresLedgerStore {}

#[async_trait]
impl HealthCheckable for PostgresLedgerStore {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn insert_customer(&self, customer: &Customer) -> Result<(), PortError> {
        debug!("Inserting customer");
        let row = CustomerRow {
            customer_id: customer.id.into(),
            name: customer.name.clone(),
            created_at: customer.created_at,
        };
        Ok(self.repository.insert_customer(&row).await?)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
        let row = self.repository.get_customer(id.into()).await?;
        Ok(Customer {
            id: CustomerId::from(row.customer_id),
            name: row.name,
            created_at: row.created_at,
        })
    }

    #[instrument(skip(self, loan), fields(loan_id = %loan.id))]
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError> {
        debug!("Inserting loan");
        let row = loan_to_row(loan)?;
        Ok(self.repository.insert_loan(&row).await?)
    }

    #[instrument(skip(self), fields(loan_id = %id))]
    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError> {
        let row = self.repository.get_loan(id.into()).await?;
        row_to_loan(row)
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, PortError> {
        let rows = self.repository.loans_for_customer(customer_id.into()).await?;
        debug!(count = rows.len(), "Loaded loans");
        rows.into_iter().map(row_to_loan).collect()
    }

    #[instrument(skip(self), fields(loan_id = %id))]
    async fn mark_paid_off(&self, id: LoanId) -> Result<(), PortError> {
        Ok(self.repository.mark_paid_off(id.into()).await?)
    }

    #[instrument(skip(self, payment), fields(loan_id = %payment.loan_id, payment_id = %payment.id))]
    async fn append_payment(&self, payment: &Payment) -> Result<(), PortError> {
        debug!("Appending payment");
        let row = PaymentRow {
            payment_id: payment.id.into(),
            loan_id: payment.loan_id.into(),
            amount: payment.amount,
            payment_type: match payment.payment_type {
                PaymentType::Emi => DbPaymentType::Emi,
                PaymentType::LumpSum => DbPaymentType::LumpSum,
            },
            paid_at: payment.timestamp,
        };
        Ok(self.repository.insert_payment(&row).await?)
    }

    #[instrument(skip(self), fields(loan_id = %loan_id))]
    async fn payments_for_loan(&self, loan_id: LoanId) -> Result<Vec<Payment>, PortError> {
        let rows = self.repository.payments_for_loan(loan_id.into()).await?;
        debug!(count = rows.len(), "Loaded payments");
        Ok(rows.into_iter().map(row_to_payment).collect())
    }
}

fn loan_to_row(loan: &Loan) -> Result<LoanRow, PortError> {
    let term_years = i32::try_from(loan.term_years).map_err(|_| {
        PortError::validation(format!("term of {} years is out of range", loan.term_years))
    })?;

    Ok(LoanRow {
        loan_id: loan.id.into(),
        customer_id: loan.customer_id.into(),
        principal_amount: loan.principal_amount,
        total_amount: loan.total_amount,
        interest_rate_yearly: loan.interest_rate_yearly,
        term_years,
        monthly_installment: loan.monthly_installment,
        status: match loan.status {
            LoanStatus::Active => DbLoanStatus::Active,
            LoanStatus::PaidOff => DbLoanStatus::PaidOff,
        },
        created_at: loan.created_at,
    })
}

fn row_to_loan(row: LoanRow) -> Result<Loan, PortError> {
    let term_years = u32::try_from(row.term_years).map_err(|_| {
        PortError::from(DatabaseError::CorruptRow(format!(
            "loan {} has term_years {}",
            row.loan_id, row.term_years
        )))
    })?;

    Ok(Loan {
        id: LoanId::from(row.loan_id),
        customer_id: CustomerId::from(row.customer_id),
        principal_amount: row.principal_amount,
        total_amount: row.total_amount,
        interest_rate_yearly: row.interest_rate_yearly,
        term_years,
        monthly_installment: row.monthly_installment,
        status: match row.status {
            DbLoanStatus::Active => LoanStatus::Active,
            DbLoanStatus::PaidOff => LoanStatus::PaidOff,
        },
        created_at: row.created_at,
    })
}

fn row_to_payment(row: PaymentRow) -> Payment {
    Payment {
        id: PaymentId::from(row.payment_id),
        loan_id: LoanId::from(row.loan_id),
        amount: row.amount,
        payment_type: match row.payment_type {
            DbPaymentType::Emi => PaymentType::Emi,
            DbPaymentType::LumpSum => PaymentType::LumpSum,
        },
        timestamp: row.paid_at,
    }
}
