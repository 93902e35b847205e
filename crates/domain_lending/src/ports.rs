//! Lending Domain Ports
//!
//! This module defines the storage port the accounting engine depends on, so
//! the engine never knows which backend holds its records.
//!
//! # Architecture
//!
//! - **PostgreSQL adapter**: `infra_db::adapters::PostgresLedgerStore`
//! - **In-memory adapter**: [`memory::InMemoryLedgerStore`], used for local
//!   runs and tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_lending::{LoanAccountingEngine, ports::memory::InMemoryLedgerStore};
//! use std::sync::Arc;
//!
//! let engine = LoanAccountingEngine::new(Arc::new(InMemoryLedgerStore::new()));
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, LoanId, PortError};

use crate::customer::Customer;
use crate::loan::Loan;
use crate::payment::Payment;

/// Durable keyed storage for customers, loans and payments
///
/// Lookups of a missing record return `PortError::NotFound`. Payments are
/// append-only: the port offers no way to change or remove one.
#[async_trait]
pub trait LedgerStore: DomainPort + HealthCheckable {
    // ========================================================================
    // Customers
    // ========================================================================

    /// Stores a new customer
    async fn insert_customer(&self, customer: &Customer) -> Result<(), PortError>;

    /// Retrieves a customer by ID
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError>;

    // ========================================================================
    // Loans
    // ========================================================================

    /// Stores a new loan
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError>;

    /// Retrieves a loan by ID
    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError>;

    /// Lists the loans of a customer in storage order
    async fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, PortError>;

    /// Sets the loan's status to paid off; a no-op if it already is
    async fn mark_paid_off(&self, id: LoanId) -> Result<(), PortError>;

    // ========================================================================
    // Payments
    // ========================================================================

    /// Appends a payment to the loan's history
    async fn append_payment(&self, payment: &Payment) -> Result<(), PortError>;

    /// Lists every payment of a loan ordered by timestamp, oldest first
    async fn payments_for_loan(&self, loan_id: LoanId) -> Result<Vec<Payment>, PortError>;
}

/// In-process implementation of `LedgerStore`
///
/// Records live in `RwLock`-guarded vectors, so iteration follows insertion
/// order the way a table scan without `ORDER BY` would.
pub mod memory {
    use super::*;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;
    use crate::loan::LoanStatus;

    /// In-memory ledger store
    #[derive(Debug, Default)]
    pub struct InMemoryLedgerStore {
        customers: RwLock<Vec<Customer>>,
        loans: RwLock<Vec<Loan>>,
        payments: RwLock<Vec<Payment>>,
    }

    impl InMemoryLedgerStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of payments stored across all loans
        pub async fn payment_count(&self) -> usize {
            self.payments.read().await.len()
        }
    }

    impl DomainPort for InMemoryLedgerStore {}

    #[async_trait]
    impl HealthCheckable for InMemoryLedgerStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                message: Some("in-memory store".to_string()),
                ..HealthCheckResult::healthy("memory-ledger-store", 0)
            }
        }
    }

    #[async_trait]
    impl LedgerStore for InMemoryLedgerStore {
        async fn insert_customer(&self, customer: &Customer) -> Result<(), PortError> {
            let mut customers = self.customers.write().await;
            if customers.iter().any(|c| c.id == customer.id) {
                return Err(PortError::conflict(format!("customer {} already exists", customer.id)));
            }
            customers.push(customer.clone());
            Ok(())
        }

        async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
            self.customers
                .read()
                .await
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Customer", id))
        }

        async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError> {
            if !self.customers.read().await.iter().any(|c| c.id == loan.customer_id) {
                return Err(PortError::validation(format!(
                    "customer {} does not exist",
                    loan.customer_id
                )));
            }

            let mut loans = self.loans.write().await;
            if loans.iter().any(|l| l.id == loan.id) {
                return Err(PortError::conflict(format!("loan {} already exists", loan.id)));
            }
            loans.push(loan.clone());
            Ok(())
        }

        async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError> {
            self.loans
                .read()
                .await
                .iter()
                .find(|l| l.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Loan", id))
        }

        async fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>, PortError> {
            Ok(self
                .loans
                .read()
                .await
                .iter()
                .filter(|l| l.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn mark_paid_off(&self, id: LoanId) -> Result<(), PortError> {
            let mut loans = self.loans.write().await;
            let loan = loans
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| PortError::not_found("Loan", id))?;
            loan.status = LoanStatus::PaidOff;
            Ok(())
        }

        async fn append_payment(&self, payment: &Payment) -> Result<(), PortError> {
            if !self.loans.read().await.iter().any(|l| l.id == payment.loan_id) {
                return Err(PortError::validation(format!(
                    "loan {} does not exist",
                    payment.loan_id
                )));
            }

            let mut payments = self.payments.write().await;
            if payments.iter().any(|p| p.id == payment.id) {
                return Err(PortError::conflict(format!("payment {} already exists", payment.id)));
            }
            payments.push(payment.clone());
            Ok(())
        }

        async fn payments_for_loan(&self, loan_id: LoanId) -> Result<Vec<Payment>, PortError> {
            let mut payments: Vec<Payment> = self
                .payments
                .read()
                .await
                .iter()
                .filter(|p| p.loan_id == loan_id)
                .cloned()
                .collect();
            // stable: equal timestamps keep insertion order
            payments.sort_by_key(|p| p.timestamp);
            Ok(payments)
        }
    }

}
