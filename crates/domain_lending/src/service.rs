//! Loan accounting engine
//!
//! The engine is the application boundary of the lending domain. It validates
//! input, computes loan terms, persists records through a [`LedgerStore`] and
//! projects balances from the stored payment history.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use core_kernel::{CustomerId, LoanId, PortError};

use crate::calculator::calculate_terms;
use crate::customer::Customer;
use crate::error::LendingError;
use crate::ledger::{AccountOverview, BalanceSummary, LoanLedger, LoanSummary, PaymentReceipt};
use crate::loan::Loan;
use crate::payment::{Payment, PaymentType};
use crate::ports::LedgerStore;

/// Loan accounting engine
pub struct LoanAccountingEngine {
    store: Arc<dyn LedgerStore>,
    /// One lock per loan; payments on the same loan are applied one at a time
    payment_locks: Mutex<HashMap<LoanId, Arc<tokio::sync::Mutex<()>>>>,
}

impl LoanAccountingEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            payment_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store, for health probes
    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Registers a new customer
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name, `Store` if persisting fails
    #[instrument(skip(self, name))]
    pub async fn register_customer(&self, name: &str) -> Result<Customer, LendingError> {
        let customer = Customer::register(name)?;
        self.store.insert_customer(&customer).await?;

        info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Originates a loan for an existing customer
    ///
    /// Inputs are validated before the customer is looked up, so a request
    /// that is both malformed and for an unknown customer reports the
    /// malformed input.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn create_loan(
        &self,
        customer_id: CustomerId,
        principal: Decimal,
        term_years: u32,
        rate_yearly_percent: Decimal,
    ) -> Result<Loan, LendingError> {
        let terms = calculate_terms(principal, rate_yearly_percent, term_years)?;

        self.store
            .get_customer(customer_id)
            .await
            .map_err(|e| not_found_as(e, LendingError::CustomerNotFound(customer_id)))?;

        let loan = Loan::originate(customer_id, terms);
        self.store.insert_loan(&loan).await?;

        info!(
            loan_id = %loan.id,
            total_amount = %loan.total_amount,
            monthly_installment = %loan.monthly_installment,
            "loan created"
        );
        Ok(loan)
    }

    /// Records a payment and returns the loan's position after it
    ///
    /// The payment is stored first. If the new balance is at or below zero
    /// and the loan is still active, its status is then set to paid off.
    /// Payments on a loan that is already paid off are accepted and drive the
    /// balance further negative. A payment that would push the loan's total
    /// paid out of the `Decimal` range is rejected before it is stored.
    #[instrument(skip(self), fields(loan_id = %loan_id))]
    pub async fn record_payment(
        &self,
        loan_id: LoanId,
        amount: Decimal,
        payment_type: PaymentType,
    ) -> Result<PaymentReceipt, LendingError> {
        let payment = Payment::new(loan_id, amount, payment_type)?;

        // Unknown loans never reach the lock map
        self.find_loan(loan_id).await?;

        let lock = self.payment_lock(loan_id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_payment(&payment).await
        };
        self.release_payment_lock(loan_id, lock);

        let receipt = result?;
        info!(
            payment_id = %payment.id,
            amount = %payment.amount,
            payment_type = %payment.payment_type,
            balance = %receipt.balance,
            "payment recorded"
        );
        Ok(receipt)
    }

    /// A loan with its payment history and derived balance
    #[instrument(skip(self), fields(loan_id = %loan_id))]
    pub async fn ledger(&self, loan_id: LoanId) -> Result<LoanLedger, LendingError> {
        let loan = self.find_loan(loan_id).await?;
        let payments = self.store.payments_for_loan(loan_id).await?;

        debug!(payments = payments.len(), "ledger loaded");
        LoanLedger::new(loan, payments)
    }

    /// Summary of every loan a customer holds
    ///
    /// # Errors
    ///
    /// `NoLoansFound` when the customer has no loans, including when the
    /// customer does not exist
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn account_overview(&self, customer_id: CustomerId) -> Result<AccountOverview, LendingError> {
        let loans = self.store.loans_for_customer(customer_id).await?;
        if loans.is_empty() {
            return Err(LendingError::NoLoansFound(customer_id));
        }

        let mut summaries = Vec::with_capacity(loans.len());
        for loan in &loans {
            let payments = self.store.payments_for_loan(loan.id).await?;
            summaries.push(LoanSummary::new(loan, &payments)?);
        }

        debug!(loans = summaries.len(), "overview built");
        Ok(AccountOverview {
            customer_id,
            loans: summaries,
        })
    }

    async fn find_loan(&self, loan_id: LoanId) -> Result<Loan, LendingError> {
        self.store
            .get_loan(loan_id)
            .await
            .map_err(|e| not_found_as(e, LendingError::LoanNotFound(loan_id)))
    }

    /// Applies a payment; the caller holds the loan's payment lock
    async fn apply_payment(&self, payment: &Payment) -> Result<PaymentReceipt, LendingError> {
        let loan_id = payment.loan_id;
        let mut loan = self.find_loan(loan_id).await?;

        let history = self.store.payments_for_loan(loan_id).await?;
        if BalanceSummary::derive(&loan, &history)?
            .total_after(payment.amount)
            .is_none()
        {
            return Err(LendingError::invalid("Payment amount is too large for this loan"));
        }

        self.store.append_payment(payment).await?;

        let payments = self.store.payments_for_loan(loan_id).await?;
        let summary = BalanceSummary::derive(&loan, &payments)?;

        if summary.is_settled() && loan.mark_paid_off() {
            self.store.mark_paid_off(loan_id).await?;
            info!(balance = %summary.balance, "loan paid off");
        }

        Ok(PaymentReceipt {
            payment_id: payment.id,
            loan_id,
            balance: summary.balance,
            installments_left: summary.installments_left,
            status: loan.status,
        })
    }

    fn payment_locks(&self) -> MutexGuard<'_, HashMap<LoanId, Arc<tokio::sync::Mutex<()>>>> {
        self.payment_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn payment_lock(&self, loan_id: LoanId) -> Arc<tokio::sync::Mutex<()>> {
        self.payment_locks().entry(loan_id).or_default().clone()
    }

    /// Drops the map entry once no other payment holds or awaits it
    fn release_payment_lock(&self, loan_id: LoanId, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.payment_locks();
        // the map's handle plus ours
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&loan_id);
        }
    }
}

fn not_found_as(error: PortError, not_found: LendingError) -> LendingError {
    if error.is_not_found() {
        not_found
    } else {
        LendingError::Store(error)
    }
}
