//! Lending domain errors

use core_kernel::{CustomerId, LoanId, PortError};
use thiserror::Error;

/// Errors that can occur in the lending domain
#[derive(Debug, Error)]
pub enum LendingError {
    /// A required field is missing, non-positive or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The referenced customer does not exist
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The referenced loan does not exist
    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),

    /// The customer has no loans to summarize
    #[error("No loans found for customer: {0}")]
    NoLoansFound(CustomerId),

    /// A loan's payment total no longer fits in a `Decimal`
    #[error("Payment total out of range for loan: {0}")]
    LedgerOverflow(LoanId),

    /// The ledger store failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl LendingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LendingError::InvalidInput(message.into())
    }

    /// Returns true for the "record does not exist" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LendingError::CustomerNotFound(_)
                | LendingError::LoanNotFound(_)
                | LendingError::NoLoansFound(_)
        )
    }
}
