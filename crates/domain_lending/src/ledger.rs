//! Ledger projections
//!
//! Balances are never stored. Every figure here is derived from a loan's fixed
//! terms and the full list of its payments:
//!
//! ```text
//! total_paid        = Σ payment.amount
//! balance           = total_amount - total_paid        (may go negative)
//! installments_left = 0                                 if balance <= 0
//!                     ceil(balance / monthly_installment) otherwise
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, LoanId, PaymentId};
use crate::calculator::MONTHS_PER_YEAR;
use crate::error::LendingError;
use crate::loan::{Loan, LoanStatus};
use crate::payment::Payment;

/// Figures derived from a loan and its payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Sum of all payments
    pub total_paid: Decimal,
    /// Outstanding amount; negative when overpaid
    pub balance: Decimal,
    /// Monthly installments still needed to clear the balance
    pub installments_left: u64,
}

impl BalanceSummary {
    /// Derives the summary for a loan from its payments
    ///
    /// # Errors
    ///
    /// `LedgerOverflow` when the payment total leaves the `Decimal` range
    pub fn derive<'a, I>(loan: &Loan, payments: I) -> Result<Self, LendingError>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let total_paid = total_paid(payments).ok_or(LendingError::LedgerOverflow(loan.id))?;
        let balance = loan
            .total_amount
            .checked_sub(total_paid)
            .ok_or(LendingError::LedgerOverflow(loan.id))?;

        Ok(Self {
            total_paid,
            balance,
            installments_left: installments_left(loan, balance),
        })
    }

    /// Total paid once `amount` is added, or `None` if it would overflow
    pub fn total_after(&self, amount: Decimal) -> Option<Decimal> {
        self.total_paid.checked_add(amount)
    }

    /// True once payments cover the total amount
    pub fn is_settled(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

/// Sum of payment amounts; `None` on overflow
fn total_paid<'a, I>(payments: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments
        .into_iter()
        .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.amount))
}

/// Number of installments needed to clear `balance`
///
/// `balance / monthly_installment` is evaluated as
/// `balance * installment_count / total_amount`, which is the same quantity
/// but exact whenever the answer is a whole number. Dividing by an EMI such
/// as `100 / 12` would otherwise leave a rounding residue that `ceil` turns
/// into one installment too many.
pub fn installments_left(loan: &Loan, balance: Decimal) -> u64 {
    if balance <= Decimal::ZERO {
        return 0;
    }

    let count = Decimal::from(u64::from(loan.term_years) * u64::from(MONTHS_PER_YEAR));
    let ratio = balance
        .checked_mul(count)
        .and_then(|scaled| scaled.checked_div(loan.total_amount))
        .or_else(|| balance.checked_div(loan.monthly_installment))
        .unwrap_or(Decimal::MAX);

    ratio.ceil().to_u64().unwrap_or(u64::MAX)
}

/// Result of recording a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub loan_id: LoanId,
    /// Balance after this payment, unclamped
    pub balance: Decimal,
    pub installments_left: u64,
    /// Loan status after this payment
    pub status: LoanStatus,
}

/// A loan with its full payment history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanLedger {
    /// The loan's terms and stored status
    pub loan: Loan,
    /// Payments in timestamp order
    pub payments: Vec<Payment>,
    pub summary: BalanceSummary,
}

impl LoanLedger {
    pub fn new(loan: Loan, payments: Vec<Payment>) -> Result<Self, LendingError> {
        let summary = BalanceSummary::derive(&loan, &payments)?;
        Ok(Self { loan, payments, summary })
    }
}

/// Per-loan line of an account overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: LoanId,
    pub principal: Decimal,
    pub total_amount: Decimal,
    pub total_interest: Decimal,
    pub monthly_installment: Decimal,
    pub status: LoanStatus,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub installments_left: u64,
}

impl LoanSummary {
    pub fn new(loan: &Loan, payments: &[Payment]) -> Result<Self, LendingError> {
        let summary = BalanceSummary::derive(loan, payments)?;
        Ok(Self {
            loan_id: loan.id,
            principal: loan.principal_amount,
            total_amount: loan.total_amount,
            total_interest: loan.total_interest(),
            monthly_installment: loan.monthly_installment,
            status: loan.status,
            total_paid: summary.total_paid,
            balance: summary.balance,
            installments_left: summary.installments_left,
        })
    }
}

/// All loans of one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub customer_id: CustomerId,
    pub loans: Vec<LoanSummary>,
}

impl AccountOverview {
    pub fn total_loans(&self) -> usize {
        self.loans.len()
    }
}
