//! Loan aggregate
//!
//! A loan's financial terms are fixed at origination. The only mutable part is
//! its status, which moves from `Active` to `PaidOff` once and stays there.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CustomerId, LoanId};
use crate::calculator::LoanTerms;
use crate::error::LendingError;

/// Loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Outstanding balance remains
    Active,
    /// Cumulative payments reached the total amount
    PaidOff,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "ACTIVE",
            LoanStatus::PaidOff => "PAID_OFF",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = LendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(LoanStatus::Active),
            "PAID_OFF" => Ok(LoanStatus::PaidOff),
            other => Err(LendingError::invalid(format!("unknown loan status '{}'", other))),
        }
    }
}

/// A loan issued to a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,
    /// Borrower
    pub customer_id: CustomerId,
    /// Amount borrowed
    pub principal_amount: Decimal,
    /// Principal plus interest for the full term
    pub total_amount: Decimal,
    /// Yearly interest rate in percent
    pub interest_rate_yearly: Decimal,
    /// Term length in years
    pub term_years: u32,
    /// Equal monthly installment
    pub monthly_installment: Decimal,
    /// Status
    pub status: LoanStatus,
    /// Origination timestamp
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// Originates a new active loan from computed terms
    pub fn originate(customer_id: CustomerId, terms: LoanTerms) -> Self {
        Self {
            id: LoanId::new_v7(),
            customer_id,
            principal_amount: terms.principal,
            total_amount: terms.total_amount,
            interest_rate_yearly: terms.rate_yearly_percent,
            term_years: terms.term_years,
            monthly_installment: terms.monthly_installment,
            status: LoanStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Interest charged over the full term
    pub fn total_interest(&self) -> Decimal {
        self.total_amount - self.principal_amount
    }

    pub fn is_paid_off(&self) -> bool {
        self.status == LoanStatus::PaidOff
    }

    /// Marks the loan as paid off
    ///
    /// Returns `true` if this call performed the transition and `false` if
    /// the loan was already paid off. There is no way back to `Active`.
    pub fn mark_paid_off(&mut self) -> bool {
        if self.is_paid_off() {
            return false;
        }
        self.status = LoanStatus::PaidOff;
        true
    }
}
