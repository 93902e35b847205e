//! Payment records
//!
//! Payments are append-only. Once stored they are never changed or removed,
//! and the set of payments for a loan is the only record of what was paid.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{LoanId, PaymentId};
use crate::error::LendingError;

/// Payment type
///
/// Both types reduce the balance the same way; the type is kept for the
/// ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Regular monthly installment
    Emi,
    /// Payment outside the installment schedule
    LumpSum,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Emi => "EMI",
            PaymentType::LumpSum => "LUMP_SUM",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = LendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMI" => Ok(PaymentType::Emi),
            "LUMP_SUM" => Ok(PaymentType::LumpSum),
            other => Err(LendingError::invalid(format!(
                "payment type must be EMI or LUMP_SUM, got '{}'",
                other
            ))),
        }
    }
}

/// A payment applied against a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Loan being paid
    pub loan_id: LoanId,
    /// Amount paid
    pub amount: Decimal,
    /// Payment type
    pub payment_type: PaymentType,
    /// When the payment was recorded; ledger ordering key
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `LendingError::InvalidInput` if the amount is not positive
    pub fn new(loan_id: LoanId, amount: Decimal, payment_type: PaymentType) -> Result<Self, LendingError> {
        if amount <= Decimal::ZERO {
            return Err(LendingError::invalid("payment amount must be positive"));
        }

        Ok(Self {
            id: PaymentId::new_v7(),
            loan_id,
            amount,
            payment_type,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_type_parsing() {
        assert_eq!("EMI".parse::<PaymentType>().unwrap(), PaymentType::Emi);
        assert_eq!("LUMP_SUM".parse::<PaymentType>().unwrap(), PaymentType::LumpSum);
        assert!("emi".parse::<PaymentType>().is_err());
        assert!("REFUND".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_payment_type_serializes_as_wire_name() {
        let json = serde_json::to_string(&PaymentType::LumpSum).unwrap();
        assert_eq!(json, "\"LUMP_SUM\"");
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let loan_id = LoanId::new_v7();
        assert!(Payment::new(loan_id, dec!(0), PaymentType::Emi).is_err());
        assert!(Payment::new(loan_id, dec!(-1), PaymentType::Emi).is_err());
        assert!(Payment::new(loan_id, dec!(0.01), PaymentType::Emi).is_ok());
    }
}
