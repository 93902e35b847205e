//! Lending Domain - Loan Accounting
//!
//! This crate originates simple-interest loans, records payments against them
//! and projects each loan's balance from its payment history.
//!
//! # Accounting Model
//!
//! - Interest is simple and fixed at origination:
//!   `total = principal + principal * years * rate / 100`
//! - Loans are repaid in `years * 12` equal monthly installments (EMI)
//! - Payments are append-only; the balance is always derived, never stored
//! - A loan becomes `PAID_OFF` once payments cover its total and stays that way
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_lending::{LoanAccountingEngine, PaymentType};
//! use domain_lending::ports::memory::InMemoryLedgerStore;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let engine = LoanAccountingEngine::new(Arc::new(InMemoryLedgerStore::new()));
//!
//! let customer = engine.register_customer("Asha Rao").await?;
//! let loan = engine.create_loan(customer.id, dec!(120000), 2, dec!(10)).await?;
//! let receipt = engine.record_payment(loan.id, dec!(6000), PaymentType::Emi).await?;
//!
//! assert_eq!(receipt.balance, dec!(138000));
//! assert_eq!(receipt.installments_left, 23);
//! ```

pub mod calculator;
pub mod customer;
pub mod loan;
pub mod payment;
pub mod ledger;
pub mod ports;
pub mod service;
pub mod error;

pub use calculator::{calculate_terms, LoanTerms};
pub use customer::Customer;
pub use loan::{Loan, LoanStatus};
pub use payment::{Payment, PaymentType};
pub use ledger::{AccountOverview, BalanceSummary, LoanLedger, LoanSummary, PaymentReceipt};
pub use ports::LedgerStore;
pub use service::LoanAccountingEngine;
pub use error::LendingError;
