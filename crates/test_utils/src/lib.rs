//! Test Utilities Crate
//!
//! Shared test infrastructure, fixtures, and helpers for the loan ledger
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for the reference loan scenarios
//! - `builders`: Builder patterns for loans and payments
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for balances and decimals
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
