//! Core Kernel - Foundational types for the loan ledger
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed identifiers for customers, loans and payments
//! - The port contract (error type, marker traits, health checks) that
//!   storage adapters implement

pub mod identifiers;
pub mod ports;

pub use identifiers::{CustomerId, LoanId, PaymentId};
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
