//! Domain Adapters
//!
//! Implementations of domain ports backed by PostgreSQL. Each adapter
//! implements a port trait, converts between domain models and row types,
//! and delegates SQL to the repository layer.

pub mod lending;

pub use lending::PostgresLedgerStore;
