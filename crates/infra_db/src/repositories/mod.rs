//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain row
//! structs. They know nothing about the domain's port traits.

pub mod lending;

pub use lending::LendingRepository;
