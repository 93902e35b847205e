//! Request and response bodies

pub mod customers;
pub mod loans;
