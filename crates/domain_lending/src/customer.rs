//! Customer records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;
use crate::error::LendingError;

/// A borrower. Created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Registers a new customer
    ///
    /// # Errors
    ///
    /// Returns `LendingError::InvalidInput` if the name is empty or blank
    pub fn register(name: impl Into<String>) -> Result<Self, LendingError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LendingError::invalid("Name is required"));
        }

        Ok(Self {
            id: CustomerId::new_v7(),
            name,
            created_at: Utc::now(),
        })
    }
}
