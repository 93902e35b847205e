//! Interest and EMI calculation
//!
//! Loans use simple (non-compounding) interest over the whole term, repaid in
//! equal monthly installments:
//!
//! ```text
//! total_interest      = principal * term_years * (rate_yearly_percent / 100)
//! total_amount        = principal + total_interest
//! monthly_installment = total_amount / (term_years * 12)
//! ```
//!
//! Values are carried at full `Decimal` precision. Rounding is left to
//! whoever presents the numbers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LendingError;

/// Number of installments per year of term
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest term a loan can carry; ledger stores hold it as a signed 32-bit integer
pub const MAX_TERM_YEARS: u32 = i32::MAX as u32;

/// The financial terms fixed at loan origination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Decimal,
    /// Yearly interest rate in percent (10 means 10%)
    pub rate_yearly_percent: Decimal,
    /// Term length in whole years
    pub term_years: u32,
    /// Interest over the full term
    pub total_interest: Decimal,
    /// Principal plus interest
    pub total_amount: Decimal,
    /// Equal monthly installment (EMI)
    pub monthly_installment: Decimal,
}

impl LoanTerms {
    /// Number of monthly installments in the full term
    pub fn installment_count(&self) -> u64 {
        u64::from(self.term_years) * u64::from(MONTHS_PER_YEAR)
    }
}

/// Computes the loan terms for a principal, yearly rate and term
///
/// # Errors
///
/// Returns `LendingError::InvalidInput` if any input is zero or negative, or if
/// the amounts are too large to represent.
///
/// # Example
///
/// ```rust
/// use domain_lending::calculator::calculate_terms;
/// use rust_decimal_macros::dec;
///
/// let terms = calculate_terms(dec!(120000), dec!(10), 2).unwrap();
/// assert_eq!(terms.total_amount, dec!(144000));
/// assert_eq!(terms.monthly_installment, dec!(6000));
/// ```
pub fn calculate_terms(
    principal: Decimal,
    rate_yearly_percent: Decimal,
    term_years: u32,
) -> Result<LoanTerms, LendingError> {
    if principal <= Decimal::ZERO {
        return Err(LendingError::invalid("loan amount must be positive"));
    }
    if rate_yearly_percent <= Decimal::ZERO {
        return Err(LendingError::invalid("interest rate must be positive"));
    }
    if term_years == 0 {
        return Err(LendingError::invalid("loan period must be at least one year"));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(LendingError::invalid("loan period is too long"));
    }

    let overflow = || LendingError::invalid("loan amounts are too large");
    let years = Decimal::from(term_years);

    let total_interest = principal
        .checked_mul(years)
        .and_then(|p| p.checked_mul(rate_yearly_percent / dec!(100)))
        .ok_or_else(overflow)?;
    let total_amount = principal.checked_add(total_interest).ok_or_else(overflow)?;
    let installments = years
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or_else(overflow)?;
    let monthly_installment = total_amount.checked_div(installments).ok_or_else(overflow)?;

    Ok(LoanTerms {
        principal,
        rate_yearly_percent,
        term_years,
        total_interest,
        total_amount,
        monthly_installment,
    })
}
