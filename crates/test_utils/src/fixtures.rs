//! Pre-built Test Fixtures
//!
//! Fixed, predictable data for the loan scenarios used across the test suite.

use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The reference loan: 120000 at 10% for 2 years
pub struct LoanFixtures;

impl LoanFixtures {
    pub fn principal() -> Decimal {
        dec!(120000)
    }

    pub fn rate() -> Decimal {
        dec!(10)
    }

    pub fn term_years() -> u32 {
        2
    }

    /// 120000 * 2 * 10%
    pub fn total_interest() -> Decimal {
        dec!(24000)
    }

    pub fn total_amount() -> Decimal {
        dec!(144000)
    }

    /// 144000 / 24
    pub fn monthly_installment() -> Decimal {
        dec!(6000)
    }

    /// Balance left after the first EMI
    pub fn balance_after_first_emi() -> Decimal {
        dec!(138000)
    }
}

/// Fixture for customer names
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn name() -> &'static str {
        "Asha Rao"
    }

    /// A random realistic name
    pub fn random_name() -> String {
        Name().fake()
    }
}
