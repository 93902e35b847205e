//! Property-Based Test Generators
//!
//! Proptest strategies for loan inputs that satisfy the domain's
//! preconditions.

use domain_lending::PaymentType;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Principal between 0.01 and 1,000,000,000.00
pub fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Yearly rate between 0.01% and 99.99%
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|bps| Decimal::new(bps, 2))
}

/// Term between 1 and 30 years
pub fn term_years_strategy() -> impl Strategy<Value = u32> {
    1u32..=30u32
}

/// Payment amount between 0.01 and 50,000.00
pub fn payment_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

pub fn payment_type_strategy() -> impl Strategy<Value = PaymentType> {
    prop_oneof![Just(PaymentType::Emi), Just(PaymentType::LumpSum)]
}

/// Non-blank customer names
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,12})?"
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_principal_is_positive(principal in principal_strategy()) {
            prop_assert!(principal > Decimal::ZERO);
        }

        #[test]
        fn prop_names_are_not_blank(name in customer_name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }
    }
}
