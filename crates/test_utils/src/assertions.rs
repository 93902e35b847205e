//! Custom Test Assertions
//!
//! Assertion helpers that print the figures involved when they fail.

use domain_lending::BalanceSummary;
use rust_decimal::Decimal;

/// Asserts that two decimals differ by at most `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts the balance and remaining installments of a summary
pub fn assert_balance(summary: &BalanceSummary, balance: Decimal, installments_left: u64) {
    assert_eq!(
        summary.balance, balance,
        "Unexpected balance: actual={}, expected={}",
        summary.balance, balance
    );
    assert_eq!(
        summary.installments_left, installments_left,
        "Unexpected installments_left for balance {}",
        summary.balance
    );
}
