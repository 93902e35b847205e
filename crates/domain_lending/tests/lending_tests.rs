//! Tests for the lending model: terms, payments and ledger projections

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, LoanId};

use domain_lending::calculator::calculate_terms;
use domain_lending::customer::Customer;
use domain_lending::ledger::{installments_left, AccountOverview, BalanceSummary, LoanLedger, LoanSummary};
use domain_lending::loan::{Loan, LoanStatus};
use domain_lending::payment::{Payment, PaymentType};
use domain_lending::LendingError;

use test_utils::{
    assert_balance, assert_decimal_approx_eq, customer_name_strategy, payment_amount_strategy,
    payment_type_strategy, principal_strategy, rate_strategy, term_years_strategy, LoanFixtures,
    TestLoanBuilder, TestPaymentBuilder,
};

fn reference_loan() -> Loan {
    TestLoanBuilder::new().build()
}

// ============================================================================
// Calculator Tests
// ============================================================================

mod calculator_tests {
    use super::*;

    #[test]
    fn test_fractional_rate() {
        let terms = calculate_terms(dec!(10000), dec!(7.5), 3).unwrap();
        assert_eq!(terms.total_interest, dec!(2250));
        assert_eq!(terms.total_amount, dec!(12250));
        assert_eq!(terms.installment_count(), 36);
    }

    #[test]
    fn test_non_terminating_installment_keeps_precision() {
        let terms = calculate_terms(dec!(1000), dec!(10), 1).unwrap();
        assert_eq!(terms.total_amount, dec!(1100));
        assert!(terms.monthly_installment > dec!(91.66));
        assert!(terms.monthly_installment < dec!(91.67));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = calculate_terms(dec!(-1), dec!(10), 1).unwrap_err();
        assert!(err.to_string().contains("loan amount"));

        let err = calculate_terms(dec!(100), dec!(0), 1).unwrap_err();
        assert!(err.to_string().contains("interest rate"));
    }

    #[test]
    fn test_thirds_stay_close_to_total() {
        let terms = calculate_terms(dec!(1000), dec!(10), 1).unwrap();
        let reconstructed = terms.monthly_installment * Decimal::from(terms.installment_count());
        assert_decimal_approx_eq(reconstructed, terms.total_amount, dec!(0.0001));
    }
}

// ============================================================================
// Loan & Payment Tests
// ============================================================================

mod model_tests {
    use super::*;

    #[test]
    fn test_loan_carries_terms() {
        let loan = reference_loan();
        assert_eq!(loan.principal_amount, LoanFixtures::principal());
        assert_eq!(loan.total_amount, LoanFixtures::total_amount());
        assert_eq!(loan.total_interest(), LoanFixtures::total_interest());
        assert_eq!(loan.interest_rate_yearly, LoanFixtures::rate());
        assert_eq!(loan.term_years, LoanFixtures::term_years());
        assert_eq!(loan.monthly_installment, LoanFixtures::monthly_installment());
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_loan_ids_are_unique() {
        assert_ne!(reference_loan().id, reference_loan().id);
    }

    #[test]
    fn test_paid_off_loan_cannot_be_marked_again() {
        let mut loan = TestLoanBuilder::new().paid_off().build();
        assert!(!loan.mark_paid_off());
        assert_eq!(loan.status, LoanStatus::PaidOff);
    }

    #[test]
    fn test_status_serializes_as_wire_name() {
        assert_eq!(serde_json::to_string(&LoanStatus::PaidOff).unwrap(), "\"PAID_OFF\"");
        assert_eq!(serde_json::to_string(&LoanStatus::Active).unwrap(), "\"ACTIVE\"");
    }

    #[test]
    fn test_payment_rejects_zero() {
        let err = Payment::new(LoanId::new_v7(), Decimal::ZERO, PaymentType::LumpSum).unwrap_err();
        assert!(matches!(err, LendingError::InvalidInput(_)));
    }

    #[test]
    fn test_not_found_family() {
        assert!(LendingError::LoanNotFound(LoanId::new_v7()).is_not_found());
        assert!(LendingError::NoLoansFound(CustomerId::new_v7()).is_not_found());
        assert!(!LendingError::invalid("x").is_not_found());
    }
}

// ============================================================================
// Ledger Tests
// ============================================================================

mod ledger_tests {
    use super::*;

    fn pay(loan: &Loan, amount: Decimal, payment_type: PaymentType) -> Payment {
        let builder = TestPaymentBuilder::new(loan.id).with_amount(amount);
        match payment_type {
            PaymentType::Emi => builder.build(),
            PaymentType::LumpSum => builder.lump_sum().build(),
        }
    }

    #[test]
    fn test_emi_then_lump_sum_clears_loan() {
        let loan = reference_loan();
        let mut payments = vec![pay(&loan, LoanFixtures::monthly_installment(), PaymentType::Emi)];

        let after_emi = BalanceSummary::derive(&loan, &payments).unwrap();
        assert_balance(&after_emi, LoanFixtures::balance_after_first_emi(), 23);

        payments.push(pay(&loan, dec!(138000), PaymentType::LumpSum));
        let after_lump = BalanceSummary::derive(&loan, &payments).unwrap();
        assert_balance(&after_lump, dec!(0), 0);
        assert!(after_lump.is_settled());
    }

    #[test]
    fn test_payment_types_reduce_balance_equally() {
        let loan = reference_loan();
        let emi = BalanceSummary::derive(&loan, &[pay(&loan, dec!(500), PaymentType::Emi)]).unwrap();
        let lump = BalanceSummary::derive(&loan, &[pay(&loan, dec!(500), PaymentType::LumpSum)]).unwrap();
        assert_eq!(emi, lump);
    }

    #[test]
    fn test_ledger_keeps_payments() {
        let loan = reference_loan();
        let payments = vec![
            pay(&loan, dec!(6000), PaymentType::Emi),
            TestPaymentBuilder::new(loan.id)
                .with_amount(dec!(6000))
                .offset_seconds(60)
                .build(),
        ];
        let ledger = LoanLedger::new(loan, payments).unwrap();
        assert_eq!(ledger.payments.len(), 2);
        assert!(ledger.payments[0].timestamp < ledger.payments[1].timestamp);
        assert_eq!(ledger.summary.total_paid, dec!(12000));
        assert_eq!(ledger.summary.installments_left, 22);
    }

    #[test]
    fn test_overview_counts_loans() {
        let customer_id = CustomerId::new_v7();
        let first = TestLoanBuilder::new().with_customer_id(customer_id).build();
        let second = TestLoanBuilder::new()
            .with_customer_id(customer_id)
            .with_principal(dec!(5000))
            .with_rate(dec!(12))
            .with_term_years(1)
            .build();
        let overview = AccountOverview {
            customer_id,
            loans: vec![
                LoanSummary::new(&first, &[]).unwrap(),
                LoanSummary::new(&second, &[]).unwrap(),
            ],
        };
        assert_eq!(overview.total_loans(), 2);
        assert_eq!(overview.loans[1].total_amount, dec!(5600));
        assert_eq!(overview.loans[1].installments_left, 12);
    }

    #[test]
    fn test_overflowing_payments_are_reported() {
        let loan = reference_loan();
        let big = Decimal::MAX / dec!(2) + dec!(1);
        let payments = vec![pay(&loan, big, PaymentType::LumpSum), pay(&loan, big, PaymentType::LumpSum)];

        let err = LoanLedger::new(loan, payments).unwrap_err();
        assert!(matches!(err, LendingError::LedgerOverflow(_)));
    }

    #[test]
    fn test_negative_balance_has_no_installments() {
        let loan = reference_loan();
        assert_eq!(installments_left(&loan, dec!(-0.01)), 0);
        assert_eq!(installments_left(&loan, dec!(0.01)), 1);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_installments_sum_to_total(
        principal in principal_strategy(),
        rate in rate_strategy(),
        years in term_years_strategy(),
    ) {
        let terms = calculate_terms(principal, rate, years).unwrap();
        let reconstructed = terms.monthly_installment * Decimal::from(terms.installment_count());
        assert_decimal_approx_eq(reconstructed, terms.total_amount, dec!(0.0001));
    }

    #[test]
    fn prop_total_exceeds_principal(
        principal in principal_strategy(),
        rate in rate_strategy(),
        years in term_years_strategy(),
    ) {
        let terms = calculate_terms(principal, rate, years).unwrap();
        prop_assert!(terms.total_amount > terms.principal);
        prop_assert_eq!(terms.total_amount - terms.total_interest, principal);
    }

    #[test]
    fn prop_unpaid_loan_needs_full_term(
        principal in principal_strategy(),
        rate in rate_strategy(),
        years in term_years_strategy(),
    ) {
        let loan = TestLoanBuilder::new()
            .with_principal(principal)
            .with_rate(rate)
            .with_term_years(years)
            .build();
        prop_assert_eq!(installments_left(&loan, loan.total_amount), u64::from(years) * 12);
    }

    #[test]
    fn prop_payment_reduces_balance_by_its_amount(
        payments in prop::collection::vec((payment_amount_strategy(), payment_type_strategy()), 1..20),
    ) {
        let loan = reference_loan();
        let mut history: Vec<Payment> = Vec::new();
        let mut previous = BalanceSummary::derive(&loan, &history).unwrap();

        for (amount, payment_type) in payments {
            history.push(Payment::new(loan.id, amount, payment_type).unwrap());
            let next = BalanceSummary::derive(&loan, &history).unwrap();
            prop_assert_eq!(next.total_paid - previous.total_paid, amount);
            prop_assert_eq!(previous.balance - next.balance, amount);
            prop_assert!(next.installments_left <= previous.installments_left);
            previous = next;
        }
    }

    #[test]
    fn prop_registered_names_are_kept(name in customer_name_strategy()) {
        let customer = Customer::register(name.clone()).unwrap();
        prop_assert_eq!(customer.name, name);
    }
}
