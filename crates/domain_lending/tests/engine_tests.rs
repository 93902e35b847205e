//! End-to-end tests of the accounting engine over the in-memory store

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{CustomerId, LoanId};
use domain_lending::ports::memory::InMemoryLedgerStore;
use domain_lending::{LendingError, LoanAccountingEngine, LoanStatus, PaymentType};
use test_utils::CustomerFixtures;

fn setup() -> (LoanAccountingEngine, Arc<InMemoryLedgerStore>) {
    let store = Arc::new(InMemoryLedgerStore::new());
    (LoanAccountingEngine::new(store.clone()), store)
}

#[tokio::test]
async fn test_reference_loan_lifecycle() {
    let (engine, _) = setup();
    let customer = engine.register_customer("Meera Iyer").await.unwrap();

    let loan = engine
        .create_loan(customer.id, dec!(120000), 2, dec!(10))
        .await
        .unwrap();
    assert_eq!(loan.total_interest(), dec!(24000));
    assert_eq!(loan.total_amount, dec!(144000));
    assert_eq!(loan.monthly_installment, dec!(6000));

    let receipt = engine
        .record_payment(loan.id, dec!(6000), PaymentType::Emi)
        .await
        .unwrap();
    assert_eq!(receipt.balance, dec!(138000));
    assert_eq!(receipt.installments_left, 23);
    assert_eq!(receipt.status, LoanStatus::Active);

    let receipt = engine
        .record_payment(loan.id, dec!(138000), PaymentType::LumpSum)
        .await
        .unwrap();
    assert_eq!(receipt.balance, dec!(0));
    assert_eq!(receipt.installments_left, 0);
    assert_eq!(receipt.status, LoanStatus::PaidOff);

    let ledger = engine.ledger(loan.id).await.unwrap();
    assert_eq!(ledger.loan.status, LoanStatus::PaidOff);
    assert_eq!(ledger.payments.len(), 2);
    assert_eq!(ledger.payments[0].payment_type, PaymentType::Emi);
    assert_eq!(ledger.payments[1].payment_type, PaymentType::LumpSum);
    assert_eq!(ledger.summary.total_paid, dec!(144000));
}

#[tokio::test]
async fn test_overview_without_loans() {
    let (engine, _) = setup();
    let customer = engine.register_customer("No Loans").await.unwrap();

    let err = engine.account_overview(customer.id).await.unwrap_err();
    assert!(matches!(err, LendingError::NoLoansFound(id) if id == customer.id));
}

#[tokio::test]
async fn test_overview_for_unknown_customer() {
    let (engine, _) = setup();
    let err = engine.account_overview(CustomerId::new_v7()).await.unwrap_err();
    assert!(matches!(err, LendingError::NoLoansFound(_)));
}

#[tokio::test]
async fn test_payment_on_missing_loan_persists_nothing() {
    let (engine, store) = setup();

    let err = engine
        .record_payment(LoanId::new_v7(), dec!(100), PaymentType::Emi)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::LoanNotFound(_)));
    assert_eq!(store.payment_count().await, 0);
}

#[tokio::test]
async fn test_invalid_payment_persists_nothing() {
    let (engine, store) = setup();
    let customer = engine.register_customer("Kiran").await.unwrap();
    let loan = engine.create_loan(customer.id, dec!(1000), 1, dec!(12)).await.unwrap();

    let err = engine
        .record_payment(loan.id, dec!(0), PaymentType::Emi)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::InvalidInput(_)));
    assert_eq!(store.payment_count().await, 0);
}

#[tokio::test]
async fn test_register_blank_name() {
    let (engine, _) = setup();
    let err = engine.register_customer("  ").await.unwrap_err();
    assert!(matches!(err, LendingError::InvalidInput(_)));
}

#[tokio::test]
async fn test_ledger_reads_are_idempotent() {
    let (engine, _) = setup();
    let customer = engine.register_customer("Lakshmi").await.unwrap();
    let loan = engine.create_loan(customer.id, dec!(5000), 1, dec!(8)).await.unwrap();
    engine.record_payment(loan.id, dec!(450), PaymentType::Emi).await.unwrap();

    let first = engine.ledger(loan.id).await.unwrap();
    let second = engine.ledger(loan.id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_overpayment_keeps_paid_off_and_goes_negative() {
    let (engine, _) = setup();
    let customer = engine.register_customer("Dev").await.unwrap();
    let loan = engine.create_loan(customer.id, dec!(1000), 1, dec!(10)).await.unwrap();

    let receipt = engine
        .record_payment(loan.id, dec!(1100), PaymentType::LumpSum)
        .await
        .unwrap();
    assert_eq!(receipt.status, LoanStatus::PaidOff);

    let receipt = engine
        .record_payment(loan.id, dec!(50), PaymentType::Emi)
        .await
        .unwrap();
    assert_eq!(receipt.balance, dec!(-50));
    assert_eq!(receipt.installments_left, 0);
    assert_eq!(receipt.status, LoanStatus::PaidOff);
}

#[tokio::test]
async fn test_overview_lists_every_loan() {
    let (engine, _) = setup();
    let customer = engine.register_customer("Farah").await.unwrap();
    let first = engine.create_loan(customer.id, dec!(120000), 2, dec!(10)).await.unwrap();
    let second = engine.create_loan(customer.id, dec!(1000), 1, dec!(10)).await.unwrap();
    engine.record_payment(second.id, dec!(1100), PaymentType::LumpSum).await.unwrap();

    let overview = engine.account_overview(customer.id).await.unwrap();
    assert_eq!(overview.total_loans(), 2);

    let first_line = overview.loans.iter().find(|l| l.loan_id == first.id).unwrap();
    assert_eq!(first_line.total_interest, dec!(24000));
    assert_eq!(first_line.balance, dec!(144000));
    assert_eq!(first_line.installments_left, 24);
    assert_eq!(first_line.status, LoanStatus::Active);

    let second_line = overview.loans.iter().find(|l| l.loan_id == second.id).unwrap();
    assert_eq!(second_line.total_paid, dec!(1100));
    assert_eq!(second_line.status, LoanStatus::PaidOff);
}

#[tokio::test]
async fn test_concurrent_payments_are_all_applied() {
    let (engine, store) = setup();
    let engine = Arc::new(engine);
    let customer = engine.register_customer(&CustomerFixtures::random_name()).await.unwrap();
    let loan = engine.create_loan(customer.id, dec!(1000), 1, dec!(20)).await.unwrap();

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine.record_payment(loan.id, dec!(100), PaymentType::Emi).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.payment_count().await, 12);
    let ledger = engine.ledger(loan.id).await.unwrap();
    assert_eq!(ledger.summary.balance, dec!(0));
    assert_eq!(ledger.loan.status, LoanStatus::PaidOff);
}
