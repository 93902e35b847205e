//! Integration tests for the PostgreSQL ledger store
//!
//! These start a PostgreSQL container and are ignored by default:
//!
//! ```text
//! cargo test -p infra_db -- --ignored
//! ```

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{CustomerId, HealthCheckable, LoanId};
use domain_lending::{
    calculate_terms, Customer, LedgerStore, LendingError, Loan, LoanAccountingEngine, LoanStatus,
    Payment, PaymentType,
};
use infra_db::PostgresLedgerStore;
use test_utils::database::TestDatabase;

async fn store() -> (TestDatabase, PostgresLedgerStore) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    let store = PostgresLedgerStore::new(db.pool().clone());
    (db, store)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_customer_and_loan_roundtrip() {
    let (_db, store) = store().await;

    let customer = Customer::register("Postgres Customer").unwrap();
    store.insert_customer(&customer).await.unwrap();
    assert_eq!(store.get_customer(customer.id).await.unwrap().name, "Postgres Customer");

    let loan = Loan::originate(customer.id, calculate_terms(dec!(120000), dec!(10), 2).unwrap());
    store.insert_loan(&loan).await.unwrap();

    let stored = store.get_loan(loan.id).await.unwrap();
    assert_eq!(stored.total_amount, dec!(144000));
    assert_eq!(stored.monthly_installment, dec!(6000));
    assert_eq!(stored.status, LoanStatus::Active);

    let loans = store.loans_for_customer(customer.id).await.unwrap();
    assert_eq!(loans.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_records_are_not_found() {
    let (_db, store) = store().await;
    assert!(store.get_loan(LoanId::new_v7()).await.unwrap_err().is_not_found());
    assert!(store.get_customer(CustomerId::new_v7()).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_payment_for_unknown_loan_is_rejected() {
    let (_db, store) = store().await;
    let payment = Payment::new(LoanId::new_v7(), dec!(10), PaymentType::Emi).unwrap();
    let err = store.append_payment(&payment).await.unwrap_err();
    assert!(!err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mark_paid_off_is_idempotent() {
    let (_db, store) = store().await;
    let customer = Customer::register("Payoff").unwrap();
    store.insert_customer(&customer).await.unwrap();
    let loan = Loan::originate(customer.id, calculate_terms(dec!(1000), dec!(10), 1).unwrap());
    store.insert_loan(&loan).await.unwrap();

    store.mark_paid_off(loan.id).await.unwrap();
    store.mark_paid_off(loan.id).await.unwrap();
    assert_eq!(store.get_loan(loan.id).await.unwrap().status, LoanStatus::PaidOff);

    assert!(store.mark_paid_off(LoanId::new_v7()).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_engine_reference_scenario() {
    let (_db, store) = store().await;
    let engine = LoanAccountingEngine::new(Arc::new(store));

    let customer = engine.register_customer("Scenario").await.unwrap();
    let loan = engine.create_loan(customer.id, dec!(120000), 2, dec!(10)).await.unwrap();

    let receipt = engine.record_payment(loan.id, dec!(6000), PaymentType::Emi).await.unwrap();
    assert_eq!(receipt.balance, dec!(138000));
    assert_eq!(receipt.installments_left, 23);

    let receipt = engine
        .record_payment(loan.id, dec!(138000), PaymentType::LumpSum)
        .await
        .unwrap();
    assert_eq!(receipt.status, LoanStatus::PaidOff);

    let ledger = engine.ledger(loan.id).await.unwrap();
    assert_eq!(ledger.payments.len(), 2);
    assert_eq!(ledger.payments[0].amount, dec!(6000));
    assert_eq!(ledger.loan.status, LoanStatus::PaidOff);

    let err = engine
        .record_payment(LoanId::new_v7(), dec!(1), PaymentType::Emi)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::LoanNotFound(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check_reports_healthy() {
    let (_db, store) = store().await;
    assert!(store.health_check().await.is_operational());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_clear_data_empties_ledger() {
    let (db, store) = store().await;
    let customer = Customer::register("Cleared").unwrap();
    store.insert_customer(&customer).await.unwrap();

    db.clear_data().await.unwrap();
    assert!(store.get_customer(customer.id).await.unwrap_err().is_not_found());
    assert!(store.loans_for_customer(customer.id).await.unwrap().is_empty());
}
