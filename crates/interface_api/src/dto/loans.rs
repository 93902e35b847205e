//! Loan and payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, LoanId, PaymentId};
use domain_lending::{Loan, LoanLedger, LoanStatus, Payment, PaymentReceipt, PaymentType};

pub const PAYMENT_RECORDED: &str = "Payment recorded successfully";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    #[validate(required(message = "Missing required fields"))]
    pub customer_id: Option<CustomerId>,
    #[validate(required(message = "Missing required fields"))]
    pub loan_amount: Option<Decimal>,
    #[validate(required(message = "Missing required fields"))]
    pub loan_period_years: Option<Decimal>,
    #[validate(required(message = "Missing required fields"))]
    pub interest_rate_yearly: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_emi: Decimal,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            loan_id: loan.id,
            customer_id: loan.customer_id,
            total_amount_payable: loan.total_amount,
            monthly_emi: loan.monthly_installment,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    #[validate(required(message = "Invalid payment details"))]
    pub amount: Option<Decimal>,
    #[validate(
        required(message = "Invalid payment details"),
        length(min = 1, message = "Invalid payment details")
    )]
    pub payment_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    pub loan_id: LoanId,
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_balance: Decimal,
    pub emis_left: u64,
    pub status: LoanStatus,
}

impl From<PaymentReceipt> for PaymentResponse {
    fn from(receipt: PaymentReceipt) -> Self {
        Self {
            payment_id: receipt.payment_id,
            loan_id: receipt.loan_id,
            message: PAYMENT_RECORDED.to_string(),
            remaining_balance: receipt.balance,
            emis_left: receipt.installments_left,
            status: receipt.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_emi: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_amount: Decimal,
    pub emis_left: u64,
    pub status: LoanStatus,
    pub transactions: Vec<TransactionResponse>,
}

impl From<LoanLedger> for LedgerResponse {
    fn from(ledger: LoanLedger) -> Self {
        Self {
            loan_id: ledger.loan.id,
            customer_id: ledger.loan.customer_id,
            principal: ledger.loan.principal_amount,
            total_amount: ledger.loan.total_amount,
            monthly_emi: ledger.loan.monthly_installment,
            amount_paid: ledger.summary.total_paid,
            balance_amount: ledger.summary.balance,
            emis_left: ledger.summary.installments_left,
            status: ledger.loan.status,
            transactions: ledger.payments.into_iter().map(TransactionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub transaction_id: PaymentId,
    pub date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
}

impl From<Payment> for TransactionResponse {
    fn from(payment: Payment) -> Self {
        Self {
            transaction_id: payment.id,
            date: payment.timestamp,
            amount: payment.amount,
            payment_type: payment.payment_type,
        }
    }
}
