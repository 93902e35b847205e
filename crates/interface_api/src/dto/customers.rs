//! Customer DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CustomerId, LoanId};
use domain_lending::{AccountOverview, Customer, LoanStatus, LoanSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub customer_id: CustomerId,
    pub name: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            customer_id: customer.id,
            name: customer.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountOverviewResponse {
    pub customer_id: CustomerId,
    pub total_loans: usize,
    pub loans: Vec<LoanOverviewResponse>,
}

impl From<AccountOverview> for AccountOverviewResponse {
    fn from(overview: AccountOverview) -> Self {
        Self {
            customer_id: overview.customer_id,
            total_loans: overview.total_loans(),
            loans: overview.loans.into_iter().map(LoanOverviewResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanOverviewResponse {
    pub loan_id: LoanId,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_amount: Decimal,
    pub emis_left: u64,
    pub status: LoanStatus,
}

impl From<LoanSummary> for LoanOverviewResponse {
    fn from(summary: LoanSummary) -> Self {
        Self {
            loan_id: summary.loan_id,
            principal: summary.principal,
            total_amount: summary.total_amount,
            total_interest: summary.total_interest,
            emi_amount: summary.monthly_installment,
            amount_paid: summary.total_paid,
            balance_amount: summary.balance,
            emis_left: summary.installments_left,
            status: summary.status,
        }
    }
}
