//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::{DateTime, Duration, Utc};
use core_kernel::{CustomerId, LoanId};
use domain_lending::{calculate_terms, Loan, LoanStatus, Payment, PaymentType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::LoanFixtures;

/// Builder for loans
pub struct TestLoanBuilder {
    customer_id: CustomerId,
    principal: Decimal,
    rate: Decimal,
    term_years: u32,
    status: LoanStatus,
}

impl Default for TestLoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLoanBuilder {
    /// Starts from the reference loan
    pub fn new() -> Self {
        Self {
            customer_id: CustomerId::new_v7(),
            principal: LoanFixtures::principal(),
            rate: LoanFixtures::rate(),
            term_years: LoanFixtures::term_years(),
            status: LoanStatus::Active,
        }
    }

    pub fn with_customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = id;
        self
    }

    pub fn with_principal(mut self, principal: Decimal) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_term_years(mut self, years: u32) -> Self {
        self.term_years = years;
        self
    }

    pub fn paid_off(mut self) -> Self {
        self.status = LoanStatus::PaidOff;
        self
    }

    /// Builds the loan
    ///
    /// # Panics
    ///
    /// Panics if the configured terms are invalid
    pub fn build(self) -> Loan {
        let terms = calculate_terms(self.principal, self.rate, self.term_years)
            .expect("builder terms must be valid");
        let mut loan = Loan::originate(self.customer_id, terms);
        loan.status = self.status;
        loan
    }
}

/// Builder for payments
pub struct TestPaymentBuilder {
    loan_id: LoanId,
    amount: Decimal,
    payment_type: PaymentType,
    timestamp: Option<DateTime<Utc>>,
}

impl TestPaymentBuilder {
    /// An EMI of 100 against the given loan
    pub fn new(loan_id: LoanId) -> Self {
        Self {
            loan_id,
            amount: dec!(100),
            payment_type: PaymentType::Emi,
            timestamp: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn lump_sum(mut self) -> Self {
        self.payment_type = PaymentType::LumpSum;
        self
    }

    /// Stamps the payment `seconds` after now
    pub fn offset_seconds(mut self, seconds: i64) -> Self {
        self.timestamp = Some(Utc::now() + Duration::seconds(seconds));
        self
    }

    /// Builds the payment
    ///
    /// # Panics
    ///
    /// Panics if the amount is not positive
    pub fn build(self) -> Payment {
        let mut payment = Payment::new(self.loan_id, self.amount, self.payment_type)
            .expect("builder amount must be positive");
        if let Some(timestamp) = self.timestamp {
            payment.timestamp = timestamp;
        }
        payment
    }
}
