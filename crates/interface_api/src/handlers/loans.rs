//! Loan, payment and ledger handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use validator::Validate;

use core_kernel::LoanId;
use domain_lending::{LendingError, PaymentType};

use crate::dto::loans::*;
use crate::{error::ApiError, AppState};

const MISSING_FIELDS: &str = "Missing required fields";

/// Originates a loan
pub async fn create_loan(
    State(state): State<AppState>,
    payload: Result<Json<CreateLoanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let (Some(customer_id), Some(principal), Some(years), Some(rate)) = (
        request.customer_id,
        request.loan_amount,
        request.loan_period_years,
        request.interest_rate_yearly,
    ) else {
        return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let term_years = whole_years(years)?;
    let loan = state
        .engine
        .create_loan(customer_id, principal, term_years, rate)
        .await?;

    Ok((StatusCode::CREATED, Json(loan.into())))
}

/// Records a payment against a loan
pub async fn record_payment(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
    payload: Result<Json<RecordPaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let (Some(amount), Some(payment_type)) = (request.amount, request.payment_type) else {
        return Err(ApiError::BadRequest("Invalid payment details".to_string()));
    };
    let payment_type: PaymentType = payment_type.parse()?;
    if amount <= Decimal::ZERO {
        return Err(ApiError::BadRequest("payment amount must be positive".to_string()));
    }

    let loan_id = parse_loan_id(&loan_id)?;
    let receipt = state.engine.record_payment(loan_id, amount, payment_type).await?;

    Ok(Json(receipt.into()))
}

/// Returns a loan with its transactions and balance
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let loan_id = parse_loan_id(&loan_id)?;
    let ledger = state.engine.ledger(loan_id).await?;
    Ok(Json(ledger.into()))
}

/// A path id that does not parse cannot name a stored loan
fn parse_loan_id(raw: &str) -> Result<LoanId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(LendingError::LoanNotFound(LoanId::default())))
}

fn whole_years(years: Decimal) -> Result<u32, ApiError> {
    if !years.fract().is_zero() {
        return Err(ApiError::BadRequest(
            "loan period must be a whole number of years".to_string(),
        ));
    }
    match years.to_u32() {
        Some(years) => Ok(years),
        None if years.is_sign_positive() => {
            Err(ApiError::BadRequest("loan period is too long".to_string()))
        }
        None => Err(ApiError::BadRequest(
            "loan period must be at least one year".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_years() {
        assert_eq!(whole_years(dec!(2)).unwrap(), 2);
        assert_eq!(whole_years(dec!(2.0)).unwrap(), 2);
        assert!(whole_years(dec!(1.5)).is_err());
        assert!(whole_years(dec!(-1)).is_err());
        assert!(matches!(
            whole_years(dec!(5000000000)),
            Err(ApiError::BadRequest(msg)) if msg.contains("too long")
        ));
    }

    #[test]
    fn test_unparseable_loan_id_is_not_found() {
        assert!(matches!(parse_loan_id("not-a-loan"), Err(ApiError::NotFound(_))));
    }
}
