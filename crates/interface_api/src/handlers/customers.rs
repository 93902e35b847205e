//! Customer handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::CustomerId;
use domain_lending::LendingError;

use crate::dto::customers::*;
use crate::{error::ApiError, AppState};

/// Registers a customer
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let name = request.name.unwrap_or_default();
    let customer = state.engine.register_customer(&name).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Summarizes every loan held by a customer
pub async fn account_overview(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<AccountOverviewResponse>, ApiError> {
    let customer_id: CustomerId = customer_id
        .parse()
        .map_err(|_| ApiError::from(LendingError::NoLoansFound(CustomerId::default())))?;

    let overview = state.engine.account_overview(customer_id).await?;
    Ok(Json(overview.into()))
}
