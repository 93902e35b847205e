//! HTTP API Layer
//!
//! REST API for the loan ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: customers, loans (payments and ledger), health
//! - **Middleware**: request ids, tracing, request logging, CORS
//! - **DTOs**: request/response bodies; money is emitted as JSON numbers
//! - **Error Handling**: every failure is `{"error": "..."}`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(engine, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_lending::LoanAccountingEngine;

use crate::config::ApiConfig;
use crate::handlers::{customers, health, loans};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LoanAccountingEngine>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(engine: Arc<LoanAccountingEngine>, config: ApiConfig) -> Router {
    let state = AppState { engine, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/", post(customers::create_customer))
        .route("/:customer_id/overview", get(customers::account_overview));

    let loan_routes = Router::new()
        .route("/", post(loans::create_loan))
        .route("/:loan_id/payments", post(loans::record_payment))
        .route("/:loan_id/ledger", get(loans::get_ledger));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/loans", loan_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
