//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openfx_common::ErrorBody;
use openfx_ledger::LedgerError;
use openfx_quote::QuoteError;
use thiserror::Error;

/// Errors surfaced by the HTTP boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Quote(#[from] QuoteError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    /// Simulated transient failure at the payment rail.
    #[error("Payment processing failed. Please try again.")]
    PaymentFailed,
    #[error("Transaction not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Quote(_) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Ledger(LedgerError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PaymentFailed => StatusCode::BAD_GATEWAY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
