//! HTTP client for the three server endpoints.

use async_trait::async_trait;
use openfx_common::{
    ErrorBody, PayRequest, PayResponse, QuoteId, Result, TransactionId, TransferError,
};
use openfx_ledger::Transaction;
use openfx_quote::{Quote, QuoteRequest};
use reqwest::StatusCode;
use tracing::{debug, instrument};

use crate::payment::PaymentSubmitter;
use crate::poller::StatusFetcher;

/// Client for the OpenFX HTTP boundary.
#[derive(Debug, Clone)]
pub struct OpenFxApi {
    base_url: String,
    http: reqwest::Client,
}

impl OpenFxApi {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// `POST /quote`
    #[instrument(skip(self, request))]
    pub async fn request_quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let response = self
            .http
            .post(format!("{}/quote", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_failure(status, Self::error_message(response).await));
        }

        let quote: Quote = response
            .json()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        debug!(quote_id = %quote.id, "Quote received");
        Ok(quote)
    }

    /// `POST /pay`
    #[instrument(skip(self), fields(quote_id = %quote_id))]
    pub async fn submit_payment(&self, quote_id: QuoteId) -> Result<TransactionId> {
        let response = self
            .http
            .post(format!("{}/pay", self.base_url))
            .json(&PayRequest { quote_id })
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_failure(status, Self::error_message(response).await));
        }

        let body: PayResponse = response
            .json()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        debug!(transaction_id = %body.transaction_id, "Payment accepted");
        Ok(body.transaction_id)
    }

    /// `GET /transaction/{id}`
    #[instrument(skip(self), fields(transaction_id = %id))]
    pub async fn fetch_transaction(&self, id: TransactionId) -> Result<Transaction> {
        let response = self
            .http
            .get(format!("{}/transaction/{}", self.base_url, id))
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransferError::TransactionNotFound(id));
        }
        if !status.is_success() {
            return Err(Self::map_failure(status, Self::error_message(response).await));
        }

        response
            .json()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))
    }

    /// Pull the server's error message out of a failure body.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        }
    }

    fn map_failure(status: StatusCode, message: String) -> TransferError {
        match status {
            StatusCode::BAD_REQUEST => TransferError::InvalidRequest(message),
            StatusCode::BAD_GATEWAY => TransferError::PaymentProcessingFailed,
            _ => TransferError::Network(message),
        }
    }
}

#[async_trait]
impl PaymentSubmitter for OpenFxApi {
    async fn submit(&self, quote_id: QuoteId) -> Result<TransactionId> {
        self.submit_payment(quote_id).await
    }
}

#[async_trait]
impl StatusFetcher for OpenFxApi {
    async fn fetch(&self, id: TransactionId) -> Result<Transaction> {
        self.fetch_transaction(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = OpenFxApi::new("http://localhost:8080/");
        assert_eq!(api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            OpenFxApi::map_failure(StatusCode::BAD_REQUEST, "Invalid amount".into()),
            TransferError::InvalidRequest("Invalid amount".into())
        );
        assert_eq!(
            OpenFxApi::map_failure(StatusCode::BAD_GATEWAY, "".into()),
            TransferError::PaymentProcessingFailed
        );
        assert!(matches!(
            OpenFxApi::map_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            TransferError::Network(_)
        ));
    }
}
