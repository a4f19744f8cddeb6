//! The three HTTP endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use openfx_common::{PayRequest, PayResponse, TransactionId};
use openfx_ledger::Transaction;
use openfx_quote::{Quote, QuoteRequest};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `POST /quote`
async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<Json<Quote>> {
    if let Some(latency) = &state.latency {
        latency.quote().await;
    }

    let quote = state.engine.compute(&request)?;
    Ok(Json(quote))
}

/// `POST /pay`
async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PayRequest>,
) -> ApiResult<Json<PayResponse>> {
    if let Some(latency) = &state.latency {
        latency.pay().await;
    }

    if state.pay_failures.roll(state.pay_failure_rate) {
        warn!(quote_id = %request.quote_id, "Simulated rail failure");
        return Err(ApiError::PaymentFailed);
    }

    let transaction = state.ledger.create().await?;
    Ok(Json(PayResponse {
        transaction_id: transaction.id,
    }))
}

/// `GET /transaction/{id}`
async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    if let Some(latency) = &state.latency {
        latency.status().await;
    }

    let id = TransactionId::parse(&id).map_err(|_| ApiError::NotFound)?;
    let snapshot = state.ledger.get(id).await?;
    Ok(Json(snapshot))
}

/// Route table.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quote", post(create_quote))
        .route("/pay", post(submit_payment))
        .route("/transaction/{id}", get(get_transaction))
}

/// Assemble the application.
pub fn app(state: Arc<AppState>) -> Router {
    router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use openfx_common::{
        Clock, FailureSampler, FixedOutcome, ManualClock, QuoteId,
    };
    use openfx_ledger::{Ledger, LedgerConfig, MemoryStore, TransactionStatus};
    use openfx_quote::{QuoteEngine, QuoteEngineConfig, RateTable};
    use rust_decimal_macros::dec;

    fn test_state(
        clock: Arc<ManualClock>,
        pay_fails: bool,
        transaction_fails: bool,
    ) -> Arc<AppState> {
        let clock: Arc<dyn Clock> = clock;
        let engine = QuoteEngine::new(
            RateTable::bundled(),
            clock.clone(),
            QuoteEngineConfig::default(),
        );
        let ledger = Ledger::new(
            Arc::new(MemoryStore::new()),
            clock,
            Arc::new(FixedOutcome(transaction_fails)),
            LedgerConfig::default(),
        );
        let pay_failures: Arc<dyn FailureSampler> = Arc::new(FixedOutcome(pay_fails));

        Arc::new(AppState {
            engine,
            ledger,
            pay_failures,
            pay_failure_rate: 0.10,
            latency: None,
        })
    }

    fn usd_to_eur(amount: rust_decimal::Decimal) -> QuoteRequest {
        QuoteRequest {
            source_currency: "USD".into(),
            destination_currency: "EUR".into(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_quote_endpoint_returns_a_priced_quote() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock.clone(), false, false);

        let Json(quote) = create_quote(State(state), Json(usd_to_eur(dec!(100))))
            .await
            .unwrap();

        assert_eq!(quote.fx_rate, dec!(0.92));
        assert_eq!(quote.fee, dec!(1.50));
        assert_eq!(quote.total_payable, dec!(101.50));
        assert_eq!(quote.destination_amount, dec!(92.00));
        assert_eq!(quote.expires_at, clock.now() + Duration::seconds(30));
    }

    #[tokio::test]
    async fn test_quote_endpoint_rejects_bad_requests() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock, false, false);

        let result = create_quote(State(state.clone()), Json(usd_to_eur(dec!(0)))).await;
        assert!(matches!(result, Err(ApiError::Quote(_))));

        let result = create_quote(
            State(state),
            Json(QuoteRequest {
                source_currency: "USD".into(),
                destination_currency: "XYZ".into(),
                amount: dec!(100),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Quote(_))));
    }

    #[tokio::test]
    async fn test_pay_endpoint_creates_a_transaction() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock, false, false);

        let Json(response) = submit_payment(
            State(state.clone()),
            Json(PayRequest {
                quote_id: QuoteId::new(),
            }),
        )
        .await
        .unwrap();

        let snapshot = state.ledger.get(response.transaction_id).await.unwrap();
        assert_eq!(snapshot.status, TransactionStatus::Processing);
    }

    #[tokio::test]
    async fn test_pay_endpoint_simulated_rail_failure() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock, true, false);

        let result = submit_payment(
            State(state),
            Json(PayRequest {
                quote_id: QuoteId::new(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::PaymentFailed)));
    }

    #[tokio::test]
    async fn test_transaction_endpoint_follows_the_progression() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock.clone(), false, false);

        let Json(created) = submit_payment(
            State(state.clone()),
            Json(PayRequest {
                quote_id: QuoteId::new(),
            }),
        )
        .await
        .unwrap();

        clock.advance(Duration::seconds(7));

        let Json(snapshot) = get_transaction(
            State(state),
            Path(created.transaction_id.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(snapshot.status, TransactionStatus::Settled);
    }

    #[tokio::test]
    async fn test_transaction_endpoint_unknown_and_malformed_ids() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock, false, false);

        let result = get_transaction(
            State(state.clone()),
            Path(TransactionId::new().to_string()),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Ledger(_))));

        let result = get_transaction(State(state), Path("not-a-uuid".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_doomed_transaction_reads_failed_with_http_success() {
        let clock = Arc::new(ManualClock::from_now());
        let state = test_state(clock, false, true);

        let Json(created) = submit_payment(
            State(state.clone()),
            Json(PayRequest {
                quote_id: QuoteId::new(),
            }),
        )
        .await
        .unwrap();

        // A failed transfer is a domain state, not a transport error.
        let Json(snapshot) = get_transaction(
            State(state),
            Path(created.transaction_id.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(snapshot.status, TransactionStatus::Failed);
        assert!(snapshot.failed);
    }
}
