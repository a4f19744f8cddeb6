//! Shared application state.

use std::sync::Arc;

use openfx_common::{Clock, FailureSampler, SeededSampler, SystemClock};
use openfx_ledger::{Ledger, LedgerConfig, MemoryStore};
use openfx_quote::{QuoteEngine, QuoteEngineConfig, RateTable};

use crate::config::ServerConfig;
use crate::latency::LatencySimulator;

/// State shared by all handlers.
pub struct AppState {
    /// Quote engine over the bundled rate table.
    pub engine: QuoteEngine,
    /// Transaction ledger.
    pub ledger: Ledger,
    /// Sampler for the pay endpoint's simulated rail failures.
    pub pay_failures: Arc<dyn FailureSampler>,
    /// Probability of a simulated rail failure per payment.
    pub pay_failure_rate: f64,
    /// Simulated latency, when enabled.
    pub latency: Option<LatencySimulator>,
}

impl AppState {
    /// Build production state from configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let sampler: Arc<dyn FailureSampler> = Arc::new(SeededSampler::new(config.seed));

        let engine = QuoteEngine::new(
            RateTable::bundled(),
            clock.clone(),
            QuoteEngineConfig {
                validity: config.quote_validity,
            },
        );

        let ledger = Ledger::new(
            Arc::new(MemoryStore::new()),
            clock,
            sampler.clone(),
            LedgerConfig {
                failure_rate: config.transaction_failure_rate,
                schedule: config.schedule.clone(),
            },
        );

        let latency = config
            .latency
            .clone()
            .map(|bands| LatencySimulator::new(bands, config.seed));

        Self {
            engine,
            ledger,
            pay_failures: sampler,
            pay_failure_rate: config.pay_failure_rate,
            latency,
        }
    }
}
