//! Server configuration.

use chrono::Duration;
use openfx_common::constants;
use openfx_ledger::StatusSchedule;

use crate::latency::LatencyConfig;

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// Quote validity window.
    pub quote_validity: Duration,
    /// Probability that `POST /pay` rejects with a simulated rail failure.
    pub pay_failure_rate: f64,
    /// Probability that a created transaction is doomed to fail.
    pub transaction_failure_rate: f64,
    /// Thresholds for deriving transaction status from age.
    pub schedule: StatusSchedule,
    /// Simulated latency bands; `None` disables the hold entirely.
    pub latency: Option<LatencyConfig>,
    /// RNG seed for reproducible failure/latency decisions.
    pub seed: Option<u64>,
    /// Log level.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            quote_validity: constants::quote_validity(),
            pay_failure_rate: 0.10,
            transaction_failure_rate: 0.05,
            schedule: StatusSchedule::default(),
            latency: None,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("OPENFX_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = std::env::var("OPENFX_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Ok(rate) = std::env::var("OPENFX_PAY_FAILURE_RATE") {
            if let Ok(rate) = rate.parse() {
                config.pay_failure_rate = rate;
            }
        }

        if let Ok(rate) = std::env::var("OPENFX_TRANSACTION_FAILURE_RATE") {
            if let Ok(rate) = rate.parse() {
                config.transaction_failure_rate = rate;
            }
        }

        if let Ok(seed) = std::env::var("OPENFX_SEED") {
            if let Ok(seed) = seed.parse() {
                config.seed = Some(seed);
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if self.quote_validity <= Duration::zero() {
            return Err("Quote validity must be positive".to_string());
        }

        for (name, rate) in [
            ("pay failure rate", self.pay_failure_rate),
            ("transaction failure rate", self.transaction_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be within [0, 1], got {rate}"));
            }
        }

        if self.schedule.sent_after >= self.schedule.settled_after {
            return Err("Sent threshold must come before the settled threshold".to_string());
        }

        if let Some(latency) = &self.latency {
            for band in [latency.quote, latency.pay, latency.status] {
                if band.min_ms > band.max_ms {
                    return Err(format!(
                        "Latency band minimum {} exceeds maximum {}",
                        band.min_ms, band.max_ms
                    ));
                }
            }
        }

        Ok(())
    }
}
