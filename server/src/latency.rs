//! Simulated network latency.
//!
//! Off by default; when enabled the handlers hold each request for a
//! random span inside the endpoint's band, mimicking the feel of a real
//! rail without affecting any contract.

use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inclusive latency band in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyBand {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyBand {
    /// Create a band.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

/// Per-endpoint latency bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Band for `POST /quote`.
    pub quote: LatencyBand,
    /// Band for `POST /pay`.
    pub pay: LatencyBand,
    /// Band for `GET /transaction/{id}`.
    pub status: LatencyBand,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            quote: LatencyBand::new(600, 1400),
            pay: LatencyBand::new(800, 1200),
            status: LatencyBand::new(300, 800),
        }
    }
}

/// Samples and applies per-endpoint delays.
pub struct LatencySimulator {
    rng: Mutex<StdRng>,
    config: LatencyConfig,
}

impl LatencySimulator {
    /// Create a simulator, seeded for reproducibility when a seed is given.
    pub fn new(config: LatencyConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            config,
        }
    }

    /// Sample a delay inside the band.
    pub fn sample(&self, band: LatencyBand) -> Duration {
        let ms = if band.min_ms >= band.max_ms {
            band.min_ms
        } else {
            self.rng.lock().gen_range(band.min_ms..=band.max_ms)
        };
        Duration::from_millis(ms)
    }

    /// Hold for the quote endpoint's band.
    pub async fn quote(&self) {
        tokio::time::sleep(self.sample(self.config.quote)).await;
    }

    /// Hold for the pay endpoint's band.
    pub async fn pay(&self) {
        tokio::time::sleep(self.sample(self.config.pay)).await;
    }

    /// Hold for the status endpoint's band.
    pub async fn status(&self) {
        tokio::time::sleep(self.sample(self.config.status)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_inside_the_band() {
        let simulator = LatencySimulator::new(LatencyConfig::default(), Some(7));
        let band = LatencyBand::new(600, 1400);

        for _ in 0..64 {
            let sample = simulator.sample(band);
            assert!(sample >= Duration::from_millis(600));
            assert!(sample <= Duration::from_millis(1400));
        }
    }

    #[test]
    fn test_degenerate_band_is_fixed() {
        let simulator = LatencySimulator::new(LatencyConfig::default(), Some(7));
        let band = LatencyBand::new(250, 250);

        assert_eq!(simulator.sample(band), Duration::from_millis(250));
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let a = LatencySimulator::new(LatencyConfig::default(), Some(11));
        let b = LatencySimulator::new(LatencyConfig::default(), Some(11));
        let band = LatencyBand::new(100, 900);

        let run_a: Vec<Duration> = (0..16).map(|_| a.sample(band)).collect();
        let run_b: Vec<Duration> = (0..16).map(|_| b.sample(band)).collect();
        assert_eq!(run_a, run_b);
    }
}
