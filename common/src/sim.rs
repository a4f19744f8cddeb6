//! Injectable randomness for the simulated payment rail.
//!
//! Every probabilistic decision (payment rejection, transaction failure)
//! goes through a [`FailureSampler`] so tests can force either branch and
//! reproducible runs can pin a seed.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides probabilistic failure outcomes.
pub trait FailureSampler: Send + Sync {
    /// Roll a single failure decision with the given probability in `[0, 1]`.
    fn roll(&self, probability: f64) -> bool;
}

/// Sampler backed by a seedable RNG.
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    /// Create a sampler, seeded for reproducibility when a seed is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl FailureSampler for SeededSampler {
    fn roll(&self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.lock().gen_bool(probability)
    }
}

/// Sampler with a fixed outcome, for forcing a branch in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub bool);

impl FailureSampler for FixedOutcome {
    fn roll(&self, _probability: f64) -> bool {
        self.0
    }
}
