//! Random sources for the tone scorer.
//!
//! Tone scoring deliberately adds bounded noise to simulate classifier
//! uncertainty. The source is injected so tests can pin it down.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform jitter.
pub trait JitterSource: Send + Sync {
    /// Draw a value in `[0.0, max]`.
    fn sample(&self, max: f64) -> f64;
}

/// Thread-local RNG; the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(0.0..=max)
    }
}

/// Reproducible jitter from a seeded RNG.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0.0..=max)
    }
}

/// Always returns the same fraction of `max`.
///
/// `FixedJitter::new(0.0)` yields the lower bound of every range and
/// `FixedJitter::new(1.0)` the upper bound.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter {
    fraction: f64,
}

impl FixedJitter {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn min() -> Self {
        Self::new(0.0)
    }

    pub fn max() -> Self {
        Self::new(1.0)
    }
}

impl JitterSource for FixedJitter {
    fn sample(&self, max: f64) -> f64 {
        max * self.fraction
    }
}
