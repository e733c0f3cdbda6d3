//! Pluggable randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index into a sequence of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len - 1)
    }

    /// Uniform integer in `min..=max`.
    fn pick_in_range(&mut self, min: i32, max: i32) -> i32 {
        let span = i64::from(max) - i64::from(min) + 1;
        let offset = ((self.next_unit() * span as f64) as i64).min(span - 1);
        (i64::from(min) + offset) as i32
    }
}

/// Fast non-cryptographic generator backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SmallRandom(SmallRng);

impl SmallRandom {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self(SmallRng::from_os_rng())
    }

    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SmallRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
