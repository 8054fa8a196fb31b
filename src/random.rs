//! Injectable uniform randomness.
//!
//! Every random draw in the crate goes through [`Sampler`], so tests can swap
//! the production generator for a fixed sequence and assert exact
//! particle layouts.

#[cfg(test)]
#[path = "random_test.rs"]
mod random_test;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::Range;

/// A source of uniform random numbers.
pub trait Sampler {
    /// A uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// A uniform value in `[min, max)` (or exactly `min` when the bounds match).
    fn between(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }

    fn in_range(&mut self, range: Range) -> f64 {
        self.between(range.min, range.max)
    }

    /// A fair coin flip.
    fn coin(&mut self) -> bool {
        self.unit() < 0.5
    }

    /// A uniform index into a collection of `len` items. `len` must be non-zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Production sampler backed by a small, fast, seedable PRNG.
pub struct RngSampler(SmallRng);

impl RngSampler {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Sampler for RngSampler {
    fn unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Deterministic sampler that cycles through a fixed list of unit values.
///
/// Values are clamped into `[0, 1)`; an empty list always yields `0.0`.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct Sequence {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl Sequence {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let values = values.into_iter().map(|v| v.clamp(0.0, 1.0 - f64::EPSILON)).collect();
        Self { values, cursor: 0 }
    }

    /// A sampler that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl Sampler for Sequence {
    fn unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
