//! Injectable random sources.
//!
//! Every randomized branch in the simulation (mutation rolls, weather, market
//! drift, daily events, pest sampling) draws from a [`RandomSource`] passed in
//! by the caller. Production code uses [`SeededRandom`]; tests use
//! [`ScriptedRandom`] to force specific outcomes.

use std::collections::VecDeque;
use std::fmt::Debug;

/// A source of uniform random numbers.
///
/// Implementors only provide [`next_f64`](Self::next_f64); every other draw is
/// derived from it so a scripted source controls all outcomes.
pub trait RandomSource: Send + Debug {
    /// Returns a uniform value in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Returns a uniform value in `[min, max)`.
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Returns an index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Picks `count` distinct indices from `0..len` (partial Fisher-Yates).
    ///
    /// Returns fewer than `count` indices only when `len < count`.
    fn sample_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        for i in 0..take {
            let j = i + self.next_index(len - i);
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }
}

/// Seedable random source backed by `fastrand`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: fastrand::Rng,
}

impl SeededRandom {
    /// Create a source with a fixed seed (reproducible).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Create a source seeded from process entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// Random source that replays a fixed script of values.
///
/// Queued values are returned in order; once exhausted every draw returns the
/// fallback. Values are clamped into `[0.0, 1.0)`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    queue: VecDeque<f64>,
    fallback: f64,
}

/// Largest value strictly below 1.0 that scripted draws are clamped to.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON;

impl ScriptedRandom {
    /// Create a source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new(), value)
    }

    /// Create a source that returns `values` in order, then `fallback`.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            queue: values.into_iter().collect(),
            fallback: fallback.clamp(0.0, BELOW_ONE),
        }
    }

    /// Source that never triggers any probability roll.
    #[must_use]
    pub fn never() -> Self {
        Self::constant(BELOW_ONE)
    }

    /// Source that triggers every probability roll.
    #[must_use]
    pub fn always() -> Self {
        Self::constant(0.0)
    }

    /// Append more values to the script.
    pub fn push(&mut self, value: f64) {
        self.queue.push_back(value);
    }

    /// Number of scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.queue
            .pop_front()
            .map_or(self.fallback, |v| v.clamp(0.0, BELOW_ONE))
    }
}
