//! Injectable randomness.
//!
//! Every simulated outcome (biometric pass/fail, reward amount, confetti)
//! draws from a [`RandomSource`]. Production uses [`RngSource`] over the
//! `rand` crate; tests use [`ScriptedRandom`] to force exact outcomes.

use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

/// Adapter from any [`rand::Rng`] to [`RandomSource`].
pub struct RngSource<R>(R);

impl RngSource<ThreadRng> {
    /// OS-seeded thread-local generator.
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Deterministic generator, same seed gives the same session.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of samples.
///
/// Once the script runs out the last value repeats; an empty script yields
/// `0.5` forever. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    last: Option<f64>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: None,
        }
    }

    /// Append more samples to the end of the script.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }

    /// Samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let v = match self.values.pop_front() {
            Some(v) => {
                self.last = Some(v);
                v
            }
            None => self.last.unwrap_or(0.5),
        };
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
