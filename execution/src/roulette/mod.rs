//! Spin pipeline components.
//!
//! This module contains the pieces run on every spin:
//! - Group classification
//! - Digit building and mirroring
//! - Kaprekar's routine
//! - Hit strategies
//! - The Fibonacci betting tracker

pub mod betting;
pub mod classify;
pub mod digits;
pub mod kaprekar;
pub mod strategy;

use kaprekar_types::{Outcome, MAX_OUTCOME};
use rand::{seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seedable random number generator shared by the spin pipeline.
///
/// The same seed always replays the same outcomes, padding digits and
/// coverage draws.
#[derive(Clone, Debug)]
pub struct SpinRng {
    inner: ChaCha20Rng,
}

impl SpinRng {
    /// Create a new RNG from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Create a new RNG seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Spin roulette wheel (0-36).
    pub fn spin_roulette(&mut self) -> Outcome {
        let value = self.inner.gen_range(0..=MAX_OUTCOME);
        // gen_range stays inside 0..=36
        Outcome::new(value).unwrap_or(Outcome::ZERO)
    }

    /// Get a random padding digit (1-9).
    pub fn next_digit(&mut self) -> u8 {
        self.next_bounded(9) + 1
    }

    /// Sample `size` distinct pockets from 1-36.
    pub fn sample_coverage(&mut self, size: usize) -> Vec<u8> {
        let size = size.min(MAX_OUTCOME as usize);
        index::sample(&mut self.inner, MAX_OUTCOME as usize, size)
            .into_iter()
            .map(|i| i as u8 + 1)
            .collect()
    }
}
