use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DIGIT_COUNT, KAPREKAR_CONSTANT};

/// Four digits in `1..=9` built from recent spins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digits(pub [u8; DIGIT_COUNT]);

impl Digits {
    /// Concatenated value of the digits (`[3, 5, 2, 4]` is `3524`).
    pub fn value(&self) -> u16 {
        self.0
            .iter()
            .fold(0u16, |acc, digit| acc * 10 + *digit as u16)
    }

    /// Digits in reverse order.
    pub fn mirrored(&self) -> Self {
        let mut digits = self.0;
        digits.reverse();
        Self(digits)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// One iteration of Kaprekar's routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub current: u16,
    pub descending: u16,
    pub ascending: u16,
    pub difference: u16,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04} - {:04} = {:04}",
            self.descending, self.ascending, self.difference
        )
    }
}

/// Steps taken from a seed towards 6174.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub seed: u16,
    pub steps: Vec<Step>,
    pub converged: bool,
}

impl Trace {
    /// Last value reached, or the seed itself if no step was taken.
    pub fn last(&self) -> u16 {
        self.steps.last().map_or(self.seed, |step| step.difference)
    }

    pub fn reached_constant(&self) -> bool {
        self.last() == KAPREKAR_CONSTANT
    }
}
