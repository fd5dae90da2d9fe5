use thiserror::Error;

/// Errors raised by the tracker core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("outcome {0} is not on the wheel (expected 0-36)")]
    InvalidOutcome(u32),
    #[error("seed {0} is not a 4-digit number (expected 0-9999)")]
    InvalidSeed(u32),
    #[error("spin window {0} is out of range (expected 1-4)")]
    InvalidWindow(usize),
    #[error("starting bank {got} is below the minimum of {min}")]
    InvalidStartingBank { got: u64, min: u64 },
    #[error("progression must contain at least one stake")]
    EmptyProgression,
    #[error("progression stake at position {0} is zero")]
    ZeroStake(usize),
    #[error("coverage {0} is out of range (expected 1-36)")]
    InvalidCoverage(usize),
    #[error("invalid table bet: {0}")]
    InvalidBet(String),
    #[error("seed {seed:04} did not reach 6174 within {iterations} iterations")]
    NonConvergence { seed: u16, iterations: usize },
}
