use serde::{Deserialize, Serialize};

use super::{DEFAULT_COVERAGE, FIBONACCI_PROGRESSION, MAX_OUTCOME};
use crate::Error;

/// Staking sequence walked on losses and reset on wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct Progression(Vec<u64>);

impl Progression {
    pub fn new(stakes: Vec<u64>) -> Result<Self, Error> {
        if stakes.is_empty() {
            return Err(Error::EmptyProgression);
        }
        if let Some(position) = stakes.iter().position(|stake| *stake == 0) {
            return Err(Error::ZeroStake(position));
        }
        Ok(Self(stakes))
    }

    /// Stake for a progression index, clamped to the final stake.
    pub fn stake(&self, index: usize) -> u64 {
        self.0[index.min(self.0.len() - 1)]
    }

    pub fn stakes(&self) -> &[u64] {
        &self.0
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self(FIBONACCI_PROGRESSION.to_vec())
    }
}

impl TryFrom<Vec<u64>> for Progression {
    type Error = Error;

    fn try_from(stakes: Vec<u64>) -> Result<Self, Self::Error> {
        Progression::new(stakes)
    }
}

impl From<Progression> for Vec<u64> {
    fn from(progression: Progression) -> Self {
        progression.0
    }
}

/// Bankroll and progression position of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingState {
    /// Index into the progression for the next stake.
    pub step: usize,
    pub bankroll: i64,
    /// Bankroll after every bet, starting with the opening bank.
    pub bankroll_history: Vec<i64>,
    /// Stake of every bet.
    pub stake_history: Vec<u64>,
}

impl BettingState {
    pub fn new(starting_bank: u64) -> Self {
        let bankroll = signed(starting_bank);
        Self {
            step: 0,
            bankroll,
            bankroll_history: vec![bankroll],
            stake_history: Vec::new(),
        }
    }
}

/// Result of a single resolved bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub stake: u64,
    pub payout: u64,
    pub hit: bool,
    pub bankroll: i64,
}

impl Wager {
    /// Net change to the bankroll.
    pub fn net(&self) -> i64 {
        signed(self.payout).saturating_sub(signed(self.stake))
    }
}

/// Converts a chip amount to a signed bankroll delta, saturating at `i64::MAX`.
pub fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// How a spin is judged a hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitModel {
    /// A fresh random subset of `1..=36` is covered every spin.
    Random {
        #[serde(default = "default_coverage")]
        coverage: usize,
    },
    /// A fixed bet on the table.
    Table { bet: TableBet },
}

fn default_coverage() -> usize {
    DEFAULT_COVERAGE
}

impl Default for HitModel {
    fn default() -> Self {
        HitModel::Random {
            coverage: DEFAULT_COVERAGE,
        }
    }
}

impl HitModel {
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            HitModel::Random { coverage } => {
                if *coverage == 0 || *coverage > MAX_OUTCOME as usize {
                    return Err(Error::InvalidCoverage(*coverage));
                }
                Ok(())
            }
            HitModel::Table { bet } => bet.validate(),
        }
    }
}

/// Standard roulette table bets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableBet {
    /// Single number (0-36).
    Straight { number: u8 },
    Red,
    Black,
    Even,
    Odd,
    /// 1-18.
    Low,
    /// 19-36.
    High,
    /// 1-12, 13-24, 25-36 for index 0, 1, 2.
    Dozen { index: u8 },
    /// First, second, third column for index 0, 1, 2.
    Column { index: u8 },
}

impl TableBet {
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            TableBet::Straight { number } if number > MAX_OUTCOME => Err(Error::InvalidBet(
                format!("straight number {number} is not on the wheel"),
            )),
            TableBet::Dozen { index } | TableBet::Column { index } if index > 2 => Err(
                Error::InvalidBet(format!("dozen/column index {index} must be 0, 1 or 2")),
            ),
            _ => Ok(()),
        }
    }
}
