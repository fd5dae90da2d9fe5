use serde::{Deserialize, Serialize};

use super::{
    BettingState, Digits, Group, Outcome, Progression, Step, Wager, DEFAULT_SPIN_WINDOW,
    DEFAULT_STARTING_BANK, MAX_SPIN_WINDOW, MIN_SPIN_WINDOW, MIN_STARTING_BANK,
};
use crate::Error;

/// Validated settings for a session.
///
/// Fields are only reachable through [SessionConfig::new] and the setters, so
/// a config always holds an in-range window and bank (deserialization
/// included).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig", into = "RawSessionConfig")]
pub struct SessionConfig {
    spin_window: usize,
    starting_bank: u64,
    progression: Progression,
}

impl SessionConfig {
    pub fn new(
        spin_window: usize,
        starting_bank: u64,
        progression: Progression,
    ) -> Result<Self, Error> {
        validate_window(spin_window)?;
        if starting_bank < MIN_STARTING_BANK {
            return Err(Error::InvalidStartingBank {
                got: starting_bank,
                min: MIN_STARTING_BANK,
            });
        }
        Ok(Self {
            spin_window,
            starting_bank,
            progression,
        })
    }

    pub fn spin_window(&self) -> usize {
        self.spin_window
    }

    pub fn starting_bank(&self) -> u64 {
        self.starting_bank
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn set_spin_window(&mut self, spin_window: usize) -> Result<(), Error> {
        validate_window(spin_window)?;
        self.spin_window = spin_window;
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            spin_window: DEFAULT_SPIN_WINDOW,
            starting_bank: DEFAULT_STARTING_BANK,
            progression: Progression::default(),
        }
    }
}

/// Wire form of [SessionConfig], checked on the way in.
#[derive(Serialize, Deserialize)]
struct RawSessionConfig {
    spin_window: usize,
    starting_bank: u64,
    progression: Progression,
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = Error;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        SessionConfig::new(raw.spin_window, raw.starting_bank, raw.progression)
    }
}

impl From<SessionConfig> for RawSessionConfig {
    fn from(config: SessionConfig) -> Self {
        Self {
            spin_window: config.spin_window,
            starting_bank: config.starting_bank,
            progression: config.progression,
        }
    }
}

/// Checks that a spin window is within `1..=4`.
pub fn validate_window(spin_window: usize) -> Result<(), Error> {
    if !(MIN_SPIN_WINDOW..=MAX_SPIN_WINDOW).contains(&spin_window) {
        return Err(Error::InvalidWindow(spin_window));
    }
    Ok(())
}

/// A recorded outcome with its sector group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub outcome: Outcome,
    pub group: Group,
}

impl From<Outcome> for SpinRecord {
    fn from(outcome: Outcome) -> Self {
        Self {
            outcome,
            group: outcome.group(),
        }
    }
}

/// Kaprekar log entry produced by a betting spin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub seed: u16,
    pub digits: Digits,
    /// Whether the window contained zero and the digits were reversed.
    pub mirrored: bool,
    /// Zero outcomes skipped while building the digits.
    pub zero_hits: usize,
    pub steps: Vec<Step>,
    pub converged: bool,
}

/// Everything that happened during one spin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinReport {
    /// Position of the spin in the history, starting at 1.
    pub index: usize,
    pub outcome: Outcome,
    pub group: Group,
    /// Present once the history covers the spin window.
    pub entry: Option<LogEntry>,
    pub wager: Option<Wager>,
}

/// Number of spins landing in a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub group: Group,
    pub count: usize,
}

/// Display-facing snapshot of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub config: SessionConfig,
    pub history: Vec<SpinRecord>,
    pub recent_log: Vec<LogEntry>,
    pub betting: BettingState,
    /// Present once enough spins have been recorded.
    pub frequencies: Option<Vec<GroupCount>>,
}
