use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MAX_OUTCOME, WHEEL_SIZE};
use crate::Error;

/// A single wheel result in `0..=36`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Outcome(u8);

impl Outcome {
    /// The green pocket.
    pub const ZERO: Outcome = Outcome(0);

    pub fn new(value: u8) -> Result<Self, Error> {
        if value > MAX_OUTCOME {
            return Err(Error::InvalidOutcome(value as u32));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sector group of this outcome.
    pub fn group(self) -> Group {
        GROUP_BY_OUTCOME[self.0 as usize]
    }
}

impl TryFrom<u8> for Outcome {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Outcome::new(value)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wheel sector groups. `A`..`I` hold four neighbouring pockets each, `Z` holds zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    Z,
}

impl Group {
    pub const ALL: [Group; 10] = [
        Group::A,
        Group::B,
        Group::C,
        Group::D,
        Group::E,
        Group::F,
        Group::G,
        Group::H,
        Group::I,
        Group::Z,
    ];

    /// Digit contributed by this group (A=1 .. I=9). `Z` contributes nothing.
    pub fn rank(self) -> Option<u8> {
        match self {
            Group::Z => None,
            other => Some(other as u8 + 1),
        }
    }

    pub fn label(self) -> char {
        match self {
            Group::A => 'A',
            Group::B => 'B',
            Group::C => 'C',
            Group::D => 'D',
            Group::E => 'E',
            Group::F => 'F',
            Group::G => 'G',
            Group::H => 'H',
            Group::I => 'I',
            Group::Z => 'Z',
        }
    }

    /// Pockets belonging to this group, in wheel order.
    pub fn members(self) -> &'static [u8] {
        SECTORS[self as usize].1
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fixed sector layout, one entry per group in label order.
pub const SECTORS: [(Group, &[u8]); 10] = [
    (Group::A, &[32, 15, 19, 4]),
    (Group::B, &[21, 2, 25, 17]),
    (Group::C, &[34, 6, 27, 13]),
    (Group::D, &[36, 11, 30, 8]),
    (Group::E, &[23, 10, 5, 24]),
    (Group::F, &[16, 33, 1, 20]),
    (Group::G, &[14, 31, 9, 22]),
    (Group::H, &[18, 29, 7, 28]),
    (Group::I, &[12, 35, 3, 26]),
    (Group::Z, &[0]),
];

/// Group of every pocket, indexed by outcome. Must agree with [SECTORS].
const GROUP_BY_OUTCOME: [Group; WHEEL_SIZE] = [
    Group::Z, // 0
    Group::F, // 1
    Group::B, // 2
    Group::I, // 3
    Group::A, // 4
    Group::E, // 5
    Group::C, // 6
    Group::H, // 7
    Group::D, // 8
    Group::G, // 9
    Group::E, // 10
    Group::D, // 11
    Group::I, // 12
    Group::C, // 13
    Group::G, // 14
    Group::A, // 15
    Group::F, // 16
    Group::B, // 17
    Group::H, // 18
    Group::A, // 19
    Group::F, // 20
    Group::B, // 21
    Group::G, // 22
    Group::E, // 23
    Group::E, // 24
    Group::B, // 25
    Group::I, // 26
    Group::C, // 27
    Group::H, // 28
    Group::H, // 29
    Group::D, // 30
    Group::G, // 31
    Group::A, // 32
    Group::F, // 33
    Group::C, // 34
    Group::I, // 35
    Group::D, // 36
];
