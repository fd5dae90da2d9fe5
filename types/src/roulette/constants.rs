/// Highest pocket on a single-zero wheel.
pub const MAX_OUTCOME: u8 = 36;

/// Number of pockets on a single-zero wheel.
pub const WHEEL_SIZE: usize = MAX_OUTCOME as usize + 1;

/// Number of digits fed into the Kaprekar routine.
pub const DIGIT_COUNT: usize = 4;

/// Largest seed the Kaprekar routine accepts.
pub const MAX_SEED: u16 = 9_999;

/// Kaprekar's constant for 4-digit numbers.
pub const KAPREKAR_CONSTANT: u16 = 6_174;

/// Iteration cap for the Kaprekar routine.
/// Every 4-digit number that is not a repdigit reaches 6174 in at most 7 steps.
pub const MAX_KAPREKAR_ITERATIONS: usize = 8;

/// Smallest allowed spin window.
pub const MIN_SPIN_WINDOW: usize = 1;

/// Largest allowed spin window.
pub const MAX_SPIN_WINDOW: usize = 4;

/// Spin window used when none is configured.
pub const DEFAULT_SPIN_WINDOW: usize = 1;

/// Starting bankroll used when none is configured.
pub const DEFAULT_STARTING_BANK: u64 = 500;

/// Smallest allowed starting bankroll.
pub const MIN_STARTING_BANK: u64 = 100;

/// Default Fibonacci staking progression.
pub const FIBONACCI_PROGRESSION: [u64; 9] = [1, 1, 2, 3, 5, 8, 13, 21, 34];

/// Numbers covered by the random-coverage hit simulation.
pub const DEFAULT_COVERAGE: usize = 12;

/// Log entries exposed for display.
pub const RECENT_LOG_ENTRIES: usize = 5;

/// Spins required before group frequencies are reported.
pub const FREQUENCY_THRESHOLD: usize = 36;
