//! Digit building from recent spins.

use kaprekar_types::{Digits, Outcome, DIGIT_COUNT};
use tracing::warn;

use super::SpinRng;

/// Digits built from a spin window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitBuild {
    pub digits: Digits,
    /// Zero outcomes that were skipped.
    pub zero_hits: usize,
}

/// Build four digits from a window of outcomes.
///
/// Each non-zero outcome contributes its group rank. Zero outcomes trigger
/// mirror mode and contribute nothing. Missing digits are padded with random
/// values in 1-9 and any excess is truncated.
pub fn build(window: &[Outcome], rng: &mut SpinRng) -> DigitBuild {
    let mut ranks = Vec::with_capacity(DIGIT_COUNT);
    let mut zero_hits = 0;
    for outcome in window {
        match outcome.group().rank() {
            Some(rank) => ranks.push(rank),
            None => {
                warn!(outcome = outcome.get(), "mirror mode triggered");
                zero_hits += 1;
            }
        }
    }
    while ranks.len() < DIGIT_COUNT {
        ranks.push(rng.next_digit());
    }

    let mut digits = [0u8; DIGIT_COUNT];
    digits.copy_from_slice(&ranks[..DIGIT_COUNT]);
    DigitBuild {
        digits: Digits(digits),
        zero_hits,
    }
}

/// Reverse the digit order.
pub fn mirror(digits: Digits) -> Digits {
    digits.mirrored()
}

/// Whether the window calls for a mirrored seed.
pub fn needs_mirror(window: &[Outcome]) -> bool {
    window.iter().any(|outcome| outcome.is_zero())
}
