//! Kaprekar's routine on 4-digit numbers.

use kaprekar_types::{
    Error, Step, Trace, DIGIT_COUNT, KAPREKAR_CONSTANT, MAX_KAPREKAR_ITERATIONS, MAX_SEED,
};

/// Split a number into its four zero-padded digits.
fn split(value: u16) -> [u8; DIGIT_COUNT] {
    [
        (value / 1000 % 10) as u8,
        (value / 100 % 10) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}

fn join(digits: &[u8; DIGIT_COUNT]) -> u16 {
    digits.iter().fold(0u16, |acc, digit| acc * 10 + *digit as u16)
}

/// Run a single iteration from `current`.
pub fn step(current: u16) -> Step {
    let mut digits = split(current);
    digits.sort_unstable();
    let ascending = join(&digits);
    digits.reverse();
    let descending = join(&digits);
    Step {
        current,
        descending,
        ascending,
        difference: descending - ascending,
    }
}

/// Iterate from `seed` until 6174 or the iteration cap.
///
/// Never fails: a seed that does not converge yields a trace with
/// `converged == false` and the steps taken before the cap.
pub fn trace(seed: u16) -> Trace {
    let mut steps = Vec::new();
    let mut current = seed;
    while current != KAPREKAR_CONSTANT {
        if steps.len() == MAX_KAPREKAR_ITERATIONS {
            return Trace {
                seed,
                steps,
                converged: false,
            };
        }
        let next = step(current);
        current = next.difference;
        steps.push(next);
    }
    Trace {
        seed,
        steps,
        converged: true,
    }
}

/// Compute the trace from `seed` to 6174.
///
/// Seeds above 9999 are rejected. Repdigits (1111, 2222, ...) collapse to
/// zero and fail with [Error::NonConvergence].
pub fn transform(seed: u32) -> Result<Trace, Error> {
    if seed > MAX_SEED as u32 {
        return Err(Error::InvalidSeed(seed));
    }
    let trace = trace(seed as u16);
    if !trace.converged {
        return Err(Error::NonConvergence {
            seed: trace.seed,
            iterations: trace.steps.len(),
        });
    }
    Ok(trace)
}
