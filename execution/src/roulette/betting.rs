//! Fibonacci betting tracker.

use kaprekar_types::{signed, BettingState, Progression, Wager};

/// Resolve one bet and move along the progression.
///
/// The stake clamps to the final progression value once the index runs past
/// it. A hit pays twice the stake and resets the index; a miss advances it.
pub fn advance(progression: &Progression, state: &mut BettingState, hit: bool) -> Wager {
    let stake = progression.stake(state.step);
    let payout = if hit { stake.saturating_mul(2) } else { 0 };

    state.bankroll = state
        .bankroll
        .saturating_add(signed(payout))
        .saturating_sub(signed(stake));
    state.bankroll_history.push(state.bankroll);
    state.stake_history.push(stake);
    state.step = if hit { 0 } else { state.step.saturating_add(1) };

    Wager {
        stake,
        payout,
        hit,
        bankroll: state.bankroll,
    }
}
