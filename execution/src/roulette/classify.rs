//! Sector group classification.

use kaprekar_types::{Group, GroupCount, Outcome, SECTORS};

/// Group whose sector contains `value`, or `None` when it is not on the wheel.
pub fn classify(value: u8) -> Option<Group> {
    SECTORS
        .iter()
        .find(|(_, members)| members.contains(&value))
        .map(|(group, _)| *group)
}

/// Count spins per group, most frequent first.
///
/// Groups with equal counts keep label order. Groups never hit are omitted.
pub fn frequencies(outcomes: &[Outcome]) -> Vec<GroupCount> {
    let mut counts = [0usize; Group::ALL.len()];
    for outcome in outcomes {
        counts[outcome.group() as usize] += 1;
    }

    let mut frequencies: Vec<GroupCount> = Group::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(group, count)| GroupCount {
            group: *group,
            count,
        })
        .collect();
    // Stable, so ties stay in label order
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}
