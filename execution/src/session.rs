use kaprekar_types::{
    BettingState, Error, GroupCount, LogEntry, Outcome, SessionConfig,
    SessionView, SpinRecord, SpinReport, FREQUENCY_THRESHOLD, RECENT_LOG_ENTRIES,
};
use tracing::{debug, info, warn};

use crate::roulette::{
    betting::advance,
    classify::frequencies,
    digits::{build, mirror, needs_mirror},
    kaprekar::trace,
    strategy::HitStrategy,
    SpinRng,
};

/// Mutable state of one tracking session.
///
/// Holds the spin history, the Kaprekar log and the betting state. Every
/// spin goes through [Session::spin] or [Session::record].
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    spins: Vec<Outcome>,
    log: Vec<LogEntry>,
    betting: BettingState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let betting = BettingState::new(config.starting_bank());
        Self {
            config,
            spins: Vec::new(),
            log: Vec::new(),
            betting,
        }
    }

    /// Clear all history and return to the opening bank.
    pub fn reset(&mut self) {
        info!(starting_bank = self.config.starting_bank(), "session reset");
        self.spins.clear();
        self.log.clear();
        self.betting = BettingState::new(self.config.starting_bank());
    }

    /// Replace the configuration and reset.
    pub fn reset_with(&mut self, config: SessionConfig) {
        self.config = config;
        self.reset();
    }

    /// Change how many recent spins seed the digits. History is kept.
    pub fn set_spin_window(&mut self, spin_window: usize) -> Result<(), Error> {
        self.config.set_spin_window(spin_window)
    }

    /// Spin the wheel and run the pipeline on the result.
    pub fn spin<H: HitStrategy + ?Sized>(
        &mut self,
        rng: &mut SpinRng,
        strategy: &mut H,
    ) -> SpinReport {
        let outcome = rng.spin_roulette();
        self.record(outcome, rng, strategy)
    }

    /// Run the pipeline on a known outcome.
    pub fn record<H: HitStrategy + ?Sized>(
        &mut self,
        outcome: Outcome,
        rng: &mut SpinRng,
        strategy: &mut H,
    ) -> SpinReport {
        self.spins.push(outcome);
        let index = self.spins.len();
        let group = outcome.group();
        debug!(index, outcome = outcome.get(), %group, "spin recorded");

        let window = self.config.spin_window();
        if self.spins.len() < window {
            return SpinReport {
                index,
                outcome,
                group,
                entry: None,
                wager: None,
            };
        }

        let recent = &self.spins[self.spins.len() - window..];
        let built = build(recent, rng);
        let mirrored = needs_mirror(recent);
        let digits = if mirrored {
            mirror(built.digits)
        } else {
            built.digits
        };
        let seed = digits.value();
        let trace = trace(seed);
        if !trace.converged {
            warn!(seed, "seed did not reach 6174");
        }
        let entry = LogEntry {
            seed,
            digits,
            mirrored,
            zero_hits: built.zero_hits,
            steps: trace.steps,
            converged: trace.converged,
        };
        self.log.push(entry.clone());

        let hit = strategy.is_hit(outcome, rng);
        let wager = advance(self.config.progression(), &mut self.betting, hit);
        debug!(
            seed,
            stake = wager.stake,
            hit,
            bankroll = wager.bankroll,
            "bet resolved"
        );

        SpinReport {
            index,
            outcome,
            group,
            entry: Some(entry),
            wager: Some(wager),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn spins(&self) -> &[Outcome] {
        &self.spins
    }

    /// Outcomes paired with their groups, oldest first.
    pub fn history(&self) -> Vec<SpinRecord> {
        self.spins.iter().copied().map(SpinRecord::from).collect()
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// The latest log entries, oldest first.
    pub fn recent_log(&self) -> &[LogEntry] {
        let start = self.log.len().saturating_sub(RECENT_LOG_ENTRIES);
        &self.log[start..]
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    /// Group counts, most frequent first, once enough spins are recorded.
    pub fn group_frequencies(&self) -> Option<Vec<GroupCount>> {
        if self.spins.len() < FREQUENCY_THRESHOLD {
            return None;
        }
        Some(frequencies(&self.spins))
    }

    /// Snapshot for display.
    pub fn view(&self) -> SessionView {
        SessionView {
            config: self.config.clone(),
            history: self.history(),
            recent_log: self.recent_log().to_vec(),
            betting: self.betting.clone(),
            frequencies: self.group_frequencies(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaprekar_types::{Digits, Group, Progression};

    /// Strategy with a fixed answer.
    struct Always(bool);

    impl HitStrategy for Always {
        fn is_hit(&mut self, _outcome: Outcome, _rng: &mut SpinRng) -> bool {
            self.0
        }
    }

    fn outcome(value: u8) -> Outcome {
        Outcome::new(value).unwrap()
    }

    fn config(window: usize) -> SessionConfig {
        SessionConfig::new(window, 500, Progression::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert!(session.spins().is_empty());
        assert!(session.log().is_empty());
        assert_eq!(session.betting().bankroll, 500);
        assert_eq!(session.betting().bankroll_history, vec![500]);
        assert!(session.group_frequencies().is_none());
    }

    #[test]
    fn test_no_bet_until_window_filled() {
        let mut session = Session::new(config(3));
        let mut rng = SpinRng::new(1);

        let report = session.record(outcome(32), &mut rng, &mut Always(false));
        assert_eq!(report.index, 1);
        assert!(report.entry.is_none());
        assert!(report.wager.is_none());

        let report = session.record(outcome(21), &mut rng, &mut Always(false));
        assert!(report.entry.is_none());

        let report = session.record(outcome(34), &mut rng, &mut Always(false));
        let entry = report.entry.expect("window is full");
        // A, B, C and one padded digit
        assert_eq!(&entry.digits.as_slice()[..3], &[1, 2, 3]);
        assert!(!entry.mirrored);
        assert!(report.wager.is_some());
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.betting().stake_history, vec![1]);
    }

    #[test]
    fn test_zero_in_window_mirrors() {
        let mut session = Session::new(config(4));
        let mut rng = SpinRng::new(2);
        for value in [36, 12, 0] {
            session.record(outcome(value), &mut rng, &mut Always(false));
        }
        let report = session.record(outcome(8), &mut rng, &mut Always(false));
        let entry = report.entry.unwrap();
        assert!(entry.mirrored);
        assert_eq!(entry.zero_hits, 1);
        // D, I, D plus padding, reversed
        let digits = entry.digits.as_slice();
        assert_eq!(&digits[1..], &[4, 9, 4]);
        assert_eq!(entry.seed, entry.digits.value());
    }

    #[test]
    fn test_digits_follow_most_recent_spins() {
        let mut session = Session::new(config(2));
        let mut rng = SpinRng::new(10);
        // A, B, C: the second bet uses B and C only
        session.record(outcome(32), &mut rng, &mut Always(false));
        let first = session.record(outcome(21), &mut rng, &mut Always(false));
        assert_eq!(&first.entry.unwrap().digits.as_slice()[..2], &[1, 2]);

        let report = session.record(outcome(34), &mut rng, &mut Always(false));
        let entry = report.entry.unwrap();
        assert_eq!(&entry.digits.as_slice()[..2], &[2, 3]);
        assert!(!entry.mirrored);

        let report = session.record(outcome(26), &mut rng, &mut Always(false));
        assert_eq!(&report.entry.unwrap().digits.as_slice()[..2], &[3, 9]);
    }

    #[test]
    fn test_zero_outside_window_does_not_mirror() {
        let mut session = Session::new(config(2));
        let mut rng = SpinRng::new(11);
        session.record(outcome(0), &mut rng, &mut Always(false));
        let report = session.record(outcome(32), &mut rng, &mut Always(false));
        assert!(report.entry.unwrap().mirrored);

        // The zero has slid out of the window
        session.record(outcome(21), &mut rng, &mut Always(false));
        let report = session.record(outcome(34), &mut rng, &mut Always(false));
        let entry = report.entry.unwrap();
        assert!(!entry.mirrored);
        assert_eq!(entry.zero_hits, 0);
        assert_eq!(&entry.digits.as_slice()[..2], &[2, 3]);
    }

    #[test]
    fn test_window_of_one_is_seeded_from_last_spin() {
        let mut session = Session::new(config(1));
        let mut rng = SpinRng::new(3);
        let report = session.record(outcome(26), &mut rng, &mut Always(true));
        let entry = report.entry.unwrap();
        assert_eq!(entry.digits.as_slice()[0], 9);
        assert_eq!(report.group, Group::I);
    }

    #[test]
    fn test_repdigit_seed_is_logged() {
        // Four spins in group A give 1111
        let mut session = Session::new(config(4));
        let mut rng = SpinRng::new(4);
        let mut last = None;
        for value in [32, 15, 19, 4] {
            last = Some(session.record(outcome(value), &mut rng, &mut Always(false)));
        }
        let report = last.unwrap();
        let entry = report.entry.unwrap();
        assert_eq!(entry.digits, Digits([1, 1, 1, 1]));
        assert_eq!(entry.seed, 1111);
        assert!(!entry.converged);
        // Bet still resolves
        assert!(report.wager.is_some());
    }

    #[test]
    fn test_bankroll_matches_wagers() {
        let mut session = Session::new(config(2));
        let mut rng = SpinRng::new(5);
        let mut strategy = crate::roulette::strategy::RandomCoverage::new(12).unwrap();
        let mut net: i64 = 0;
        for _ in 0..300 {
            if let Some(wager) = session.spin(&mut rng, &mut strategy).wager {
                net += wager.net();
            }
        }
        assert_eq!(session.betting().bankroll, 500 + net);
        assert_eq!(session.log().len(), 299);
        assert_eq!(session.betting().stake_history.len(), 299);
    }

    #[test]
    fn test_recent_log_keeps_last_five() {
        let mut session = Session::default();
        let mut rng = SpinRng::new(6);
        for _ in 0..8 {
            session.spin(&mut rng, &mut Always(false));
        }
        let recent = session.recent_log();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent, &session.log()[3..]);
    }

    #[test]
    fn test_frequencies_after_threshold() {
        let mut session = Session::default();
        let mut rng = SpinRng::new(7);
        for _ in 0..35 {
            session.spin(&mut rng, &mut Always(false));
        }
        assert!(session.group_frequencies().is_none());

        session.spin(&mut rng, &mut Always(false));
        let counts = session.group_frequencies().unwrap();
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 36);
        assert!(counts.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_reset() {
        let mut session = Session::default();
        let mut rng = SpinRng::new(8);
        for _ in 0..10 {
            session.spin(&mut rng, &mut Always(false));
        }
        session.reset();
        assert!(session.spins().is_empty());
        assert!(session.log().is_empty());
        assert_eq!(*session.betting(), BettingState::new(500));

        session.reset_with(SessionConfig::new(2, 1_000, Progression::default()).unwrap());
        assert_eq!(session.betting().bankroll, 1_000);
        assert_eq!(session.config().spin_window(), 2);
    }

    #[test]
    fn test_set_spin_window() {
        let mut session = Session::default();
        assert_eq!(session.set_spin_window(0), Err(Error::InvalidWindow(0)));
        assert_eq!(session.set_spin_window(5), Err(Error::InvalidWindow(5)));
        session.set_spin_window(4).unwrap();
        assert_eq!(session.config().spin_window(), 4);
    }

    #[test]
    fn test_same_seed_same_session() {
        let play = |seed| {
            let mut session = Session::new(config(3));
            let mut rng = SpinRng::new(seed);
            let mut strategy = crate::roulette::strategy::RandomCoverage::new(12).unwrap();
            for _ in 0..50 {
                session.spin(&mut rng, &mut strategy);
            }
            session.view()
        };
        assert_eq!(play(99), play(99));
    }
}
