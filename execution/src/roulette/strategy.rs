//! Hit strategies deciding whether a spin wins the tracked bet.
//!
//! Two strategies are provided:
//! - [RandomCoverage]: a fresh random set of pockets is covered every spin
//! - [TableBet]: a fixed roulette bet judged by table rules

use kaprekar_types::{Error, HitModel, Outcome, TableBet};

use super::SpinRng;

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Decides whether the tracked bet won on a spin.
pub trait HitStrategy {
    fn is_hit(&mut self, outcome: Outcome, rng: &mut SpinRng) -> bool;
}

/// Covers `size` pockets from 1-36, sampled again on every spin.
///
/// Zero is never covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomCoverage {
    size: usize,
}

impl RandomCoverage {
    pub fn new(size: usize) -> Result<Self, Error> {
        HitModel::Random { coverage: size }.validate()?;
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl HitStrategy for RandomCoverage {
    fn is_hit(&mut self, outcome: Outcome, rng: &mut SpinRng) -> bool {
        rng.sample_coverage(self.size).contains(&outcome.get())
    }
}

/// Check if a number is red.
fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Check if a table bet wins for a given result.
pub fn bet_wins(bet: TableBet, result: u8) -> bool {
    // Zero loses all except straight bet on 0
    if result == 0 {
        return bet == TableBet::Straight { number: 0 };
    }

    match bet {
        TableBet::Straight { number } => number == result,
        TableBet::Red => is_red(result),
        TableBet::Black => !is_red(result),
        TableBet::Even => result % 2 == 0,
        TableBet::Odd => result % 2 == 1,
        TableBet::Low => (1..=18).contains(&result),
        TableBet::High => (19..=36).contains(&result),
        TableBet::Dozen { index } => (result - 1) / 12 == index,
        TableBet::Column { index } => (result - 1) % 3 == index,
    }
}

impl HitStrategy for TableBet {
    fn is_hit(&mut self, outcome: Outcome, _rng: &mut SpinRng) -> bool {
        bet_wins(*self, outcome.get())
    }
}

impl<H: HitStrategy + ?Sized> HitStrategy for Box<H> {
    fn is_hit(&mut self, outcome: Outcome, rng: &mut SpinRng) -> bool {
        (**self).is_hit(outcome, rng)
    }
}

/// Build the strategy described by a hit model.
pub fn from_model(model: &HitModel) -> Result<Box<dyn HitStrategy + Send + Sync>, Error> {
    model.validate()?;
    let strategy: Box<dyn HitStrategy + Send + Sync> = match model {
        HitModel::Random { coverage } => Box::new(RandomCoverage::new(*coverage)?),
        HitModel::Table { bet } => Box::new(*bet),
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(value: u8) -> Outcome {
        Outcome::new(value).unwrap()
    }

    #[test]
    fn test_is_red() {
        assert!(is_red(1));
        assert!(is_red(3));
        assert!(is_red(32));
        assert!(!is_red(2));
        assert!(!is_red(4));
        assert!(!is_red(0));
    }

    #[test]
    fn test_bet_wins_straight() {
        assert!(bet_wins(TableBet::Straight { number: 17 }, 17));
        assert!(!bet_wins(TableBet::Straight { number: 17 }, 18));
        assert!(bet_wins(TableBet::Straight { number: 0 }, 0));
        assert!(!bet_wins(TableBet::Straight { number: 1 }, 0)); // 0 loses non-zero straight
    }

    #[test]
    fn test_bet_wins_outside() {
        assert!(bet_wins(TableBet::Red, 3));
        assert!(!bet_wins(TableBet::Red, 2));
        assert!(bet_wins(TableBet::Black, 2));
        assert!(!bet_wins(TableBet::Black, 0)); // Zero loses

        assert!(bet_wins(TableBet::Even, 36));
        assert!(!bet_wins(TableBet::Even, 0));
        assert!(bet_wins(TableBet::Odd, 35));

        assert!(bet_wins(TableBet::Low, 18));
        assert!(!bet_wins(TableBet::Low, 19));
        assert!(bet_wins(TableBet::High, 19));
        assert!(!bet_wins(TableBet::High, 0));
    }

    #[test]
    fn test_bet_wins_dozen_column() {
        assert!(bet_wins(TableBet::Dozen { index: 0 }, 12));
        assert!(bet_wins(TableBet::Dozen { index: 1 }, 13));
        assert!(bet_wins(TableBet::Dozen { index: 2 }, 36));
        assert!(!bet_wins(TableBet::Dozen { index: 1 }, 25));

        assert!(bet_wins(TableBet::Column { index: 0 }, 34));
        assert!(bet_wins(TableBet::Column { index: 1 }, 35));
        assert!(bet_wins(TableBet::Column { index: 2 }, 36));
        assert!(!bet_wins(TableBet::Column { index: 2 }, 1));
    }

    #[test]
    fn test_random_coverage_never_hits_zero() {
        let mut rng = SpinRng::new(11);
        let mut strategy = RandomCoverage::new(36).unwrap();
        assert!(!strategy.is_hit(Outcome::ZERO, &mut rng));
        // Full coverage hits everything else
        for value in 1..=36 {
            assert!(strategy.is_hit(outcome(value), &mut rng));
        }
    }

    #[test]
    fn test_random_coverage_rate() {
        let mut rng = SpinRng::new(12);
        let mut strategy = RandomCoverage::new(12).unwrap();
        let hits = (0..9_000)
            .filter(|_| strategy.is_hit(outcome(17), &mut rng))
            .count();
        // Expected 3000 (12/36)
        assert!((2_700..3_300).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn test_random_coverage_validation() {
        assert_eq!(RandomCoverage::new(0), Err(Error::InvalidCoverage(0)));
        assert_eq!(RandomCoverage::new(37), Err(Error::InvalidCoverage(37)));
        assert_eq!(RandomCoverage::new(12).unwrap().size(), 12);
    }

    #[test]
    fn test_from_model() {
        let mut rng = SpinRng::new(13);
        let mut strategy = from_model(&HitModel::Table {
            bet: TableBet::Red,
        })
        .unwrap();
        assert!(strategy.is_hit(outcome(1), &mut rng));
        assert!(!strategy.is_hit(outcome(2), &mut rng));

        assert!(from_model(&HitModel::Table {
            bet: TableBet::Dozen { index: 5 },
        })
        .is_err());
        assert!(from_model(&HitModel::default()).is_ok());
    }
}
