//! How often the opponent range folds to a bet.

use rand::Rng;

use super::estimator::Estimator;
use super::fold_model::FoldModel;
use crate::cards::card::{Board, HoleCards};
use crate::range::WeightedRange;

/// Monte Carlo fold-frequency estimator.
///
/// Each trial draws an opponent combo consistent with the hero hand and the
/// board and scores 1 if the [`FoldModel`] folds it to `bet_size`.
#[derive(Debug, Clone)]
pub struct FoldProbabilityEstimator<'a> {
    hero: HoleCards,
    board: &'a Board,
    range: &'a WeightedRange,
    bet_size: f64,
    pot: f64,
    all_in_bet: Option<f64>,
    model: FoldModel,
}

impl<'a> FoldProbabilityEstimator<'a> {
    /// Create an estimator for a bet of `bet_size` into `pot`.
    pub fn new(
        hero: HoleCards,
        board: &'a Board,
        range: &'a WeightedRange,
        bet_size: f64,
        pot: f64,
    ) -> Self {
        Self {
            hero,
            board,
            range,
            bet_size,
            pot,
            all_in_bet: None,
            model: FoldModel::new(),
        }
    }

    /// Mark the bet as the all-in option. Passed through to the fold model.
    pub fn with_all_in_bet(mut self, amount: f64) -> Self {
        self.all_in_bet = Some(amount);
        self
    }

    /// Bet size being tested.
    pub fn bet_size(&self) -> f64 {
        self.bet_size
    }
}

impl Estimator for FoldProbabilityEstimator<'_> {
    fn name(&self) -> &'static str {
        "fold"
    }

    fn trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        let removed = self.hero.mask() | self.board.mask();
        let opponent = self.range.sample_combo(removed, rng)?;
        let folds = self.model.folds(
            &opponent,
            self.board.cards(),
            self.bet_size,
            self.pot,
            self.all_in_bet,
        );
        Some(if folds { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fold_rate(hero: &str, board: &str, range: &str, bet: f64, pot: f64) -> f64 {
        let hero: HoleCards = hero.parse().unwrap();
        let board: Board = board.parse().unwrap();
        let range = WeightedRange::parse(range).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        FoldProbabilityEstimator::new(hero, &board, &range, bet, pot)
            .estimate(&mut rng, 500)
            .value
    }

    #[test]
    fn test_air_always_folds() {
        // J4o misses A-8-2 entirely
        assert_eq!(fold_rate("KhKs", "As8h2d", "J4o", 50.0, 100.0), 1.0);
    }

    #[test]
    fn test_two_pair_never_folds() {
        assert_eq!(fold_rate("QhQs", "AsKh5d", "K5o", 1000.0, 100.0), 0.0);
    }

    #[test]
    fn test_mixed_range_fraction() {
        // J4o folds and 76s continues; both entries weigh 12
        let rate = fold_rate("KhKs", "As8h2d", "J4o:1,76s:3", 50.0, 100.0);
        assert!((rate - 0.5).abs() < 0.08, "fold rate {}", rate);
    }

    #[test]
    fn test_blocked_range_is_degenerate() {
        let hero: HoleCards = "AhAs".parse().unwrap();
        let board: Board = "AdAc2h".parse().unwrap();
        let range = WeightedRange::parse("AA").unwrap();
        let est = FoldProbabilityEstimator::new(hero, &board, &range, 50.0, 100.0)
            .estimate_parallel(5, 400, 100);
        assert!(est.is_degenerate());
        assert_eq!(est.value, 0.0);
    }

    #[test]
    fn test_all_in_marker_does_not_change_rate() {
        let hero: HoleCards = "KhKs".parse().unwrap();
        let board: Board = "As8h2d".parse().unwrap();
        let range = WeightedRange::parse("J4o,76s,QQ").unwrap();
        let plain = FoldProbabilityEstimator::new(hero, &board, &range, 300.0, 100.0)
            .estimate_parallel(9, 1_000, 250);
        let all_in = FoldProbabilityEstimator::new(hero, &board, &range, 300.0, 100.0)
            .with_all_in_bet(300.0)
            .estimate_parallel(9, 1_000, 250);
        assert_eq!(plain, all_in);
    }
}
