//! Showdown equity of the hero hand against a weighted range.
//!
//! Each trial draws an opponent combo from the range (avoiding hero and
//! board cards), deals the rest of the board from what is left, and scores
//! 1 for a hero win, 0.5 for a split and 0 for a loss.

use rand::Rng;

use super::estimator::Estimator;
use crate::cards::card::{Board, Card, Deck, HoleCards};
use crate::cards::hand_eval::HandEvaluator;
use crate::range::WeightedRange;

/// Monte Carlo showdown-equity estimator.
#[derive(Debug, Clone)]
pub struct EquityEstimator<'a> {
    hero: HoleCards,
    board: &'a Board,
    range: &'a WeightedRange,
    evaluator: HandEvaluator,
}

impl<'a> EquityEstimator<'a> {
    /// Create an estimator for `hero` on `board` against `range`.
    pub fn new(hero: HoleCards, board: &'a Board, range: &'a WeightedRange) -> Self {
        Self {
            hero,
            board,
            range,
            evaluator: HandEvaluator::new(),
        }
    }
}

impl Estimator for EquityEstimator<'_> {
    fn name(&self) -> &'static str {
        "equity"
    }

    fn trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        let removed = self.hero.mask() | self.board.mask();
        let villain = self.range.sample_combo(removed, rng)?;

        let known = self.board.cards();
        let mut full_board = [Card::from_id(0); 5];
        full_board[..known.len()].copy_from_slice(known);

        let need = self.board.missing();
        if need > 0 {
            let runout = Deck::without_mask(removed | villain.mask()).sample(rng, need)?;
            full_board[known.len()..].copy_from_slice(&runout);
        }

        let hero_rank = self.evaluator.evaluate(&self.hero, &full_board);
        let villain_rank = self.evaluator.evaluate(&villain, &full_board);

        Some(if hero_rank > villain_rank {
            1.0
        } else if hero_rank == villain_rank {
            0.5
        } else {
            0.0
        })
    }
}
