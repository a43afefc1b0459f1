//! Opponent fold decisions.
//!
//! Whether a given opponent holding folds to a bet is decided by a priority
//! table of guarded rules. Rules are checked top to bottom and the first
//! rule whose guard holds gives the verdict; when none applies the opponent
//! continues.
//!
//! | # | rule                         | guard                                                  | folds                         |
//! |---|------------------------------|--------------------------------------------------------|-------------------------------|
//! | 1 | two pair, unpaired board     | two pair and no paired board rank                      | never                         |
//! | 2 | made flush                   | suited hole cards, 3+ board cards of that suit         | never                         |
//! | 3 | suited connector             | suited and ranks at most 2 apart                       | never                         |
//! | 4 | nothing                      | no pocket pair, top pair, overpair or draw; bet >= pot/4 | always                      |
//! | 5 | top pair / overpair          | top pair or overpair                                   | bet > 1.5 pot                 |
//! | 6 | half a draw                  | suited xor connected; bet >= 1.5 pot                   | always                        |
//! | 7 | underpair, no set            | pocket pair below board high, no set; bet >= 0.8 pot   | always                        |
//! | 8 | underpair, set               | pocket pair below board high, set                      | 4-card monotone, bet >= 1.6 pot |
//! | 9 | board plays                  | better than two pair, no hole rank on board            | always                        |

use serde::Serialize;

use crate::cards::card::{Card, HoleCards};
use crate::cards::hand_eval::{HandCategory, HandEvaluator};

/// Everything the fold rules look at, derived once per opponent hand.
#[derive(Debug, Clone, Copy)]
pub struct FoldSpot {
    /// Bet the opponent faces.
    pub bet_size: f64,
    /// Pot before the bet.
    pub pot: f64,
    /// Made-hand category, `None` with an empty board.
    pub category: Option<HandCategory>,
    /// Some rank appears at least twice on the board.
    pub board_paired: bool,
    /// Bitmask of ranks present on the board.
    pub board_ranks: u16,
    /// Highest board rank, `None` with an empty board.
    pub board_high: Option<u8>,
    /// Board has exactly four cards, all of one suit.
    pub board_monotone_four: bool,
    /// Hole cards hold a flush with three or more board cards.
    pub made_flush: bool,
    /// Pocket pair.
    pub is_pair: bool,
    /// Rank of the pocket pair.
    pub pair_rank: Option<u8>,
    /// A hole card matches the highest board rank.
    pub is_top_pair: bool,
    /// Pocket pair above the highest board rank.
    pub is_overpair: bool,
    /// Hole cards share a suit.
    pub is_suited: bool,
    /// Hole ranks are at most two apart (no wraparound).
    pub is_connected: bool,
    /// Suited and connected.
    pub has_draw: bool,
    /// A hole rank appears on the board.
    pub hole_rank_on_board: bool,
}

impl FoldSpot {
    /// Derive the rule inputs for `hole` facing `bet_size` into `pot` on `board`.
    pub fn new(
        evaluator: &HandEvaluator,
        hole: &HoleCards,
        board: &[Card],
        bet_size: f64,
        pot: f64,
    ) -> Self {
        let mut rank_counts = [0u8; 13];
        let mut suit_counts = [0u8; 4];
        for card in board {
            rank_counts[card.rank() as usize] += 1;
            suit_counts[card.suit() as usize] += 1;
        }
        let board_ranks = board.iter().fold(0u16, |bits, c| bits | (1 << c.rank()));
        let board_high = board.iter().map(Card::rank).max();

        let (r1, r2) = (hole.card1.rank(), hole.card2.rank());
        let is_pair = r1 == r2;
        let pair_rank = is_pair.then_some(r1);
        let is_suited = hole.is_suited();
        let is_connected = r1.abs_diff(r2) <= 2;

        Self {
            bet_size,
            pot,
            category: evaluator.classify(hole, board),
            board_paired: rank_counts.iter().any(|&n| n >= 2),
            board_ranks,
            board_high,
            board_monotone_four: board.len() == 4
                && suit_counts.iter().any(|&n| n as usize == board.len()),
            made_flush: is_suited && suit_counts[hole.card1.suit() as usize] >= 3,
            is_pair,
            pair_rank,
            is_top_pair: board_high.is_some_and(|high| r1 == high || r2 == high),
            is_overpair: matches!((pair_rank, board_high), (Some(p), Some(h)) if p > h),
            is_suited,
            is_connected,
            has_draw: is_suited && is_connected,
            hole_rank_on_board: board_ranks & ((1 << r1) | (1 << r2)) != 0,
        }
    }

    fn is_underpair(&self) -> bool {
        matches!((self.pair_rank, self.board_high), (Some(p), Some(h)) if p < h)
    }
}

/// One row of the fold decision table.
#[derive(Clone, Copy)]
pub struct FoldRule {
    /// Rule name, reported with the verdict.
    pub name: &'static str,
    /// Whether the rule applies to the spot.
    pub applies: fn(&FoldSpot) -> bool,
    /// The verdict when it applies: `true` means the opponent folds.
    pub folds: fn(&FoldSpot) -> bool,
}

impl std::fmt::Debug for FoldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoldRule").field("name", &self.name).finish()
    }
}

/// The fold rules in priority order.
pub const FOLD_RULES: [FoldRule; 9] = [
    FoldRule {
        name: "two_pair_unpaired_board",
        applies: |s| s.category == Some(HandCategory::TwoPair) && !s.board_paired,
        folds: |_| false,
    },
    FoldRule {
        // Ace-high or not, a made flush continues
        name: "made_flush",
        applies: |s| s.made_flush,
        folds: |_| false,
    },
    FoldRule {
        name: "suited_connector",
        applies: |s| s.is_suited && s.is_connected,
        folds: |_| false,
    },
    FoldRule {
        name: "no_pair_no_draw",
        applies: |s| {
            !s.is_pair
                && !s.is_top_pair
                && !s.is_overpair
                && !s.has_draw
                && s.bet_size >= 0.25 * s.pot
        },
        folds: |_| true,
    },
    FoldRule {
        name: "top_pair_or_overpair",
        applies: |s| s.is_top_pair || s.is_overpair,
        folds: |s| s.bet_size > 1.5 * s.pot,
    },
    FoldRule {
        name: "single_draw_feature",
        applies: |s| (s.is_suited != s.is_connected) && s.bet_size >= 1.5 * s.pot,
        folds: |_| true,
    },
    FoldRule {
        name: "underpair_no_set",
        applies: |s| s.is_underpair() && !s.hole_rank_on_board && s.bet_size >= 0.8 * s.pot,
        folds: |_| true,
    },
    FoldRule {
        name: "underpair_set",
        applies: |s| s.is_underpair() && s.hole_rank_on_board,
        folds: |s| s.board_monotone_four && s.bet_size >= 1.6 * s.pot,
    },
    FoldRule {
        name: "board_plays",
        applies: |s| s.category.is_some_and(|c| c.beats_two_pair()) && !s.hole_rank_on_board,
        folds: |_| true,
    },
];

/// Outcome of the fold decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoldVerdict {
    /// The opponent folds.
    pub folds: bool,
    /// Name of the rule that decided, `None` for the default.
    pub rule: Option<&'static str>,
}

/// Deterministic opponent fold model.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldModel {
    evaluator: HandEvaluator,
}

impl FoldModel {
    /// Create a fold model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `hole` folds to `bet_size` into `pot` on `board`.
    ///
    /// `all_in_bet` is accepted for callers that track the all-in size but
    /// no rule reads it.
    pub fn folds(
        &self,
        hole: &HoleCards,
        board: &[Card],
        bet_size: f64,
        pot: f64,
        all_in_bet: Option<f64>,
    ) -> bool {
        self.verdict(hole, board, bet_size, pot, all_in_bet).folds
    }

    /// Like [`FoldModel::folds`], also naming the rule that decided.
    pub fn verdict(
        &self,
        hole: &HoleCards,
        board: &[Card],
        bet_size: f64,
        pot: f64,
        _all_in_bet: Option<f64>,
    ) -> FoldVerdict {
        let spot = FoldSpot::new(&self.evaluator, hole, board, bet_size, pot);
        FOLD_RULES
            .iter()
            .find(|rule| (rule.applies)(&spot))
            .map(|rule| FoldVerdict {
                folds: (rule.folds)(&spot),
                rule: Some(rule.name),
            })
            .unwrap_or(FoldVerdict {
                folds: false,
                rule: None,
            })
    }
}
