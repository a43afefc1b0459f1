//! Poker hand evaluation.
//!
//! This module provides hand ranking and comparison for 5-7 card poker hands.
//! The evaluator is stateless, so a single instance can be shared freely
//! across rayon workers.
//!
//! Ranks compare with `Ord`: a greater `HandRank` is the stronger hand, and
//! equal ranks are an exact split.

use super::card::{Card, HoleCards, RANK_5, RANK_6, RANK_A};
use std::cmp::Ordering;
use std::fmt;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// True for categories that beat two pair.
    pub fn beats_two_pair(&self) -> bool {
        *self > HandCategory::TwoPair
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hand rank that can be compared.
/// Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

impl HandRank {
    /// Create a new hand rank.
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    /// Get the raw rank value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Hand evaluator for poker hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a 5-card hand.
    pub fn evaluate_5(&self, cards: &[Card; 5]) -> HandRank {
        let mut rank_counts = [0u8; 13];
        let mut suit_counts = [0u8; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_counts[card.suit() as usize] += 1;
            rank_bits |= 1 << card.rank();
        }

        let is_flush = suit_counts.iter().any(|&c| c == 5);
        let straight_high = find_straight(rank_bits);

        if let (true, Some(high)) = (is_flush, straight_high) {
            return HandRank::new(HandCategory::StraightFlush, &[high]);
        }

        // Group ranks by multiplicity, highest rank first within each group
        let mut quads = Vec::with_capacity(1);
        let mut trips = Vec::with_capacity(1);
        let mut pairs = Vec::with_capacity(2);
        let mut singles = Vec::with_capacity(5);

        for rank in (0..13u8).rev() {
            match rank_counts[rank as usize] {
                4 => quads.push(rank),
                3 => trips.push(rank),
                2 => pairs.push(rank),
                1 => singles.push(rank),
                _ => {}
            }
        }

        if let Some(&quad) = quads.first() {
            let kicker = singles.first().copied().unwrap_or(0);
            return HandRank::new(HandCategory::FourOfAKind, &[quad, kicker]);
        }

        if let (Some(&trip), Some(&pair)) = (trips.first(), pairs.first()) {
            return HandRank::new(HandCategory::FullHouse, &[trip, pair]);
        }

        if is_flush {
            // All five cards share the suit; singles already holds them high to low
            return HandRank::new(HandCategory::Flush, &singles);
        }

        if let Some(high) = straight_high {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if let Some(&trip) = trips.first() {
            return HandRank::new(HandCategory::ThreeOfAKind, &[trip, singles[0], singles[1]]);
        }

        if pairs.len() == 2 {
            return HandRank::new(HandCategory::TwoPair, &[pairs[0], pairs[1], singles[0]]);
        }

        if let Some(&pair) = pairs.first() {
            return HandRank::new(
                HandCategory::OnePair,
                &[pair, singles[0], singles[1], singles[2]],
            );
        }

        HandRank::new(HandCategory::HighCard, &singles)
    }

    /// Evaluate a 7-card hand (best 5-card combination).
    pub fn evaluate_7(&self, cards: &[Card; 7]) -> HandRank {
        self.evaluate_best(cards)
    }

    /// Best 5-card rank among any 5 of the given 5-7 cards.
    fn evaluate_best(&self, cards: &[Card]) -> HandRank {
        let n = cards.len();
        debug_assert!((5..=7).contains(&n), "need 5-7 cards, got {}", n);
        let mut best = HandRank(0);

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    for l in (k + 1)..n {
                        for m in (l + 1)..n {
                            let hand = [cards[i], cards[j], cards[k], cards[l], cards[m]];
                            let rank = self.evaluate_5(&hand);
                            if rank > best {
                                best = rank;
                            }
                        }
                    }
                }
            }
        }

        best
    }

    /// Evaluate hole cards against board cards.
    ///
    /// With fewer than five cards in total (preflop) there is no made hand,
    /// so the rank reflects only a pocket pair or the two high cards.
    pub fn evaluate(&self, hole_cards: &HoleCards, board: &[Card]) -> HandRank {
        if board.len() < 3 {
            return if hole_cards.is_pair() {
                HandRank::new(HandCategory::OnePair, &[hole_cards.card1.rank()])
            } else {
                HandRank::new(
                    HandCategory::HighCard,
                    &[hole_cards.card1.rank(), hole_cards.card2.rank()],
                )
            };
        }

        let mut cards = [hole_cards.card1; 7];
        cards[1] = hole_cards.card2;
        cards[2..2 + board.len()].copy_from_slice(board);
        self.evaluate_best(&cards[..2 + board.len()])
    }

    /// Category of the best hand made with a non-empty board, `None` preflop.
    pub fn classify(&self, hole_cards: &HoleCards, board: &[Card]) -> Option<HandCategory> {
        if board.is_empty() {
            None
        } else {
            Some(self.evaluate(hole_cards, board).category())
        }
    }

    /// Compare two hands on the same board.
    pub fn compare(&self, hole1: &HoleCards, hole2: &HoleCards, board: &[Card]) -> Ordering {
        self.evaluate(hole1, board).cmp(&self.evaluate(hole2, board))
    }
}

/// Find the highest straight from a rank bitmask.
/// Returns the rank of the straight's top card, or None if no straight.
fn find_straight(rank_bits: u16) -> Option<u8> {
    for top in (RANK_6..=RANK_A).rev() {
        let mask = 0b11111u16 << (top - 4);
        if rank_bits & mask == mask {
            return Some(top);
        }
    }

    // Wheel: A-2-3-4-5 plays as a five-high straight
    const WHEEL: u16 = (1 << RANK_A) | 0b1111;
    if rank_bits & WHEEL == WHEEL {
        return Some(RANK_5);
    }

    None
}
