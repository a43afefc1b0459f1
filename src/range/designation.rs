//! Hand designations such as "AA", "AK", "AKs" and "AKo".
//!
//! A designation is a pattern over two ranks with an optional suitedness
//! qualifier. It knows its base combinatorial weight and which concrete
//! two-card holdings it covers.

use crate::cards::card::{parse_rank, Card, HoleCards, RANK_CHARS};
use std::fmt;
use std::str::FromStr;

use super::RangeParseError;

/// Suitedness qualifier of a designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// Two-character form: any suits.
    Any,
    /// Trailing 's': both cards share a suit.
    Suited,
    /// Trailing 'o': the cards have different suits.
    Offsuit,
    /// Any other trailing character. Weighted like `Any` but matches no combo.
    Unrecognized(char),
}

/// A compact pattern describing a set of two-card holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Designation {
    /// Higher of the two ranks (0-12).
    pub high: u8,
    /// Lower of the two ranks (0-12), equal to `high` for pairs.
    pub low: u8,
    /// Suitedness qualifier.
    pub qualifier: Qualifier,
}

impl Designation {
    /// Create a designation from two ranks in any order.
    pub fn new(rank1: u8, rank2: u8, qualifier: Qualifier) -> Self {
        Self {
            high: rank1.max(rank2),
            low: rank1.min(rank2),
            qualifier,
        }
    }

    /// Both ranks are the same.
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// Number of combos this pattern stands for before card removal.
    ///
    /// Two-character pairs count 12, suited 4, offsuit 12, and every other
    /// form (unqualified non-pairs, unknown suffixes) 16.
    pub fn base_weight(&self) -> f64 {
        match self.qualifier {
            Qualifier::Suited => 4.0,
            Qualifier::Offsuit => 12.0,
            Qualifier::Any if self.is_pair() => 12.0,
            Qualifier::Any | Qualifier::Unrecognized(_) => 16.0,
        }
    }

    /// Check whether a concrete pair of cards satisfies this pattern.
    pub fn matches(&self, card1: Card, card2: Card) -> bool {
        let (hi, lo) = if card1.rank() >= card2.rank() {
            (card1.rank(), card2.rank())
        } else {
            (card2.rank(), card1.rank())
        };
        if hi != self.high || lo != self.low {
            return false;
        }

        match self.qualifier {
            Qualifier::Suited => card1.suit() == card2.suit(),
            Qualifier::Offsuit => card1.suit() != card2.suit(),
            Qualifier::Any => true,
            Qualifier::Unrecognized(_) => false,
        }
    }

    /// All combos in a full deck matching this pattern.
    pub fn combos(&self) -> Vec<HoleCards> {
        let mut combos = Vec::with_capacity(16);
        for id1 in 0..52u8 {
            for id2 in (id1 + 1)..52u8 {
                let (c1, c2) = (Card::from_id(id1), Card::from_id(id2));
                if self.matches(c1, c2) {
                    combos.push(HoleCards::new(c1, c2));
                }
            }
        }
        combos
    }
}

impl FromStr for Designation {
    type Err = RangeParseError;

    /// Parse "AA", "AK", "AKs", "AKo" (ranks and suffix case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() < 2 || chars.len() > 3 {
            return Err(RangeParseError::InvalidFormat(s.to_string()));
        }

        let r1 = parse_rank(chars[0]).ok_or(RangeParseError::InvalidRank(chars[0]))?;
        let r2 = parse_rank(chars[1]).ok_or(RangeParseError::InvalidRank(chars[1]))?;

        let qualifier = match chars.get(2).map(|c| c.to_ascii_lowercase()) {
            None => Qualifier::Any,
            Some('s') => Qualifier::Suited,
            Some('o') => Qualifier::Offsuit,
            Some(other) => Qualifier::Unrecognized(other),
        };

        Ok(Self::new(r1, r2, qualifier))
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RANK_CHARS[self.high as usize], RANK_CHARS[self.low as usize])?;
        match self.qualifier {
            Qualifier::Any => Ok(()),
            Qualifier::Suited => write!(f, "s"),
            Qualifier::Offsuit => write!(f, "o"),
            Qualifier::Unrecognized(c) => write!(f, "{}", c),
        }
    }
}

/// Check whether two cards satisfy a designation.
pub fn hand_matches_combo(designation: &Designation, card1: Card, card2: Card) -> bool {
    designation.matches(card1, card2)
}
