//! Card representation for poker.
//!
//! This module provides the fundamental card types used by the engine:
//! - `Card`: A single playing card with rank and suit
//! - `HoleCards`: A player's two private cards
//! - `Board`: Community cards (0, 3, 4 or 5 cards)
//! - `Deck`: The 52-card universe as a fixed slot mask with removal

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Rank characters in ascending order.
pub const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters indexed by suit.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Mask with all 52 card slots set.
const FULL_MASK: u64 = (1u64 << 52) - 1;

/// Parse a rank character (case-insensitive) into 0-12.
pub fn parse_rank(c: char) -> Option<u8> {
    RANK_CHARS
        .iter()
        .position(|&r| r == c.to_ascii_uppercase())
        .map(|r| r as u8)
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask of this card's deck slot.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a card from two characters like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(CardParseError::InvalidNotation(s.to_string()));
        }

        let rank = parse_rank(chars[0]).ok_or(CardParseError::InvalidRank(chars[0]))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == chars[1].to_ascii_lowercase())
            .ok_or(CardParseError::InvalidSuit(chars[1]))?;

        Ok(Self::new(rank, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Card {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Split a card string like "AhKd" or "Ah Kd" into cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.chars().count() % 2 != 0 {
        return Err(CardParseError::InvalidNotation(s));
    }

    let chars: Vec<char> = s.chars().collect();
    let mut cards = Vec::with_capacity(chars.len() / 2);
    let mut seen = 0u64;
    for pair in chars.chunks(2) {
        let card: Card = pair.iter().collect::<String>().parse()?;
        if seen & card.mask() != 0 {
            return Err(CardParseError::DuplicateCard(card));
        }
        seen |= card.mask();
        cards.push(card);
    }
    Ok(cards)
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        debug_assert!(card1 != card2, "hole cards must be distinct");
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Check if hole cards are suited.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if hole cards are a pair.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Deck mask covering both cards.
    pub fn mask(&self) -> u64 {
        self.card1.mask() | self.card2.mask()
    }

    /// Check if a card conflicts with these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = CardParseError;

    /// Parse hole cards from string like "AhKs" or "Ah Ks".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() != 2 {
            return Err(CardParseError::InvalidHandSize(cards.len()));
        }
        Ok(Self::new(cards[0], cards[1]))
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for HoleCards {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HoleCards {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(5) }
    }

    /// Create a board from known cards. Sizes other than 0, 3, 4 or 5 are rejected.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CardParseError> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            return Err(CardParseError::InvalidBoardSize(cards.len()));
        }
        let mut seen = 0u64;
        for card in &cards {
            if seen & card.mask() != 0 {
                return Err(CardParseError::DuplicateCard(*card));
            }
            seen |= card.mask();
        }
        Ok(Self { cards })
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deck mask covering all board cards.
    pub fn mask(&self) -> u64 {
        self.cards.iter().fold(0, |mask, c| mask | c.mask())
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.mask() & card.mask() != 0
    }

    /// Number of cards still to come before showdown.
    pub fn missing(&self) -> usize {
        5 - self.cards.len()
    }
}

impl FromStr for Board {
    type Err = CardParseError;

    /// Parse a board from string like "AhKsQd" (empty string is preflop).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cards(parse_cards(s)?)
    }
}

impl TryFrom<Vec<Card>> for Board {
    type Error = CardParseError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// The 52-card deck as a fixed slot mask (bit `rank * 4 + suit`).
///
/// The deck is never shuffled in place: availability is computed by
/// clearing removed slots, and draws pick uniformly among the set bits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    mask: u64,
}

impl Deck {
    /// Create the full 52-card deck.
    pub fn new() -> Self {
        Self { mask: FULL_MASK }
    }

    /// Create a deck with the cards of `removed` (a card mask) taken out.
    pub fn without_mask(removed: u64) -> Self {
        Self { mask: FULL_MASK & !removed }
    }

    /// Create a deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Self {
        Self::without_mask(dead_cards.iter().fold(0, |mask, c| mask | c.mask()))
    }

    /// Check if a card is still available.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.mask & card.mask() != 0
    }

    /// Get the number of available cards.
    pub fn remaining(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Raw availability mask.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Iterate over available cards in ascending id order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        (0..52u8).filter(move |&id| self.mask & (1u64 << id) != 0).map(Card::from_id)
    }

    /// Draw `n` distinct available cards uniformly without replacement.
    ///
    /// Returns `None` when fewer than `n` cards remain.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Option<Vec<Card>> {
        let available: Vec<Card> = self.cards().collect();
        if available.len() < n {
            return None;
        }
        Some(
            index::sample(rng, available.len(), n)
                .into_iter()
                .map(|i| available[i])
                .collect(),
        )
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

/// Error type for card, hand and board notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    /// Card text that is not two characters, or an odd-length card list.
    InvalidNotation(String),
    /// Unknown rank character.
    InvalidRank(char),
    /// Unknown suit character.
    InvalidSuit(char),
    /// The same card given twice.
    DuplicateCard(Card),
    /// Hole cards that are not exactly two cards.
    InvalidHandSize(usize),
    /// Board that is not 0, 3, 4 or 5 cards.
    InvalidBoardSize(usize),
}

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNotation(s) => write!(f, "Invalid card notation: {}", s),
            Self::InvalidRank(c) => write!(f, "Invalid rank character: {}", c),
            Self::InvalidSuit(c) => write!(f, "Invalid suit character: {} (expected s, h, d or c)", c),
            Self::DuplicateCard(c) => write!(f, "Card {} appears more than once", c),
            Self::InvalidHandSize(n) => write!(f, "Hand must be exactly 2 cards, got {}", n),
            Self::InvalidBoardSize(n) => write!(f, "Board must have 0, 3, 4 or 5 cards, got {}", n),
        }
    }
}

impl std::error::Error for CardParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), RANK_A);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(RANK_2, SUIT_CLUBS);
        assert_eq!(two_clubs.rank(), RANK_2);
        assert_eq!(two_clubs.suit(), SUIT_CLUBS);
        assert_eq!(two_clubs.to_string(), "2c");
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("As".parse::<Card>().unwrap().to_string(), "As");
        assert_eq!("Kh".parse::<Card>().unwrap().to_string(), "Kh");
        assert_eq!("2c".parse::<Card>().unwrap().to_string(), "2c");
        assert_eq!("td".parse::<Card>().unwrap().to_string(), "Td");
        assert_eq!("XX".parse::<Card>(), Err(CardParseError::InvalidRank('X')));
        assert_eq!("Ax".parse::<Card>(), Err(CardParseError::InvalidSuit('x')));
        assert!("A".parse::<Card>().is_err());
        assert!("Ahh".parse::<Card>().is_err());
    }

    #[test]
    fn test_card_equality_by_value() {
        let a: Card = "Qd".parse().unwrap();
        let b = Card::new(RANK_Q, SUIT_DIAMONDS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hole_cards() {
        let hc: HoleCards = "KsAh".parse().unwrap();
        assert_eq!(hc.card1.rank(), RANK_A);
        assert_eq!(hc.card2.rank(), RANK_K);
        assert!(!hc.is_suited());
        assert!(!hc.is_pair());

        let hc_suited: HoleCards = "AsKs".parse().unwrap();
        assert!(hc_suited.is_suited());

        let hc_pair: HoleCards = "Ah As".parse().unwrap();
        assert!(hc_pair.is_pair());

        assert_eq!("AhKsQd".parse::<HoleCards>(), Err(CardParseError::InvalidHandSize(3)));
        assert!("AhAh".parse::<HoleCards>().is_err());
    }

    #[test]
    fn test_board() {
        let board: Board = "".parse().unwrap();
        assert!(board.is_empty());
        assert_eq!(board.missing(), 5);

        let board: Board = "AhKsQd".parse().unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.missing(), 2);
        assert!(board.contains("Ks".parse().unwrap()));
        assert!(!board.contains("Kd".parse().unwrap()));

        let board: Board = "AhKsQdJc".parse().unwrap();
        assert_eq!(board.missing(), 1);

        let board: Board = "AhKsQdJcTc".parse().unwrap();
        assert_eq!(board.missing(), 0);
    }

    #[test]
    fn test_board_rejects_partial_flop() {
        assert_eq!("AhKs".parse::<Board>(), Err(CardParseError::InvalidBoardSize(2)));
        assert_eq!("Ah".parse::<Board>(), Err(CardParseError::InvalidBoardSize(1)));
        assert!("AhKsQd7".parse::<Board>().is_err());
    }

    #[test]
    fn test_deck_without() {
        let dead: Vec<Card> = vec!["As".parse().unwrap(), "Ah".parse().unwrap()];
        let deck = Deck::without(&dead);
        assert_eq!(deck.remaining(), 50);
        assert!(!deck.contains(dead[0]));
        assert!(deck.contains("Ad".parse().unwrap()));
        assert_eq!(deck.cards().count(), 50);
    }

    #[test]
    fn test_deck_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::without(&["As".parse::<Card>().unwrap()]);
        let cards = deck.sample(&mut rng, 5).unwrap();
        assert_eq!(cards.len(), 5);
        let mask = cards.iter().fold(0u64, |m, c| m | c.mask());
        assert_eq!(mask.count_ones(), 5);
        assert!(cards.iter().all(|c| deck.contains(*c)));

        let tiny = Deck::without_mask(FULL_MASK & !0b11);
        assert_eq!(tiny.remaining(), 2);
        assert!(tiny.sample(&mut rng, 3).is_none());
    }

    #[test]
    fn test_card_serde_roundtrip() {
        let board: Board = "7s8s9s".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["7s","8s","9s"]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>(r#"["7s","8s"]"#).is_err());
    }
}
