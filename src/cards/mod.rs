//! Cards, boards, the deck and hand evaluation.
//!
//! ## Modules
//!
//! - `card`: Card, hole cards, board and deck representations
//! - `hand_eval`: Hand ranking for 5-7 card hands

pub mod card;
pub mod hand_eval;

pub use card::{parse_cards, Board, Card, CardParseError, Deck, HoleCards};
pub use hand_eval::{HandCategory, HandEvaluator, HandRank};
