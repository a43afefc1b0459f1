//! The decision request a host hands to the optimizer.

use serde::{Deserialize, Serialize};

use crate::cards::card::{parse_cards, Board, Card, CardParseError, HoleCards};
use crate::range::WeightedRange;

use super::EngineError;

/// A spot to evaluate: hero cards, board, stacks, the bet faced and the
/// opponent range text.
///
/// Amounts share one unit (big blinds in practice). `opp_bet == 0` means
/// nobody has bet and the hero may check or bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Hero hole cards.
    pub hero: HoleCards,
    /// Visible board, 0, 3, 4 or 5 cards.
    #[serde(default)]
    pub board: Board,
    /// Hero stack behind.
    pub hero_stack: f64,
    /// Opponent stack behind.
    pub opp_stack: f64,
    /// Bet the hero faces, 0 when checked to.
    pub opp_bet: f64,
    /// Pot before the opponent bet.
    pub pot: f64,
    /// Opponent range, e.g. `"AA:1,AKs:0.5,72o:1"`.
    pub range: String,
}

impl DecisionRequest {
    /// Build a request from card notation, e.g. hand `"AhKd"` and board
    /// `"7s8s9s"` (empty for preflop).
    pub fn from_notation(
        hand: &str,
        board: &str,
        hero_stack: f64,
        opp_stack: f64,
        opp_bet: f64,
        pot: f64,
        range: &str,
    ) -> Result<Self, EngineError> {
        let request = Self {
            hero: hand.parse()?,
            board: Board::from_cards(parse_cards(board)?)?,
            hero_stack,
            opp_stack,
            opp_bet,
            pot,
            range: range.to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    /// True when the hero faces a bet.
    pub fn facing_bet(&self) -> bool {
        self.opp_bet > 0.0
    }

    /// Parse the range text.
    pub fn parse_range(&self) -> Result<WeightedRange, EngineError> {
        Ok(WeightedRange::parse(&self.range)?)
    }

    /// Check amounts and card overlap.
    pub fn validate(&self) -> Result<(), RequestError> {
        for (name, value) in [
            ("hero_stack", self.hero_stack),
            ("opp_stack", self.opp_stack),
            ("opp_bet", self.opp_bet),
            ("pot", self.pot),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RequestError::InvalidAmount { name, value });
            }
        }
        if let Some(card) = self.hero.cards().into_iter().find(|&c| self.board.contains(c)) {
            return Err(RequestError::DuplicateCard(card));
        }
        Ok(())
    }
}

/// Error type for malformed decision requests.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// A stack, bet or pot that is negative or not finite.
    InvalidAmount {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A hero card also appears on the board.
    DuplicateCard(Card),
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount { name, value } => {
                write!(f, "{} must be a non-negative number, got {}", name, value)
            }
            Self::DuplicateCard(card) => write!(f, "Card {} is both in hand and on board", card),
        }
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_notation() {
        let req = DecisionRequest::from_notation("AhKd", "7s8s9s", 100.0, 80.0, 10.0, 30.0, "AA,KQs:0.5")
            .unwrap();
        assert_eq!(req.board.len(), 3);
        assert!(req.facing_bet());
        assert_eq!(req.parse_range().unwrap().len(), 2);

        let preflop = DecisionRequest::from_notation("AhKd", "", 100.0, 80.0, 0.0, 3.0, "AA").unwrap();
        assert!(preflop.board.is_empty());
        assert!(!preflop.facing_bet());
    }

    #[test]
    fn test_card_errors() {
        assert!(matches!(
            DecisionRequest::from_notation("AhK", "", 1.0, 1.0, 0.0, 1.0, "AA"),
            Err(EngineError::Cards(_))
        ));
        assert!(matches!(
            DecisionRequest::from_notation("AhKd", "7s8s", 1.0, 1.0, 0.0, 1.0, "AA"),
            Err(EngineError::Cards(CardParseError::InvalidBoardSize(2)))
        ));
        assert!(matches!(
            DecisionRequest::from_notation("AhKd", "Ah8s9s", 1.0, 1.0, 0.0, 1.0, "AA"),
            Err(EngineError::Request(RequestError::DuplicateCard(_)))
        ));
    }

    #[test]
    fn test_invalid_amounts() {
        let err = DecisionRequest::from_notation("AhKd", "", -1.0, 1.0, 0.0, 1.0, "AA").unwrap_err();
        assert!(matches!(
            err,
            EngineError::Request(RequestError::InvalidAmount { name: "hero_stack", .. })
        ));
        assert!(DecisionRequest::from_notation("AhKd", "", 1.0, 1.0, f64::NAN, 1.0, "AA").is_err());
    }

    #[test]
    fn test_bad_range_surfaces_on_parse() {
        let req = DecisionRequest::from_notation("AhKd", "", 1.0, 1.0, 0.0, 1.0, "AX,").unwrap();
        assert!(matches!(req.parse_range(), Err(EngineError::Range(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "hero": "AhKd",
            "board": ["7s", "8s", "9s"],
            "hero_stack": 100.0,
            "opp_stack": 90.0,
            "opp_bet": 0.0,
            "pot": 20.0,
            "range": "AA,KK"
        }"#;
        let req: DecisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.hero.to_string(), "AhKd");
        assert_eq!(req.board.len(), 3);
        let back: DecisionRequest = serde_json::from_str(&serde_json::to_string(&req).unwrap()).unwrap();
        assert_eq!(back, req);
    }
}
