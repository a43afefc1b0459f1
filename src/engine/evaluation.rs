//! Decision output: candidate bets, baselines and the recommended action.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sized bet or raise the optimizer considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetOption {
    /// Raise by twice the opponent bet.
    MinRaise,
    /// Raise by half the pot after calling.
    HalfPotRaise,
    /// Raise by the pot after calling.
    PotRaise,
    /// Commit the effective stack.
    AllIn,
    /// Bet a quarter of the pot.
    Small,
    /// Bet 80% of the pot.
    Large,
    /// Bet 150% of the pot.
    Overbet,
}

impl BetOption {
    /// Raise options when facing a bet, in evaluation order.
    pub const FACING_BET: [BetOption; 4] = [
        BetOption::MinRaise,
        BetOption::HalfPotRaise,
        BetOption::PotRaise,
        BetOption::AllIn,
    ];

    /// Bet options when checked to, in evaluation order.
    pub const OPEN_BET: [BetOption; 4] = [
        BetOption::Small,
        BetOption::Large,
        BetOption::Overbet,
        BetOption::AllIn,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            BetOption::MinRaise => "min_raise",
            BetOption::HalfPotRaise => "half_pot_raise",
            BetOption::PotRaise => "pot_raise",
            BetOption::AllIn => "all_in",
            BetOption::Small => "small",
            BetOption::Large => "large",
            BetOption::Overbet => "overbet",
        }
    }

    /// Look up an option by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::FACING_BET
            .iter()
            .chain(Self::OPEN_BET.iter())
            .copied()
            .find(|option| option.name() == name)
    }

    /// Check if this option commits the effective stack.
    pub fn is_all_in(&self) -> bool {
        matches!(self, BetOption::AllIn)
    }
}

impl fmt::Display for BetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestAction {
    /// Give up the hand.
    Fold,
    /// Pass without betting.
    Check,
    /// Match the opponent bet.
    Call,
    /// Bet or raise with the given sizing.
    Bet(BetOption),
}

impl fmt::Display for BestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestAction::Fold => write!(f, "fold"),
            BestAction::Check => write!(f, "check"),
            BestAction::Call => write!(f, "call"),
            BestAction::Bet(option) => write!(f, "bet ({})", option),
        }
    }
}

/// One evaluated bet or raise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionCandidate {
    /// Which sizing rule produced the amount.
    pub option: BetOption,
    /// Chips added on top of any call.
    pub bet_amount: f64,
    /// Opponent fold frequency at this sizing.
    pub fold_rate: f64,
    /// Expected value of the action.
    pub ev: f64,
}

/// Full result of a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvaluation {
    /// Estimated showdown equity against the range.
    pub win_rate: f64,
    /// True when the hero faces a bet (fold/call spot).
    pub facing_bet: bool,
    /// EV of the passive baseline: fold (always 0) or check.
    pub baseline: f64,
    /// EV of calling, only when facing a bet.
    pub call_ev: Option<f64>,
    /// Evaluated bets in evaluation order.
    pub candidates: Vec<ActionCandidate>,
    /// Highest-EV candidate, earliest on ties.
    pub best_bet: Option<ActionCandidate>,
    /// Overall recommendation.
    pub best_action: BestAction,
    /// EV of the recommendation.
    pub best_ev: f64,
}

impl ActionEvaluation {
    /// Find a candidate by option name, e.g. `"all_in"`.
    pub fn candidate(&self, name: &str) -> Option<&ActionCandidate> {
        let option = BetOption::from_name(name)?;
        self.candidates.iter().find(|c| c.option == option)
    }

    /// The passive action this spot falls back to.
    pub fn baseline_action(&self) -> BestAction {
        if self.facing_bet {
            BestAction::Fold
        } else {
            BestAction::Check
        }
    }
}

impl fmt::Display for ActionEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Estimated Win Rate: {:.3}", self.win_rate)?;
        if self.facing_bet {
            writeln!(f, "EV (Fold): {:.2}", self.baseline)?;
            if let Some(call_ev) = self.call_ev {
                writeln!(f, "EV (Call): {:.2}", call_ev)?;
            }
        } else {
            writeln!(f, "EV (Check): {:.2}", self.baseline)?;
        }
        writeln!(f, "Bet Options:")?;
        for c in &self.candidates {
            writeln!(
                f,
                "  {}: Bet Amount = {:.2}, EV = {:.2}",
                c.option, c.bet_amount, c.ev
            )?;
        }
        if let Some(best) = &self.best_bet {
            writeln!(
                f,
                "Best Bet Option: {} (Bet Amount = {:.2}, EV = {:.2})",
                best.option, best.bet_amount, best.ev
            )?;
        }
        write!(
            f,
            "Overall Best Action: {} with EV = {:.2}",
            self.best_action, self.best_ev
        )
    }
}
