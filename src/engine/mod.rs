//! Monte Carlo decision engine.
//!
//! ## Modules
//!
//! - `config`: Iteration budgets, parallelism and seeding
//! - `estimator`: The `Estimator` trait with sequential and batched parallel runs
//! - `equity`: Showdown equity against a weighted range
//! - `fold_model`: Deterministic opponent fold rules
//! - `fold_probability`: Range-wide fold frequency for a bet size
//! - `request`: The decision request contract
//! - `evaluation`: Candidates, baselines and the recommended action
//! - `optimizer`: Turns estimates into EVs and picks the best action

pub mod config;
pub mod equity;
pub mod estimator;
pub mod evaluation;
pub mod fold_model;
pub mod fold_probability;
pub mod optimizer;
pub mod request;

pub use config::{ConfigError, EngineConfig};
pub use equity::EquityEstimator;
pub use estimator::{Estimate, Estimator};
pub use evaluation::{ActionCandidate, ActionEvaluation, BestAction, BetOption};
pub use fold_model::{FoldModel, FoldRule, FoldSpot, FoldVerdict, FOLD_RULES};
pub use fold_probability::FoldProbabilityEstimator;
pub use optimizer::ActionOptimizer;
pub use request::{DecisionRequest, RequestError};

use crate::cards::CardParseError;
use crate::range::RangeParseError;

/// Error type for decision evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Hand or board notation could not be parsed.
    Cards(CardParseError),
    /// Range text could not be parsed.
    Range(RangeParseError),
    /// Engine configuration is invalid.
    Config(ConfigError),
    /// Request amounts or cards are inconsistent.
    Request(RequestError),
    /// The dedicated thread pool could not be built.
    ThreadPool(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cards(e) => write!(f, "{}", e),
            Self::Range(e) => write!(f, "{}", e),
            Self::Config(e) => write!(f, "{}", e),
            Self::Request(e) => write!(f, "{}", e),
            Self::ThreadPool(msg) => write!(f, "Failed to build thread pool: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cards(e) => Some(e),
            Self::Range(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Request(e) => Some(e),
            Self::ThreadPool(_) => None,
        }
    }
}

impl From<CardParseError> for EngineError {
    fn from(err: CardParseError) -> Self {
        Self::Cards(err)
    }
}

impl From<RangeParseError> for EngineError {
    fn from(err: RangeParseError) -> Self {
        Self::Range(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<RequestError> for EngineError {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}
