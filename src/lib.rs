//! # Poker EV
//!
//! Expected-value calculator for heads-up poker decisions against an
//! opponent described by a weighted range of hands.
//!
//! ## Features
//!
//! - **Range Parsing**: `AA:1,AKs:0.5,72o:1` style ranges with combo weights
//! - **Card-Aware Sampling**: Opponent combos never collide with visible cards
//! - **Monte Carlo Estimators**: Showdown equity and fold frequency, batched over rayon
//! - **Fold Model**: An ordered table of board-texture rules
//! - **Action Optimizer**: EVs for fold/check, call and sized bets with the best pick
//!
//! ## Quick Start
//!
//! ```
//! use poker_ev::{ActionOptimizer, DecisionRequest, EngineConfig};
//!
//! let request = DecisionRequest::from_notation(
//!     "AhKd", "7s8s9s", 100.0, 80.0, 10.0, 30.0, "AA:1,AKs:0.5,T9s:1",
//! ).unwrap();
//! let optimizer = ActionOptimizer::new(EngineConfig::fast().with_seed(42)).unwrap();
//! let evaluation = optimizer.evaluate(&request).unwrap();
//! println!("{}", evaluation);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, boards, deck and hand evaluation
//! - [`range`]: Range parsing and consistent combo sampling
//! - [`engine`]: Estimators, fold model and the action optimizer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ActionOptimizer                          │
//! │  - Candidate sizings      - EV formulas                         │
//! │  - Seed derivation        - Best action selection               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ runs Estimator
//!                               ▼
//!         ┌─────────────────────┴─────────────────────┐
//!         │                                           │
//!         ▼                                           ▼
//!    ┌─────────────────┐                     ┌──────────────────────┐
//!    │ EquityEstimator │                     │ FoldProbability      │
//!    │ (HandEvaluator) │                     │ Estimator (FoldModel)│
//!    └─────────────────┘                     └──────────────────────┘
//!         │                                           │
//!         └─────────────────────┬─────────────────────┘
//!                               ▼
//!                  WeightedRange + HandSampler
//! ```

#![warn(missing_docs)]

/// Card representations and hand evaluation.
pub mod cards;

/// Opponent ranges: designations, weights and sampling.
pub mod range;

/// Estimators, the fold model and the action optimizer.
pub mod engine;

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, HoleCards};
pub use engine::{
    ActionEvaluation, ActionOptimizer, BestAction, BetOption, DecisionRequest, EngineConfig,
    EngineError,
};
pub use range::WeightedRange;
