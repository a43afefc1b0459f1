//! Opponent range modelling.
//!
//! ## Modules
//!
//! - `designation`: Hand patterns ("AA", "AKs", ...) with combo weights and matching
//! - `weighted`: Range text parsing and weighted designation draws
//! - `sampler`: Drawing concrete combos consistent with visible cards

pub mod designation;
pub mod sampler;
pub mod weighted;

pub use designation::{hand_matches_combo, Designation, Qualifier};
pub use sampler::HandSampler;
pub use weighted::WeightedRange;

/// Error type for range parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeParseError {
    /// Token that is not `DESIGNATION` or `DESIGNATION:FREQUENCY`, or a
    /// designation that is not 2-3 characters long.
    InvalidFormat(String),
    /// Unknown rank character.
    InvalidRank(char),
    /// Frequency that is not a finite, non-negative number.
    InvalidFrequency(String),
    /// The text holds no designations.
    EmptyRange,
    /// Every designation has zero weight.
    ZeroWeight,
}

impl std::fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid range token: {}", s),
            Self::InvalidRank(c) => write!(f, "Invalid rank character: {}", c),
            Self::InvalidFrequency(s) => write!(f, "Invalid frequency: {}", s),
            Self::EmptyRange => write!(f, "Range contains no hands"),
            Self::ZeroWeight => write!(f, "Range has zero total weight"),
        }
    }
}

impl std::error::Error for RangeParseError {}
