//! Configuration options for the decision engine.
//!
//! This module provides the configuration struct that controls the Monte
//! Carlo budgets, parallelism and seeding of the estimators.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the decision engine.
///
/// # Example
/// ```
/// use poker_ev::engine::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(7);
/// assert_eq!(config.equity_iterations, 10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo iterations for the showdown-equity estimate.
    pub equity_iterations: usize,

    /// Monte Carlo iterations for each fold-probability estimate.
    pub fold_iterations: usize,

    /// Iterations per parallel batch.
    ///
    /// Each batch runs on one rayon worker with its own random stream.
    pub batch_size: usize,

    /// Number of threads to use.
    ///
    /// Set to 0 or 1 for single-threaded execution.
    /// Set to `None` to use rayon's global pool.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, every estimator stream is derived from this seed, making
    /// results reproducible. If `None`, a random seed is used.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            equity_iterations: 10_000,
            fold_iterations: 500,
            batch_size: 1_000,
            num_threads: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with small budgets for interactive use.
    pub fn fast() -> Self {
        Self {
            equity_iterations: 1_000,
            fold_iterations: 200,
            batch_size: 250,
            ..Default::default()
        }
    }

    /// Builder method: set equity iterations.
    pub fn with_equity_iterations(mut self, iterations: usize) -> Self {
        self.equity_iterations = iterations;
        self
    }

    /// Builder method: set fold-probability iterations.
    pub fn with_fold_iterations(mut self, iterations: usize) -> Self {
        self.fold_iterations = iterations;
        self
    }

    /// Builder method: set batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// True when estimators should run on a single thread.
    pub fn is_single_threaded(&self) -> bool {
        matches!(self.num_threads, Some(0) | Some(1))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.equity_iterations == 0 {
            return Err(ConfigError::ZeroIterations("equity"));
        }
        if self.fold_iterations == 0 {
            return Err(ConfigError::ZeroIterations("fold"));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An iteration budget is zero.
    ZeroIterations(&'static str),
    /// Batch size is zero.
    ZeroBatchSize,
    /// The config file could not be read.
    Io(String),
    /// The config JSON is malformed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroIterations(name) => write!(f, "{} iterations must be positive", name),
            ConfigError::ZeroBatchSize => write!(f, "batch size must be positive"),
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.equity_iterations, 10_000);
        assert_eq!(config.fold_iterations, 500);
        assert!(config.seed.is_none());
        assert!(!config.is_single_threaded());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::fast().with_seed(3).with_threads(1).with_fold_iterations(50);
        assert_eq!(config.seed, Some(3));
        assert!(config.is_single_threaded());
        assert_eq!(config.fold_iterations, 50);
        assert_eq!(config.equity_iterations, 1_000);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            EngineConfig::default().with_equity_iterations(0).validate(),
            Err(ConfigError::ZeroIterations("equity"))
        );
        assert_eq!(
            EngineConfig::default().with_batch_size(0).validate(),
            Err(ConfigError::ZeroBatchSize)
        );
    }

    #[test]
    fn test_json_partial_config() {
        let config = EngineConfig::from_json_str(r#"{"equity_iterations": 2000, "seed": 11}"#).unwrap();
        assert_eq!(config.equity_iterations, 2000);
        assert_eq!(config.fold_iterations, 500);
        assert_eq!(config.seed, Some(11));

        assert!(matches!(EngineConfig::from_json_str("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"fold_iterations": 0}"#),
            Err(ConfigError::ZeroIterations("fold"))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::from_json_file("/nonexistent/engine.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
