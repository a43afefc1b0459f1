//! Monte Carlo estimation over independent trials.
//!
//! An [`Estimator`] supplies a single randomized trial. The provided methods
//! run a budget of trials either on one random stream or split into batches
//! that run on rayon workers, each with its own `StdRng`, and combine the
//! per-batch tallies by summation.
//!
//! A trial may come back empty (no combo left for the drawn designation, or
//! too few cards to finish the board). Empty trials are skipped: they count
//! as attempts but not as successes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of a Monte Carlo estimation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Estimate {
    /// Mean score over successful trials, 0 when there were none.
    pub value: f64,
    /// Trials that produced a sample.
    pub successes: usize,
    /// Trials attempted.
    pub attempts: usize,
}

impl Estimate {
    /// True when no trial produced a sample.
    pub fn is_degenerate(&self) -> bool {
        self.successes == 0
    }
}

/// Running (score, successes, attempts) totals.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    score: f64,
    successes: usize,
    attempts: usize,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            score: self.score + other.score,
            successes: self.successes + other.successes,
            attempts: self.attempts + other.attempts,
        }
    }

    fn into_estimate(self) -> Estimate {
        let value = if self.successes == 0 {
            0.0
        } else {
            self.score / self.successes as f64
        };
        Estimate {
            value,
            successes: self.successes,
            attempts: self.attempts,
        }
    }
}

/// A Monte Carlo estimator defined by its single-trial score.
pub trait Estimator: Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Run one trial, returning its score or `None` to skip it.
    fn trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64>;

    /// Run `iterations` trials on the given random stream.
    fn estimate<R: Rng + ?Sized>(&self, rng: &mut R, iterations: usize) -> Estimate
    where
        Self: Sized,
    {
        let estimate = run_trials(self, rng, iterations).into_estimate();
        report(self, &estimate);
        estimate
    }

    /// Run `iterations` trials in batches of `batch_size` on the current rayon pool.
    ///
    /// Batch `b` draws from `StdRng::seed_from_u64(seed + b)`, so the result
    /// depends only on the seed and the budget, not on scheduling.
    fn estimate_parallel(&self, seed: u64, iterations: usize, batch_size: usize) -> Estimate
    where
        Self: Sized,
    {
        let batch_size = batch_size.max(1);
        let batches = iterations.div_ceil(batch_size);

        let estimate = (0..batches)
            .into_par_iter()
            .map(|b| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(b as u64));
                let len = batch_size.min(iterations - b * batch_size);
                run_trials(self, &mut rng, len)
            })
            .reduce(Tally::default, Tally::merge)
            .into_estimate();
        report(self, &estimate);
        estimate
    }
}

fn run_trials<E: Estimator, R: Rng + ?Sized>(estimator: &E, rng: &mut R, iterations: usize) -> Tally {
    let mut tally = Tally {
        attempts: iterations,
        ..Tally::default()
    };
    for _ in 0..iterations {
        if let Some(score) = estimator.trial(rng) {
            tally.score += score;
            tally.successes += 1;
        }
    }
    tally
}

fn report<E: Estimator>(estimator: &E, estimate: &Estimate) {
    if estimate.is_degenerate() {
        log::warn!(
            "{}: no valid samples in {} attempts, defaulting to 0",
            estimator.name(),
            estimate.attempts
        );
    } else {
        log::debug!(
            "{}: {:.4} over {}/{} samples",
            estimator.name(),
            estimate.value,
            estimate.successes,
            estimate.attempts
        );
    }
}
