//! Action EV optimization.
//!
//! Given a [`DecisionRequest`] the optimizer estimates the hero's showdown
//! equity, the opponent's fold frequency at each candidate sizing, and turns
//! those into EVs for folding or checking, calling, and each bet or raise.
//!
//! Facing a bet of `b` into pot `p`:
//! - fold = 0
//! - call = w·p − (1 − w)·b
//! - raise by `r` (total `t = b + r`, call rate `c`):
//!   (1 − c)·(p − t) + c·(c·(p + t) − (1 − c)·t)
//!
//! Checked to:
//! - check = w·p
//! - bet `x` (call rate `c`): c·(p + x) − (1 − c)·x

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::config::EngineConfig;
use super::equity::EquityEstimator;
use super::estimator::Estimator;
use super::evaluation::{ActionCandidate, ActionEvaluation, BestAction, BetOption};
use super::fold_probability::FoldProbabilityEstimator;
use super::request::DecisionRequest;
use super::EngineError;
use crate::range::WeightedRange;

/// EV of calling `call_cost` with showdown equity `win_rate`.
pub fn call_ev(win_rate: f64, pot: f64, call_cost: f64) -> f64 {
    win_rate * pot - (1.0 - win_rate) * call_cost
}

/// EV of a raise committing `total` chips when the opponent continues at `call_rate`.
pub fn raise_ev(pot: f64, total: f64, call_rate: f64) -> f64 {
    let if_called = call_rate * (pot + total) - (1.0 - call_rate) * total;
    (1.0 - call_rate) * (pot - total) + call_rate * if_called
}

/// EV of an opening bet of `amount` when the opponent continues at `call_rate`.
pub fn bet_ev(pot: f64, amount: f64, call_rate: f64) -> f64 {
    call_rate * (pot + amount) - (1.0 - call_rate) * amount
}

/// Candidate sizings for a request, in evaluation order.
///
/// Facing a bet, raise amounts are capped by both stacks and the all-in
/// raise (effective stack minus the call) is only offered when positive.
pub fn bet_sizings(request: &DecisionRequest) -> Vec<(BetOption, f64)> {
    let pot = request.pot;
    let effective = request.hero_stack.min(request.opp_stack);

    if request.facing_bet() {
        let bet = request.opp_bet;
        let mut sizings = vec![
            (BetOption::MinRaise, (2.0 * bet).min(effective)),
            (BetOption::HalfPotRaise, ((pot + 2.0 * bet) / 2.0 + bet).min(effective)),
            (BetOption::PotRaise, ((pot + 2.0 * bet) + bet).min(effective)),
        ];
        let all_in = effective - bet;
        if all_in > 0.0 {
            sizings.push((BetOption::AllIn, all_in));
        }
        sizings
    } else {
        vec![
            (BetOption::Small, 0.25 * pot),
            (BetOption::Large, 0.8 * pot),
            (BetOption::Overbet, 1.5 * pot),
            (BetOption::AllIn, effective),
        ]
    }
}

/// Picks the highest-EV candidate, keeping the earliest on ties.
fn best_candidate(candidates: &[ActionCandidate]) -> Option<ActionCandidate> {
    candidates.iter().fold(None, |best: Option<ActionCandidate>, c| match best {
        Some(b) if b.ev >= c.ev => Some(b),
        _ => Some(*c),
    })
}

/// Seeds for one decision, drawn from the master stream in a fixed order.
struct DecisionSeeds {
    equity: u64,
    fold: [u64; 4],
}

impl DecisionSeeds {
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            equity: rng.gen(),
            fold: rng.gen(),
        }
    }
}

/// Evaluates fold, check, call and sized bets for a decision.
///
/// # Example
/// ```
/// use poker_ev::engine::{ActionOptimizer, DecisionRequest, EngineConfig};
///
/// let optimizer = ActionOptimizer::new(EngineConfig::fast().with_seed(1)).unwrap();
/// let request = DecisionRequest::from_notation(
///     "AhAd", "Ks7c2d", 100.0, 100.0, 0.0, 10.0, "KQs,QJs,T9s,22",
/// ).unwrap();
/// let evaluation = optimizer.evaluate(&request).unwrap();
/// assert!(evaluation.win_rate > 0.5);
/// ```
#[derive(Debug)]
pub struct ActionOptimizer {
    config: EngineConfig,
    pool: Option<ThreadPool>,
}

impl ActionOptimizer {
    /// Create an optimizer, building a dedicated thread pool when
    /// `num_threads` is set.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let pool = match config.num_threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads.max(1))
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every action for the request.
    ///
    /// The range is parsed before any sampling, so a malformed range fails
    /// without running a simulation.
    pub fn evaluate(&self, request: &DecisionRequest) -> Result<ActionEvaluation, EngineError> {
        request.validate()?;
        let range = request.parse_range()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seeds = DecisionSeeds::draw(&mut rng);

        let evaluation = match &self.pool {
            Some(pool) => pool.install(|| self.run(request, &range, &seeds)),
            None => self.run(request, &range, &seeds),
        };

        log::info!(
            "{} on [{}]: win rate {:.3}, best action {} (EV {:.2})",
            request.hero,
            request.board,
            evaluation.win_rate,
            evaluation.best_action,
            evaluation.best_ev
        );
        Ok(evaluation)
    }

    fn run(
        &self,
        request: &DecisionRequest,
        range: &WeightedRange,
        seeds: &DecisionSeeds,
    ) -> ActionEvaluation {
        let config = &self.config;
        let hero = request.hero;
        let board = &request.board;
        let pot = request.pot;
        let facing_bet = request.facing_bet();

        let win_rate = EquityEstimator::new(hero, board, range)
            .estimate_parallel(seeds.equity, config.equity_iterations, config.batch_size)
            .value;

        let sizings = bet_sizings(request);
        let candidates: Vec<ActionCandidate> = sizings
            .par_iter()
            .zip(seeds.fold.par_iter())
            .map(|(&(option, bet_amount), &seed)| {
                let committed = if facing_bet {
                    request.opp_bet + bet_amount
                } else {
                    bet_amount
                };
                let mut estimator =
                    FoldProbabilityEstimator::new(hero, board, range, committed, pot);
                if option.is_all_in() {
                    estimator = estimator.with_all_in_bet(bet_amount);
                }
                let fold_rate = estimator
                    .estimate_parallel(seed, config.fold_iterations, config.batch_size)
                    .value;
                let call_rate = 1.0 - fold_rate;
                let ev = if facing_bet {
                    raise_ev(pot, committed, call_rate)
                } else {
                    bet_ev(pot, bet_amount, call_rate)
                };
                ActionCandidate {
                    option,
                    bet_amount,
                    fold_rate,
                    ev,
                }
            })
            .collect();

        let best_bet = best_candidate(&candidates);

        let (baseline, call) = if facing_bet {
            (0.0, Some(call_ev(win_rate, pot, request.opp_bet)))
        } else {
            (win_rate * pot, None)
        };

        let (mut best_action, mut best_ev) = if facing_bet {
            (BestAction::Fold, baseline)
        } else {
            (BestAction::Check, baseline)
        };
        if let Some(ev) = call {
            if ev > best_ev {
                best_action = BestAction::Call;
                best_ev = ev;
            }
        }
        if let Some(bet) = &best_bet {
            if bet.ev > best_ev {
                best_action = BestAction::Bet(bet.option);
                best_ev = bet.ev;
            }
        }

        ActionEvaluation {
            win_rate,
            facing_bet,
            baseline,
            call_ev: call,
            candidates,
            best_bet,
            best_action,
            best_ev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hand: &str, board: &str, stacks: (f64, f64), bet: f64, pot: f64, range: &str) -> DecisionRequest {
        DecisionRequest::from_notation(hand, board, stacks.0, stacks.1, bet, pot, range).unwrap()
    }

    fn optimizer(seed: u64) -> ActionOptimizer {
        ActionOptimizer::new(EngineConfig::fast().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_ev_formulas() {
        assert_eq!(call_ev(0.5, 100.0, 50.0), 25.0);
        assert_eq!(call_ev(0.0, 100.0, 50.0), -50.0);
        // Everyone folds: win the pot minus the commitment
        assert_eq!(raise_ev(100.0, 30.0, 0.0), 70.0);
        // Everyone calls
        assert_eq!(raise_ev(100.0, 30.0, 1.0), 130.0);
        assert_eq!(bet_ev(100.0, 25.0, 1.0), 125.0);
        assert_eq!(bet_ev(100.0, 25.0, 0.0), -25.0);
    }

    #[test]
    fn test_open_sizings() {
        let req = request("AhKd", "", (1000.0, 1000.0), 0.0, 100.0, "AA");
        let sizings = bet_sizings(&req);
        assert_eq!(
            sizings,
            vec![
                (BetOption::Small, 25.0),
                (BetOption::Large, 80.0),
                (BetOption::Overbet, 150.0),
                (BetOption::AllIn, 1000.0),
            ]
        );
    }

    #[test]
    fn test_facing_bet_sizings() {
        let req = request("AhKd", "", (100.0, 80.0), 10.0, 30.0, "AA");
        assert_eq!(
            bet_sizings(&req),
            vec![
                (BetOption::MinRaise, 20.0),
                (BetOption::HalfPotRaise, 35.0),
                (BetOption::PotRaise, 60.0),
                (BetOption::AllIn, 70.0),
            ]
        );
    }

    #[test]
    fn test_short_stack_drops_all_in_raise() {
        let req = request("AhKd", "", (10.0, 80.0), 10.0, 30.0, "AA");
        let sizings = bet_sizings(&req);
        assert_eq!(sizings.len(), 3);
        assert!(sizings.iter().all(|&(option, amount)| !option.is_all_in() && amount == 10.0));
    }

    #[test]
    fn test_open_spot_amounts() {
        let req = request("AhKd", "Qs7c2d", (1000.0, 1000.0), 0.0, 100.0, "QQ,76s,J4o");
        let eval = optimizer(4).evaluate(&req).unwrap();
        assert!(!eval.facing_bet);
        assert!(eval.call_ev.is_none());
        assert_eq!(eval.candidate("all_in").map(|c| c.bet_amount), Some(1000.0));
        assert_eq!(eval.candidate("small").map(|c| c.bet_amount), Some(25.0));
        assert_eq!(eval.candidates.len(), 4);
    }

    #[test]
    fn test_river_lock_facing_bet() {
        // KK beats J4o on every runout and J4o folds to every raise
        let req = request("KsKh", "Ad8h2c7s3d", (1000.0, 1000.0), 10.0, 100.0, "J4o");
        let eval = optimizer(5).evaluate(&req).unwrap();
        assert_eq!(eval.win_rate, 1.0);
        assert_eq!(eval.baseline, 0.0);
        assert_eq!(eval.call_ev, Some(100.0));

        let evs: Vec<f64> = eval.candidates.iter().map(|c| c.ev).collect();
        assert_eq!(evs, vec![70.0, 20.0, -40.0, -900.0]);
        assert_eq!(eval.best_bet.map(|b| b.option), Some(BetOption::MinRaise));
        assert_eq!(eval.best_action, BestAction::Call);
        assert_eq!(eval.best_ev, 100.0);
    }

    #[test]
    fn test_river_lock_checked_to() {
        let req = request("KsKh", "Ad8h2c7s3d", (1000.0, 1000.0), 0.0, 100.0, "J4o");
        let eval = optimizer(6).evaluate(&req).unwrap();
        assert_eq!(eval.baseline, 100.0);
        assert!(eval.candidates.iter().all(|c| c.fold_rate == 1.0));
        assert_eq!(eval.best_bet.map(|b| b.option), Some(BetOption::Small));
        assert_eq!(eval.best_action, BestAction::Check);
        assert_eq!(eval.best_ev, 100.0);
    }

    #[test]
    fn test_hopeless_spot_folds() {
        // 72o against a set that never folds
        let req = request("7h2c", "AsAdAh", (100.0, 100.0), 50.0, 100.0, "KK");
        let eval = optimizer(7).evaluate(&req).unwrap();
        assert!(eval.win_rate < 0.1);
        assert!(eval.call_ev.unwrap_or(0.0) < 0.0);
        assert!(eval.best_ev >= 0.0);
    }

    #[test]
    fn test_seeded_decisions_are_reproducible_across_thread_counts() {
        let req = request("AhKd", "Qs7c2d", (200.0, 150.0), 20.0, 60.0, "QQ,AQs,76s,J4o,KQo:0.5");
        let config = EngineConfig::fast().with_seed(11);
        let single = ActionOptimizer::new(config.clone().with_threads(1)).unwrap();
        let multi = ActionOptimizer::new(config.with_threads(4)).unwrap();
        assert_eq!(single.evaluate(&req).unwrap(), multi.evaluate(&req).unwrap());
    }

    #[test]
    fn test_best_action_dominates_baselines() {
        let req = request("JhTh", "9h8c2h", (300.0, 300.0), 15.0, 40.0, "AA,KK,AKo,98s,QJs,22:0.5");
        let eval = optimizer(8).evaluate(&req).unwrap();
        assert!(eval.best_ev >= eval.baseline);
        assert!(eval.best_ev >= eval.call_ev.unwrap_or(f64::MIN));
        if let Some(best) = eval.best_bet {
            assert!(eval.candidates.iter().all(|c| c.ev <= best.ev));
        }
    }

    #[test]
    fn test_bad_range_fails_before_sampling() {
        let req = request("AhKd", "", (100.0, 100.0), 0.0, 10.0, "ZZ:1");
        assert!(matches!(optimizer(1).evaluate(&req), Err(EngineError::Range(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = ActionOptimizer::new(EngineConfig::default().with_fold_iterations(0)).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_best_candidate_keeps_first_on_ties() {
        let make = |option, ev| ActionCandidate {
            option,
            bet_amount: 1.0,
            fold_rate: 0.0,
            ev,
        };
        let candidates = [
            make(BetOption::Small, 5.0),
            make(BetOption::Large, 7.0),
            make(BetOption::Overbet, 7.0),
        ];
        assert_eq!(best_candidate(&candidates).map(|c| c.option), Some(BetOption::Large));
        assert_eq!(best_candidate(&[]), None);
    }
}
