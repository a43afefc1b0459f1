//! Command-line EV calculator.
//!
//! Evaluates a single spot from flags, or a JSON array of decision requests
//! with `--batch`.
//!
//! ```text
//! ev_calc --hand AhKd --board 7s8s9s --hero-stack 100 --opp-stack 80 \
//!         --bet 10 --pot 30 --range "AA:1,AKs:0.5,T9s:1"
//! ev_calc --batch spots.json --output results.json --seed 7
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use poker_ev::{ActionEvaluation, ActionOptimizer, DecisionRequest, EngineConfig};

#[derive(Parser)]
#[command(name = "ev_calc")]
#[command(about = "Estimate the EV of fold, check, call and bet options against a range")]
struct Cli {
    /// Hero hand, e.g. AhKd
    #[arg(long, required_unless_present = "batch")]
    hand: Option<String>,
    /// Board cards, e.g. 7s8s9s (omit for preflop)
    #[arg(long, default_value = "")]
    board: String,
    /// Hero stack behind
    #[arg(long, required_unless_present = "batch")]
    hero_stack: Option<f64>,
    /// Opponent stack behind
    #[arg(long, required_unless_present = "batch")]
    opp_stack: Option<f64>,
    /// Opponent bet (0 when checked to)
    #[arg(long, default_value = "0")]
    bet: f64,
    /// Pot before the opponent bet
    #[arg(long, required_unless_present = "batch")]
    pot: Option<f64>,
    /// Opponent range, e.g. "AA:1,AKs:0.5"
    #[arg(long, conflicts_with = "range_file")]
    range: Option<String>,
    /// File holding the opponent range text
    #[arg(long)]
    range_file: Option<PathBuf>,
    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Equity iterations (overrides the config)
    #[arg(short, long)]
    iterations: Option<usize>,
    /// Random seed for reproducible results
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads (1 for single-threaded)
    #[arg(short, long)]
    threads: Option<usize>,
    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,
    /// JSON array of decision requests to evaluate
    #[arg(long)]
    batch: Option<PathBuf>,
    /// Output file for batch results (defaults to stdout)
    #[arg(short, long, requires = "batch")]
    output: Option<PathBuf>,
}

/// One entry of a batch run.
#[derive(Serialize)]
struct BatchResult {
    request: DecisionRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<ActionEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let optimizer = ActionOptimizer::new(load_config(&cli)?)?;

    match &cli.batch {
        Some(path) => run_batch(&optimizer, path, cli.output.as_ref()),
        None => run_single(&optimizer, &cli),
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = EngineConfig::from_json_file(path)?;
            log::info!("Loaded config from: {}", path.display());
            config
        }
        None => EngineConfig::default(),
    };
    if let Some(iterations) = cli.iterations {
        config = config.with_equity_iterations(iterations);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    config.validate()?;
    Ok(config)
}

fn range_text(cli: &Cli) -> Result<String, Box<dyn Error>> {
    match (&cli.range, &cli.range_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read range file {}: {}", path.display(), e))?;
            Ok(text.trim().to_string())
        }
        (None, None) => Err("one of --range or --range-file is required".into()),
    }
}

fn run_single(optimizer: &ActionOptimizer, cli: &Cli) -> Result<(), Box<dyn Error>> {
    let missing = |name: &str| format!("--{} is required", name);
    let request = DecisionRequest::from_notation(
        cli.hand.as_deref().ok_or_else(|| missing("hand"))?,
        &cli.board,
        cli.hero_stack.ok_or_else(|| missing("hero-stack"))?,
        cli.opp_stack.ok_or_else(|| missing("opp-stack"))?,
        cli.bet,
        cli.pot.ok_or_else(|| missing("pot"))?,
        &range_text(cli)?,
    )?;

    let evaluation = optimizer.evaluate(&request)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        println!("{}", evaluation);
    }
    Ok(())
}

fn run_batch(
    optimizer: &ActionOptimizer,
    path: &Path,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read batch file {}: {}", path.display(), e))?;
    let requests: Vec<DecisionRequest> = serde_json::from_str(&content)?;
    log::info!("Evaluating {} spots from {}", requests.len(), path.display());

    let pb = ProgressBar::new(requests.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut failures = 0usize;
    let results: Vec<BatchResult> = requests
        .into_iter()
        .map(|request| {
            let result = match optimizer.evaluate(&request) {
                Ok(evaluation) => BatchResult {
                    request,
                    evaluation: Some(evaluation),
                    error: None,
                },
                Err(e) => {
                    failures += 1;
                    log::warn!("{} on [{}]: {}", request.hero, request.board, e);
                    BatchResult {
                        request,
                        evaluation: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let json = serde_json::to_string_pretty(&results)?;
    match output {
        Some(out) => {
            fs::write(out, json)?;
            log::info!("Results written to: {}", out.display());
        }
        None => println!("{}", json),
    }
    if failures > 0 {
        log::warn!("{} of {} spots failed", failures, results.len());
    }
    Ok(())
}
