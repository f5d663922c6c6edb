//! Solving many independent puzzles and summarizing the outcome.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SolverConfig;
use crate::error::{Result, SolverError};
use crate::lexicon::Lexicon;
use crate::ranker::GuessAnalysis;
use crate::session::{Session, SessionResult};
use crate::solver::Solver;
use crate::strategy::GuessStrategy;
use crate::word::Word;

#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub number_played: usize,
    pub number_solved: usize,
    pub percent_solved: f64,
    pub failure_rate: f64,
    pub number_no_solutions: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub elapsed_time: f64,
}

impl BatchStats {
    pub fn from_results(results: &[SessionResult], elapsed_time: f64) -> Self {
        let number_played = results.len();
        let number_solved = results.iter().filter(|result| result.won).count();
        let number_no_solutions = results.iter().filter(|result| result.no_solution).count();
        let percent_solved = if number_played > 0 {
            number_solved as f64 / number_played as f64
        } else {
            0.0
        };
        let counts = results.iter().map(|result| result.number_guesses);
        let total: usize = counts.clone().sum();

        Self {
            number_played,
            number_solved,
            percent_solved,
            failure_rate: 1.0 - percent_solved,
            number_no_solutions,
            average_guesses: if number_played > 0 {
                total as f64 / number_played as f64
            } else {
                0.0
            },
            min_guesses: counts.clone().min().unwrap_or(0),
            max_guesses: counts.max().unwrap_or(0),
            elapsed_time,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(flatten)]
    pub stats: BatchStats,
    pub solutions: Vec<SessionResult>,
}

/// Solve every target in parallel, each in a private session.
///
/// When the strategy would open with an entropy search, that first guess is
/// the same for every target, so it is computed once and scripted.
pub fn run_batch(lexicon: Arc<Lexicon>, targets: &[Word], config: &SolverConfig) -> Result<BatchReport> {
    let start = Instant::now();
    let (strategy, solver_name) = shared_strategy(&lexicon, config)?;
    info!(targets = targets.len(), strategy = %solver_name, "starting batch");

    let results = targets
        .par_iter()
        .map(|target| {
            let mut session =
                Session::with_strategy(Arc::clone(&lexicon), target, strategy.clone(), config)?
                    .with_solver_name(solver_name.as_str());
            match session.run() {
                Ok(result) => Ok(result),
                Err(SolverError::NoConsistentCandidates) => {
                    warn!(target = %target, "ran out of consistent candidates");
                    Ok(session.result())
                }
                Err(err) => Err(err),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let stats = BatchStats::from_results(&results, start.elapsed().as_secs_f64());
    info!(
        played = stats.number_played,
        solved = stats.number_solved,
        average = stats.average_guesses,
        "finished batch"
    );
    Ok(BatchReport {
        stats,
        solutions: results,
    })
}

/// The strategy every session of the batch plays, and the name its results carry.
///
/// The shared entropy opener is scripted, but results keep the configured name.
fn shared_strategy(lexicon: &Arc<Lexicon>, config: &SolverConfig) -> Result<(GuessStrategy, String)> {
    let solver = Solver::new(Arc::clone(lexicon), config)?;
    let strategy = solver.strategy().clone();
    let name = strategy.name();
    if !config.openers.is_empty() || !matches!(strategy, GuessStrategy::EntropyMaximizing { .. }) {
        return Ok((strategy, name));
    }
    match solver.suggest() {
        Ok(opener) => Ok((strategy.with_openers(lexicon, &[opener])?, name)),
        // An empty pool fails every session on its own.
        Err(SolverError::NoConsistentCandidates) => Ok((strategy, name)),
        Err(err) => Err(err),
    }
}

/// The `n` best first guesses under `config`'s initial candidates.
pub fn rank_openers(lexicon: Arc<Lexicon>, config: &SolverConfig, n: usize) -> Result<Vec<GuessAnalysis>> {
    let solver = Solver::new(lexicon, config)?;
    Ok(solver.top_guesses(n, config.probe))
}

/// Solve every target once per candidate opener and summarize each run.
///
/// Each opener replaces any openers `config` already scripts.
pub fn sweep_openers(
    lexicon: Arc<Lexicon>,
    targets: &[Word],
    openers: &[Word],
    config: &SolverConfig,
) -> Result<Vec<(Word, BatchStats)>> {
    info!(openers = openers.len(), targets = targets.len(), "starting opener sweep");
    openers
        .iter()
        .map(|&opener| {
            let config = SolverConfig {
                openers: vec![opener],
                ..config.clone()
            };
            let report = run_batch(Arc::clone(&lexicon), targets, &config)?;
            info!(
                opener = %opener,
                failure_rate = report.stats.failure_rate,
                average = report.stats.average_guesses,
                "swept opener"
            );
            Ok((opener, report.stats))
        })
        .collect()
}
