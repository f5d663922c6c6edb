//! One puzzle played against a hidden target.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::error::{Result, SolverError};
use crate::feedback::Feedback;
use crate::lexicon::{Lexicon, WordId};
use crate::solver::Solver;
use crate::strategy::GuessStrategy;
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Playing,
    Solved,
    Exhausted,
}

/// One played turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub guess: Word,
    pub feedback: Feedback,
    pub candidates_remaining: usize,
}

/// Summary written once a session ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub target: Word,
    pub solver_name: String,
    pub guesses: Vec<Word>,
    pub number_guesses: usize,
    /// Solved within the turn budget.
    pub won: bool,
    /// The target was guessed at all.
    pub found: bool,
    /// The session stopped because no lexicon word fit the feedback.
    pub no_solution: bool,
    pub candidates_remaining: usize,
    pub elapsed_time: f64,
}

#[derive(Debug, Clone)]
pub struct Session {
    solver: Solver,
    target: Word,
    target_id: WordId,
    max_turns: usize,
    state: SessionState,
    history: Vec<Turn>,
    no_solution: bool,
    solver_name: String,
    started: Instant,
}

impl Session {
    pub fn new(lexicon: Arc<Lexicon>, target: &Word, config: &SolverConfig) -> Result<Self> {
        let solver = Solver::new(lexicon, config)?;
        Self::from_solver(solver, target, config.max_turns)
    }

    /// Play `target` with an explicit strategy over the configured candidates.
    pub fn with_strategy(
        lexicon: Arc<Lexicon>,
        target: &Word,
        strategy: GuessStrategy,
        config: &SolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        let initial = config.initial_candidates(&lexicon);
        let solver = Solver::with_strategy(lexicon, strategy, initial);
        Self::from_solver(solver, target, config.max_turns)
    }

    fn from_solver(solver: Solver, target: &Word, max_turns: usize) -> Result<Self> {
        let target_id = solver.lexicon().id_of(target).ok_or_else(|| {
            SolverError::Configuration(format!("target '{target}' is not in the lexicon"))
        })?;
        if !solver.candidates().contains(target_id) {
            warn!(target = %target, "target is outside the initial candidate pool");
        }
        let solver_name = solver.strategy().name();
        Ok(Self {
            solver,
            target: *target,
            target_id,
            max_turns,
            state: SessionState::Playing,
            history: Vec::new(),
            no_solution: false,
            solver_name,
            started: Instant::now(),
        })
    }

    /// Report results under `name` instead of the strategy's own name.
    pub fn with_solver_name(mut self, name: impl Into<String>) -> Self {
        self.solver_name = name.into();
        self
    }

    pub fn target(&self) -> Word {
        self.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != SessionState::Playing
    }

    /// 1-based number of the next turn to be played.
    pub fn turn(&self) -> usize {
        self.history.len() + 1
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub fn suggest(&self) -> Result<Word> {
        if self.is_over() {
            return Err(SolverError::SessionOver);
        }
        self.solver.suggest()
    }

    /// Play `guess` and return its feedback.
    ///
    /// A guess outside the lexicon is rejected before anything changes, so the
    /// turn is not consumed.
    pub fn play(&mut self, guess: &Word) -> Result<Feedback> {
        if self.is_over() {
            return Err(SolverError::SessionOver);
        }
        let guess_id = self.solver.resolve(guess)?;
        let feedback = self.solver.lexicon().feedback(guess_id, self.target_id);

        let observed = self.solver.observe(guess, feedback);
        self.history.push(Turn {
            guess: *guess,
            feedback,
            candidates_remaining: self.solver.remaining_count(),
        });
        debug!(
            turn = self.history.len(),
            guess = %guess,
            feedback = %feedback,
            remaining = self.solver.remaining_count(),
            "played turn"
        );

        if feedback.is_win() {
            self.state = SessionState::Solved;
        } else if self.history.len() >= self.max_turns {
            self.state = SessionState::Exhausted;
        }

        match observed {
            Err(SolverError::NoConsistentCandidates) => {
                // Reported even on the last turn so the record stays distinct from a loss.
                self.state = SessionState::Exhausted;
                self.no_solution = true;
                Err(SolverError::NoConsistentCandidates)
            }
            Err(err) => Err(err),
            Ok(_) => Ok(feedback),
        }
    }

    /// Ask the strategy for a guess and play it.
    pub fn step(&mut self) -> Result<Turn> {
        let guess = self.suggest()?;
        self.play(&guess)?;
        self.history
            .last()
            .copied()
            .ok_or(SolverError::SessionOver)
    }

    /// Play until solved or out of turns.
    pub fn run(&mut self) -> Result<SessionResult> {
        while !self.is_over() {
            self.step()?;
        }
        Ok(self.result())
    }

    pub fn result(&self) -> SessionResult {
        let found = self.state == SessionState::Solved;
        SessionResult {
            target: self.target,
            solver_name: self.solver_name.clone(),
            guesses: self.history.iter().map(|turn| turn.guess).collect(),
            number_guesses: self.history.len(),
            won: found && self.history.len() <= self.max_turns,
            found,
            no_solution: self.no_solution,
            candidates_remaining: self.solver.remaining_count(),
            elapsed_time: self.started.elapsed().as_secs_f64(),
        }
    }
}
