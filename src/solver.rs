//! Solver state shared by target-driven sessions and the feedback assistant.
//!
//! A `Solver` owns the constraint store, the candidate set narrowed from it and
//! the guesses played so far. It never sees the target: feedback always comes
//! from the outside, either from a `Session` running the oracle or from a human
//! relaying what the puzzle reported.

use std::sync::Arc;

use tracing::debug;

use crate::candidates::CandidateSet;
use crate::config::SolverConfig;
use crate::constraints::ConstraintStore;
use crate::error::{Result, SolverError};
use crate::feedback::Feedback;
use crate::lexicon::{Lexicon, WordId};
use crate::ranker::{EntropyRanker, GuessAnalysis};
use crate::strategy::{GuessContext, GuessStrategy};
use crate::word::Word;

#[derive(Debug, Clone)]
pub struct Solver {
    lexicon: Arc<Lexicon>,
    strategy: GuessStrategy,
    initial: CandidateSet,
    store: ConstraintStore,
    candidates: CandidateSet,
    guessed: Vec<WordId>,
}

impl Solver {
    pub fn new(lexicon: Arc<Lexicon>, config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        let strategy = config.build_strategy(&lexicon)?;
        let initial = config.initial_candidates(&lexicon);
        if config.precompute_feedback {
            lexicon.precompute_feedback();
        }
        Ok(Self::with_strategy(lexicon, strategy, initial))
    }

    pub fn with_strategy(lexicon: Arc<Lexicon>, strategy: GuessStrategy, initial: CandidateSet) -> Self {
        Self {
            lexicon,
            strategy,
            candidates: initial.clone(),
            initial,
            store: ConstraintStore::new(),
            guessed: Vec::new(),
        }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn strategy(&self) -> &GuessStrategy {
        &self.strategy
    }

    pub fn store(&self) -> &ConstraintStore {
        &self.store
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn remaining_count(&self) -> usize {
        self.candidates.len()
    }

    /// Remaining candidates as words, most frequent first.
    pub fn remaining_words(&self) -> Vec<Word> {
        let mut ids = self.candidates.ids().to_vec();
        ids.sort_by(|&a, &b| {
            self.lexicon
                .frequency(b)
                .cmp(&self.lexicon.frequency(a))
                .then_with(|| self.lexicon.word(a).cmp(&self.lexicon.word(b)))
        });
        ids.into_iter().map(|id| self.lexicon.word(id)).collect()
    }

    pub fn guessed(&self) -> &[WordId] {
        &self.guessed
    }

    pub fn is_candidate(&self, word: &Word) -> bool {
        self.lexicon
            .id_of(word)
            .is_some_and(|id| self.candidates.contains(id))
    }

    fn context(&self) -> GuessContext<'_> {
        GuessContext {
            lexicon: &self.lexicon,
            candidates: &self.candidates,
            store: &self.store,
            guessed: &self.guessed,
        }
    }

    /// The strategy's next guess.
    pub fn suggest(&self) -> Result<Word> {
        let id = self.strategy.choose(&self.context())?;
        Ok(self.lexicon.word(id))
    }

    /// The `n` highest-entropy guesses. Candidates only, or the whole unplayed
    /// lexicon when `probe` is set.
    pub fn top_guesses(&self, n: usize, probe: bool) -> Vec<GuessAnalysis> {
        let candidates = self.candidates.ids();
        let pool = if probe {
            self.context().unplayed()
        } else {
            candidates.to_vec()
        };
        EntropyRanker::default().rank(&self.lexicon, candidates, &pool, n)
    }

    /// Look up `guess` in the lexicon without changing any state.
    pub fn resolve(&self, guess: &Word) -> Result<WordId> {
        self.lexicon
            .id_of(guess)
            .ok_or_else(|| SolverError::InvalidGuess(guess.to_string()))
    }

    /// Apply feedback for `guess` and return the number of candidates left.
    ///
    /// Fails with `NoConsistentCandidates` when non-winning feedback leaves
    /// nothing; the narrowed (empty) state is kept so it can be inspected.
    pub fn observe(&mut self, guess: &Word, feedback: Feedback) -> Result<usize> {
        let id = self.resolve(guess)?;
        let before = self.candidates.len();

        self.store.update(guess, feedback);
        self.candidates.refilter(&self.lexicon, &self.store, id);
        self.guessed.push(id);

        debug!(
            guess = %guess,
            feedback = %feedback,
            before,
            after = self.candidates.len(),
            "applied feedback"
        );

        if self.candidates.is_empty() && !feedback.is_win() {
            return Err(SolverError::NoConsistentCandidates);
        }
        Ok(self.candidates.len())
    }

    pub fn reset(&mut self) {
        self.store = ConstraintStore::new();
        self.candidates = self.initial.clone();
        self.guessed.clear();
    }
}
