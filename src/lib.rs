//! # Wordle Engine
//!
//! A constraint-based solver for fixed-length word-guessing puzzles.
//!
//! Each guess is scored by the feedback oracle, the feedback narrows a
//! bit-vector constraint store, the store filters the candidate set, and the
//! next guess is picked by one of several strategies, the strongest of which
//! maximizes the expected information gain (entropy) of the feedback.

pub mod batch;
pub mod bitset;
pub mod candidates;
pub mod config;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod lexicon;
pub mod ranker;
pub mod session;
pub mod solver;
pub mod strategy;
pub mod word;

pub use batch::{rank_openers, run_batch, sweep_openers, BatchReport, BatchStats};
pub use candidates::CandidateSet;
pub use config::{SolverConfig, StrategyKind};
pub use constraints::ConstraintStore;
pub use error::{Result, SolverError};
pub use feedback::{Feedback, Mark};
pub use lexicon::{Lexicon, WordId};
pub use ranker::{EntropyRanker, GuessAnalysis};
pub use session::{Session, SessionResult, SessionState, Turn};
pub use solver::Solver;
pub use strategy::{GuessContext, GuessStrategy};
pub use word::Word;

/// Letters per word
pub const WORD_LENGTH: usize = 5;

/// Size of the lowercase alphabet words are drawn from
pub const ALPHABET_SIZE: usize = 26;
