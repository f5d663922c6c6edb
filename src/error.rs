//! Error type shared by every component of the engine.

use thiserror::Error;

use crate::WORD_LENGTH;

/// Everything that can go wrong while loading a lexicon or playing a puzzle.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The text is not exactly `WORD_LENGTH` lowercase ASCII letters.
    #[error("'{0}' is not a {WORD_LENGTH}-letter lowercase word")]
    InvalidWord(String),

    /// The guess is a well-formed word but not a member of the lexicon.
    /// The turn counter is left untouched, so the caller may retry.
    #[error("'{0}' is not in the lexicon")]
    InvalidGuess(String),

    #[error("invalid feedback symbol {symbol:?} at position {position}")]
    InvalidFeedbackSymbol { symbol: char, position: usize },

    #[error("feedback must have {WORD_LENGTH} marks, got {0}")]
    InvalidFeedbackLength(usize),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// No lexicon word agrees with the feedback observed so far. Either the
    /// oracle is broken or the externally supplied feedback is inconsistent.
    #[error("no lexicon words are consistent with the feedback so far")]
    NoConsistentCandidates,

    #[error("the session is already over")]
    SessionOver,

    #[error("lexicon line {line}: {reason}")]
    LexiconFormat { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
