//! Feedback calculation for guesses.
//!
//! This module computes the mark sequence (hit/present/miss) for a guess
//! against a target word, and converts it to and from the interop string form.

use std::fmt;

use crate::error::{Result, SolverError};
use crate::word::Word;
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// The mark for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Correct letter in correct position
    Hit,
    /// Letter occurs in the target, but not here
    Present,
    /// Letter absent, or all of its occurrences already accounted for
    Miss,
}

impl Mark {
    /// Placeholder written for a miss.
    pub const MISS_SYMBOL: char = '·';

    pub fn to_char(self) -> char {
        match self {
            Mark::Hit => 'g',
            Mark::Present => 'y',
            Mark::Miss => Self::MISS_SYMBOL,
        }
    }

    /// Parse one symbol, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Mark::Hit),
            'y' => Some(Mark::Present),
            Self::MISS_SYMBOL => Some(Mark::Miss),
            _ => None,
        }
    }

    fn digit(self) -> u8 {
        match self {
            Mark::Miss => 0,
            Mark::Present => 1,
            Mark::Hit => 2,
        }
    }
}

/// A complete feedback for one guess.
/// Encoded as a single u8 value (0-242): each position contributes
/// 0 (miss), 1 (present) or 2 (hit), i.e. `m0 + 3*m1 + 9*m2 + 27*m3 + 81*m4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Feedback(u8);

impl Feedback {
    /// The all-hit feedback
    pub const ALL_HIT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81);

    /// Number of distinct feedback values (3^5)
    pub const NUM_PATTERNS: usize = 243;

    pub fn new(marks: [Mark; WORD_LENGTH]) -> Self {
        let mut code: u8 = 0;
        let mut multiplier: u8 = 1;
        for mark in marks {
            code += mark.digit() * multiplier;
            multiplier *= 3;
        }
        Self(code)
    }

    /// Rebuild from `code()`; `None` when the code is out of range.
    pub fn from_code(code: u8) -> Option<Self> {
        ((code as usize) < Self::NUM_PATTERNS).then_some(Self(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Compute the feedback for `guess` against `target`.
    ///
    /// Hits are settled first and consume their letter from the target's
    /// multiset, so a repeated guess letter only earns `Present` while
    /// unmatched copies remain in the target.
    pub fn compute(guess: &Word, target: &Word) -> Self {
        let mut marks = [Mark::Miss; WORD_LENGTH];
        let mut remaining = [0u8; ALPHABET_SIZE];

        for (position, mark) in marks.iter_mut().enumerate() {
            if guess.letter(position) == target.letter(position) {
                *mark = Mark::Hit;
            } else {
                remaining[target.letter(position)] += 1;
            }
        }

        for (position, mark) in marks.iter_mut().enumerate() {
            if *mark != Mark::Hit {
                let letter = guess.letter(position);
                if remaining[letter] > 0 {
                    *mark = Mark::Present;
                    remaining[letter] -= 1;
                }
            }
        }

        Self::new(marks)
    }

    pub fn marks(self) -> [Mark; WORD_LENGTH] {
        let mut code = self.0;
        let mut marks = [Mark::Miss; WORD_LENGTH];
        for mark in marks.iter_mut() {
            *mark = match code % 3 {
                0 => Mark::Miss,
                1 => Mark::Present,
                _ => Mark::Hit,
            };
            code /= 3;
        }
        marks
    }

    pub fn is_win(self) -> bool {
        self == Self::ALL_HIT
    }

    /// Parse the interop encoding, e.g. `"gy·g·"`.
    pub fn parse(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s.trim().chars().collect();
        if symbols.len() != WORD_LENGTH {
            return Err(SolverError::InvalidFeedbackLength(symbols.len()));
        }
        let mut marks = [Mark::Miss; WORD_LENGTH];
        for (position, (&symbol, mark)) in symbols.iter().zip(marks.iter_mut()).enumerate() {
            *mark = Mark::from_char(symbol)
                .ok_or(SolverError::InvalidFeedbackSymbol { symbol, position })?;
        }
        Ok(Self::new(marks))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.marks() {
            write!(f, "{}", mark.to_char())?;
        }
        Ok(())
    }
}
