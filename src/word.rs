//! Fixed-length lowercase words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bitset::{bit_index, BitVector};
use crate::error::{Result, SolverError};
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// Per-letter occurrence counts, indexed by `letter - b'a'`.
pub type LetterCounts = [u8; ALPHABET_SIZE];

/// A word of exactly `WORD_LENGTH` lowercase ASCII letters.
///
/// Ordering is lexicographic, which is what the ranker's final tie-break uses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    pub fn new(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(SolverError::InvalidWord(text.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(bytes);
        Ok(Self(letters))
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII lowercase.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Alphabet index (`a` = 0) of the letter at `position`.
    #[inline]
    pub fn letter(&self, position: usize) -> usize {
        (self.0[position] - b'a') as usize
    }

    pub fn letter_counts(&self) -> LetterCounts {
        let mut counts = [0u8; ALPHABET_SIZE];
        for position in 0..WORD_LENGTH {
            counts[self.letter(position)] += 1;
        }
        counts
    }

    /// The word's own (position, letter) bits.
    pub fn signature(&self) -> BitVector {
        let mut bits = BitVector::empty();
        for position in 0..WORD_LENGTH {
            bits.set(bit_index(position, self.letter(position)));
        }
        bits
    }
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.as_str())
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Word::new(&text).map_err(serde::de::Error::custom)
    }
}
