//! Accumulated knowledge from every feedback seen so far.

use crate::bitset::{bit_index, BitVector};
use crate::feedback::{Feedback, Mark};
use crate::lexicon::Entry;
use crate::word::{LetterCounts, Word};
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// Allowed (position, letter) pairs plus per-letter count bounds.
///
/// Updates only ever clear allowed bits, raise minimums or lower maximums, so
/// the set of consistent words can shrink but never grow.
#[derive(Debug, Clone)]
pub struct ConstraintStore {
    allowed: BitVector,
    min_counts: LetterCounts,
    max_counts: LetterCounts,
}

impl Default for ConstraintStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self {
            allowed: BitVector::full(),
            min_counts: [0; ALPHABET_SIZE],
            max_counts: [WORD_LENGTH as u8; ALPHABET_SIZE],
        }
    }

    /// Fold one guess and its feedback into the store.
    pub fn update(&mut self, guess: &Word, feedback: Feedback) {
        let marks = feedback.marks();

        // Occurrences confirmed by this feedback alone.
        let mut confirmed = [0u8; ALPHABET_SIZE];
        for (position, &mark) in marks.iter().enumerate() {
            if mark != Mark::Miss {
                confirmed[guess.letter(position)] += 1;
            }
        }

        for (position, &mark) in marks.iter().enumerate() {
            let letter = guess.letter(position);
            match mark {
                Mark::Hit => {
                    let keep = self.allowed.get(bit_index(position, letter));
                    self.allowed -= BitVector::position_mask(position);
                    if keep {
                        self.allowed.set(bit_index(position, letter));
                    }
                }
                Mark::Present => {
                    self.allowed.clear(bit_index(position, letter));
                }
                Mark::Miss if confirmed[letter] == 0 => {
                    self.allowed -= BitVector::letter_mask(letter);
                }
                Mark::Miss => {
                    // The letter is confirmed elsewhere in this guess: it is not
                    // here, and the target holds exactly the confirmed copies.
                    self.allowed.clear(bit_index(position, letter));
                    self.max_counts[letter] = self.max_counts[letter].min(confirmed[letter]);
                }
            }
        }

        for (letter, &count) in confirmed.iter().enumerate() {
            self.min_counts[letter] = self.min_counts[letter].max(count);
        }
    }

    /// Whether `word` agrees with everything learned so far.
    pub fn is_consistent(&self, word: &Word) -> bool {
        self.admits(&word.signature(), &word.letter_counts())
    }

    /// Same as `is_consistent`, using the data a lexicon entry already caches.
    #[inline]
    pub fn is_consistent_entry(&self, entry: &Entry) -> bool {
        self.admits(&entry.signature, &entry.counts)
    }

    fn admits(&self, signature: &BitVector, counts: &LetterCounts) -> bool {
        self.allowed.is_superset(signature)
            && counts
                .iter()
                .zip(self.min_counts.iter().zip(self.max_counts.iter()))
                .all(|(&count, (&min, &max))| count >= min && count <= max)
    }

    pub fn is_allowed(&self, position: usize, letter: usize) -> bool {
        self.allowed.get(bit_index(position, letter))
    }

    /// Minimum number of copies of `letter` the target must contain.
    pub fn min_count(&self, letter: usize) -> u8 {
        self.min_counts[letter]
    }

    pub fn max_count(&self, letter: usize) -> u8 {
        self.max_counts[letter]
    }

    /// Letters known to occur in the target.
    pub fn required_letters(&self) -> impl Iterator<Item = usize> + '_ {
        (0..ALPHABET_SIZE).filter(|&letter| self.min_counts[letter] > 0)
    }

    /// Letters no longer allowed at any position.
    pub fn excluded_letters(&self) -> impl Iterator<Item = usize> + '_ {
        (0..ALPHABET_SIZE).filter(|&letter| {
            let mask = BitVector::letter_mask(letter);
            (self.allowed & mask).is_empty()
        })
    }

    /// Number of (position, letter) pairs still allowed.
    pub fn allowed_count(&self) -> u32 {
        self.allowed.count_ones()
    }
}
