//! The shared, read-only word list and its frequency weights.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::bitset::BitVector;
use crate::error::{Result, SolverError};
use crate::feedback::Feedback;
use crate::word::{LetterCounts, Word};
use crate::ALPHABET_SIZE;

/// Dense index of a word inside its lexicon.
pub type WordId = usize;

/// A lexicon word with the data the constraint checks need, cached at load.
#[derive(Debug, Clone)]
pub struct Entry {
    pub word: Word,
    pub frequency: u64,
    pub signature: BitVector,
    pub counts: LetterCounts,
}

impl Entry {
    fn new(word: Word, frequency: u64) -> Self {
        Self {
            signature: word.signature(),
            counts: word.letter_counts(),
            word,
            frequency,
        }
    }
}

/// Feedback for every (guess, target) pair of the lexicon, row-major by guess.
///
/// Memory is `len²` bytes and nothing is ever evicted; worth it when many
/// sessions rank against the same lexicon.
#[derive(Debug)]
pub struct FeedbackTable {
    size: usize,
    patterns: Vec<Feedback>,
}

impl FeedbackTable {
    fn build(entries: &[Entry]) -> Self {
        let size = entries.len();
        let patterns = entries
            .par_iter()
            .flat_map_iter(|guess| {
                entries
                    .iter()
                    .map(move |target| Feedback::compute(&guess.word, &target.word))
            })
            .collect();
        Self { size, patterns }
    }

    #[inline]
    fn get(&self, guess: WordId, target: WordId) -> Feedback {
        self.patterns[guess * self.size + target]
    }
}

#[derive(Debug, Default)]
pub struct Lexicon {
    entries: Vec<Entry>,
    index: HashMap<Word, WordId>,
    table: OnceLock<FeedbackTable>,
}

impl Lexicon {
    /// Build from `(word, frequency)` pairs. Later duplicates are dropped.
    pub fn from_entries<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (Word, u64)>,
    {
        let mut lexicon = Self::default();
        for (word, frequency) in records {
            lexicon.push(word, frequency);
        }
        lexicon
    }

    /// Build from bare words, each with frequency 1.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = words
            .into_iter()
            .map(|text| Word::new(text.as_ref()).map(|word| (word, 1)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_entries(records))
    }

    /// Parse newline-delimited records: `word` or `word<TAB>frequency`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lexicon = Self::default();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }
            let format_error = |reason: String| SolverError::LexiconFormat {
                line: number + 1,
                reason,
            };
            let (text, frequency) = match line.split_once('\t') {
                Some((text, frequency)) => {
                    let frequency = frequency.trim().parse::<u64>().map_err(|_| {
                        format_error(format!("bad frequency {:?}", frequency.trim()))
                    })?;
                    (text, frequency)
                }
                None => (line, 1),
            };
            let word = Word::new(text.trim()).map_err(|err| format_error(err.to_string()))?;
            if !lexicon.push(word, frequency) {
                warn!(word = %word, line = number + 1, "duplicate lexicon entry ignored");
            }
        }
        Ok(lexicon)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let lexicon = Self::parse(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), words = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    fn push(&mut self, word: Word, frequency: u64) -> bool {
        if self.index.contains_key(&word) {
            return false;
        }
        self.index.insert(word, self.entries.len());
        self.entries.push(Entry::new(word, frequency));
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: WordId) -> &Entry {
        &self.entries[id]
    }

    pub fn word(&self, id: WordId) -> Word {
        self.entries[id].word
    }

    pub fn frequency(&self, id: WordId) -> u64 {
        self.entries[id].frequency
    }

    pub fn id_of(&self, word: &Word) -> Option<WordId> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    pub fn ids(&self) -> impl Iterator<Item = WordId> {
        0..self.entries.len()
    }

    /// The most frequent of `ids`; ties go to the lexicographically smallest word.
    pub fn most_frequent(&self, ids: &[WordId]) -> Option<WordId> {
        ids.iter().copied().min_by(|&a, &b| {
            self.frequency(b)
                .cmp(&self.frequency(a))
                .then_with(|| self.word(a).cmp(&self.word(b)))
        })
    }

    /// Number of occurrences of each letter across `ids`.
    pub fn letter_frequencies(&self, ids: &[WordId]) -> [u64; ALPHABET_SIZE] {
        let mut totals = [0u64; ALPHABET_SIZE];
        for &id in ids {
            for (total, &count) in totals.iter_mut().zip(self.entries[id].counts.iter()) {
                *total += u64::from(count);
            }
        }
        totals
    }

    pub fn ids_with_min_frequency(&self, floor: u64) -> Vec<WordId> {
        self.ids().filter(|&id| self.frequency(id) >= floor).collect()
    }

    /// The `n` most frequent words, most frequent first.
    pub fn top_by_frequency(&self, n: usize) -> Vec<WordId> {
        let mut ids: Vec<WordId> = self.ids().collect();
        ids.sort_by(|&a, &b| {
            self.frequency(b)
                .cmp(&self.frequency(a))
                .then_with(|| self.word(a).cmp(&self.word(b)))
        });
        ids.truncate(n);
        ids
    }

    /// Build the dense feedback table so later lookups skip recomputation.
    pub fn precompute_feedback(&self) {
        self.table.get_or_init(|| {
            info!(words = self.len(), "precomputing feedback table");
            FeedbackTable::build(&self.entries)
        });
    }

    pub fn has_feedback_table(&self) -> bool {
        self.table.get().is_some()
    }

    /// Feedback of `guess` against `target`, from the table when it exists.
    #[inline]
    pub fn feedback(&self, guess: WordId, target: WordId) -> Feedback {
        match self.table.get() {
            Some(table) => table.get(guess, target),
            None => Feedback::compute(&self.entries[guess].word, &self.entries[target].word),
        }
    }

    /// Read a newline-delimited target list; every target must be a lexicon word.
    pub fn read_targets(&self, path: impl AsRef<Path>) -> Result<Vec<Word>> {
        self.parse_targets(&fs::read_to_string(path)?)
    }

    pub fn parse_targets(&self, text: &str) -> Result<Vec<Word>> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let word = Word::new(line)?;
                if !self.contains(&word) {
                    return Err(SolverError::Configuration(format!(
                        "target '{word}' is not in the lexicon"
                    )));
                }
                Ok(word)
            })
            .collect()
    }
}
