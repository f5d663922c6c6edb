//! Guess strategies a solving session can be configured with.

use std::fmt;

use crate::candidates::CandidateSet;
use crate::constraints::ConstraintStore;
use crate::error::{Result, SolverError};
use crate::lexicon::{Lexicon, WordId};
use crate::ranker::EntropyRanker;
use crate::word::Word;
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// What a strategy may look at when choosing the next guess.
#[derive(Debug, Clone, Copy)]
pub struct GuessContext<'a> {
    pub lexicon: &'a Lexicon,
    pub candidates: &'a CandidateSet,
    pub store: &'a ConstraintStore,
    /// Words already played, in order.
    pub guessed: &'a [WordId],
}

impl GuessContext<'_> {
    /// 1-based number of the turn about to be played.
    pub fn turn(&self) -> usize {
        self.guessed.len() + 1
    }

    /// Every lexicon word not yet played.
    pub fn unplayed(&self) -> Vec<WordId> {
        self.lexicon
            .ids()
            .filter(|id| !self.guessed.contains(id))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum GuessStrategy {
    /// Play the most frequent remaining candidate.
    MostFrequentRemaining,
    /// Play the candidate covering the most letters that still split the
    /// candidates and are not yet known to be in the target.
    FrequencyReduction,
    /// Play the word with the highest expected information gain. With
    /// `probe`, words that cannot be the answer are considered too.
    EntropyMaximizing { ranker: EntropyRanker, probe: bool },
    /// Play fixed openers on the first turns, then defer to `then`.
    Scripted {
        openers: Vec<WordId>,
        then: Box<GuessStrategy>,
    },
}

impl GuessStrategy {
    pub fn entropy(fallback_threshold: usize, probe: bool) -> Self {
        Self::EntropyMaximizing {
            ranker: EntropyRanker::new(fallback_threshold),
            probe,
        }
    }

    /// Wrap `self` behind scripted opening words, which must be lexicon members.
    pub fn with_openers(self, lexicon: &Lexicon, openers: &[Word]) -> Result<Self> {
        if openers.is_empty() {
            return Ok(self);
        }
        let openers = openers
            .iter()
            .map(|word| {
                lexicon.id_of(word).ok_or_else(|| {
                    SolverError::Configuration(format!("opener '{word}' is not in the lexicon"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::Scripted {
            openers,
            then: Box::new(self),
        })
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn choose(&self, context: &GuessContext<'_>) -> Result<WordId> {
        let candidates = context.candidates.ids();
        if candidates.is_empty() {
            return Err(SolverError::NoConsistentCandidates);
        }

        match self {
            GuessStrategy::MostFrequentRemaining => context
                .lexicon
                .most_frequent(candidates)
                .ok_or(SolverError::NoConsistentCandidates),
            GuessStrategy::FrequencyReduction => reduction_choice(context),
            GuessStrategy::EntropyMaximizing { ranker, probe } => {
                if *probe {
                    ranker.select(context.lexicon, candidates, &context.unplayed())
                } else {
                    ranker.select(context.lexicon, candidates, candidates)
                }
            }
            GuessStrategy::Scripted { openers, then } => {
                if let [only] = candidates {
                    return Ok(*only);
                }
                match openers.get(context.guessed.len()) {
                    Some(&opener) => Ok(opener),
                    None => then.choose(context),
                }
            }
        }
    }
}

impl fmt::Display for GuessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessStrategy::MostFrequentRemaining => f.write_str("most-frequent"),
            GuessStrategy::FrequencyReduction => f.write_str("frequency-reduction"),
            GuessStrategy::EntropyMaximizing { probe: false, .. } => f.write_str("entropy"),
            GuessStrategy::EntropyMaximizing { probe: true, .. } => f.write_str("entropy-probe"),
            GuessStrategy::Scripted { openers, then } => {
                write!(f, "scripted({})+{}", openers.len(), then)
            }
        }
    }
}

fn reduction_choice(context: &GuessContext<'_>) -> Result<WordId> {
    let lexicon = context.lexicon;
    let candidates = context.candidates.ids();

    let totals = lexicon.letter_frequencies(candidates);
    let mut useful = [false; ALPHABET_SIZE];
    for (letter, flag) in useful.iter_mut().enumerate() {
        *flag = totals[letter] > 0;
    }
    for letter in context.store.required_letters() {
        useful[letter] = false;
    }

    let score = |id: WordId| {
        let mut seen = [false; ALPHABET_SIZE];
        let word = lexicon.word(id);
        (0..WORD_LENGTH)
            .map(|position| word.letter(position))
            .filter(|&letter| useful[letter] && !std::mem::replace(&mut seen[letter], true))
            .count()
    };

    candidates
        .iter()
        .copied()
        .map(|id| (score(id), id))
        .min_by(|&(score_a, a), &(score_b, b)| {
            score_b
                .cmp(&score_a)
                .then_with(|| lexicon.frequency(b).cmp(&lexicon.frequency(a)))
                .then_with(|| lexicon.word(a).cmp(&lexicon.word(b)))
        })
        .map(|(_, id)| id)
        .ok_or(SolverError::NoConsistentCandidates)
}
