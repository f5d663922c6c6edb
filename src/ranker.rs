//! Entropy-based guess ranking.
//!
//! For every word in the guess pool, the candidates are partitioned by the
//! feedback that word would receive if each candidate were the target. The
//! Shannon entropy of the partition sizes is the expected information gain of
//! playing that word; the ranker picks the word that maximizes it.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::{Result, SolverError};
use crate::feedback::Feedback;
use crate::lexicon::{Lexicon, WordId};
use crate::word::Word;

/// Result of analyzing a potential guess
#[derive(Debug, Clone)]
pub struct GuessAnalysis {
    pub id: WordId,
    pub word: Word,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_candidate: bool,
    pub frequency: u64,
}

impl GuessAnalysis {
    /// Higher entropy first, then higher frequency, then the smaller word.
    pub fn rank_order(&self, other: &Self) -> Ordering {
        other
            .entropy
            .total_cmp(&self.entropy)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Entropy in bits of a partition with the given group sizes.
///
/// Sizes are summed in sorted order so that equal partitions always produce
/// bit-identical values.
pub fn partition_entropy(sizes: &mut [u32]) -> f64 {
    sizes.sort_unstable();
    let total: u64 = sizes.iter().map(|&size| u64::from(size)).sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let mut entropy = 0.0;
    for &size in sizes.iter().filter(|&&size| size > 0) {
        let p = f64::from(size) / n;
        entropy -= p * p.log2();
    }
    entropy
}

#[derive(Debug, Clone, Copy)]
pub struct EntropyRanker {
    fallback_threshold: usize,
}

impl Default for EntropyRanker {
    fn default() -> Self {
        Self::new(2)
    }
}

impl EntropyRanker {
    /// With at most `fallback_threshold` candidates left, `select` returns the
    /// most frequent one instead of searching.
    pub fn new(fallback_threshold: usize) -> Self {
        Self { fallback_threshold }
    }

    pub fn fallback_threshold(&self) -> usize {
        self.fallback_threshold
    }

    /// Expected information gain of playing `guess` against `candidates`.
    pub fn entropy(&self, lexicon: &Lexicon, guess: WordId, candidates: &[WordId]) -> f64 {
        if candidates.len() <= 1 {
            return 0.0;
        }

        let mut pattern_counts = [0u32; Feedback::NUM_PATTERNS];
        for &target in candidates {
            pattern_counts[lexicon.feedback(guess, target).code() as usize] += 1;
        }

        let mut sizes: Vec<u32> = pattern_counts.into_iter().filter(|&c| c > 0).collect();
        partition_entropy(&mut sizes)
    }

    pub fn analyze(&self, lexicon: &Lexicon, guess: WordId, candidates: &[WordId]) -> GuessAnalysis {
        let entropy = self.entropy(lexicon, guess, candidates);
        GuessAnalysis {
            id: guess,
            word: lexicon.word(guess),
            entropy,
            expected_remaining: candidates.len() as f64 / 2_f64.powf(entropy),
            is_candidate: candidates.contains(&guess),
            frequency: lexicon.frequency(guess),
        }
    }

    /// The `n` best guesses from `pool`, best first.
    pub fn rank(
        &self,
        lexicon: &Lexicon,
        candidates: &[WordId],
        pool: &[WordId],
        n: usize,
    ) -> Vec<GuessAnalysis> {
        let mut analyses: Vec<GuessAnalysis> = pool
            .par_iter()
            .map(|&guess| self.analyze(lexicon, guess, candidates))
            .collect();

        analyses.sort_by(GuessAnalysis::rank_order);
        analyses.truncate(n);
        analyses
    }

    /// The single best next guess.
    pub fn select(&self, lexicon: &Lexicon, candidates: &[WordId], pool: &[WordId]) -> Result<WordId> {
        match candidates {
            [] => return Err(SolverError::NoConsistentCandidates),
            [only] => return Ok(*only),
            _ if candidates.len() <= self.fallback_threshold => {
                return lexicon
                    .most_frequent(candidates)
                    .ok_or(SolverError::NoConsistentCandidates);
            }
            _ => {}
        }

        let pool = if pool.is_empty() { candidates } else { pool };
        pool.par_iter()
            .map(|&guess| self.analyze(lexicon, guess, candidates))
            .min_by(GuessAnalysis::rank_order)
            .map(|best| best.id)
            .ok_or(SolverError::NoConsistentCandidates)
    }
}
