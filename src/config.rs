//! Solver configuration, built in code or loaded from TOML.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::candidates::CandidateSet;
use crate::error::{Result, SolverError};
use crate::lexicon::Lexicon;
use crate::strategy::GuessStrategy;
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    MostFrequent,
    FrequencyReduction,
    Entropy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Turns allowed before the puzzle counts as lost.
    pub max_turns: usize,
    /// Words below this frequency never become initial candidates.
    pub min_frequency: u64,
    /// Keep only the N most frequent words as initial candidates.
    pub top_n: Option<usize>,
    pub strategy: StrategyKind,
    /// Let the entropy strategy probe with words that cannot be the answer.
    pub probe: bool,
    pub fallback_threshold: usize,
    /// Scripted first guesses, played before the strategy takes over.
    pub openers: Vec<Word>,
    /// Build the lexicon-wide feedback table before solving.
    pub precompute_feedback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_turns: 6,
            min_frequency: 0,
            top_n: None,
            strategy: StrategyKind::Entropy,
            probe: false,
            fallback_threshold: 2,
            openers: Vec::new(),
            precompute_feedback: false,
        }
    }
}

impl SolverConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(SolverError::Configuration(
                "max_turns must be at least 1".to_string(),
            ));
        }
        if self.top_n == Some(0) {
            return Err(SolverError::Configuration(
                "top_n must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// The strategy this configuration describes, openers included.
    pub fn build_strategy(&self, lexicon: &Lexicon) -> Result<GuessStrategy> {
        let base = match self.strategy {
            StrategyKind::MostFrequent => GuessStrategy::MostFrequentRemaining,
            StrategyKind::FrequencyReduction => GuessStrategy::FrequencyReduction,
            StrategyKind::Entropy => GuessStrategy::entropy(self.fallback_threshold, self.probe),
        };
        base.with_openers(lexicon, &self.openers)
    }

    /// The initial candidate set: the frequency-bounded part of the lexicon.
    pub fn initial_candidates(&self, lexicon: &Lexicon) -> CandidateSet {
        let ids = match self.top_n {
            Some(n) => lexicon
                .top_by_frequency(n)
                .into_iter()
                .filter(|&id| lexicon.frequency(id) >= self.min_frequency)
                .collect(),
            None if self.min_frequency == 0 => return CandidateSet::full(lexicon),
            None => lexicon.ids_with_min_frequency(self.min_frequency),
        };
        CandidateSet::new(ids)
    }
}
