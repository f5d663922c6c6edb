//! The live set of lexicon words still consistent with the constraint store.

use crate::constraints::ConstraintStore;
use crate::lexicon::{Lexicon, WordId};

/// Materialized view of a `ConstraintStore` over part of a lexicon.
///
/// Only ever narrowed: each refilter starts from the previous set.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    ids: Vec<WordId>,
}

impl CandidateSet {
    pub fn new(mut ids: Vec<WordId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// Every word of the lexicon.
    pub fn full(lexicon: &Lexicon) -> Self {
        Self {
            ids: lexicon.ids().collect(),
        }
    }

    /// Drop `guessed` and every word the store no longer admits.
    pub fn refilter(&mut self, lexicon: &Lexicon, store: &ConstraintStore, guessed: WordId) {
        self.ids
            .retain(|&id| id != guessed && store.is_consistent_entry(lexicon.entry(id)));
    }

    pub fn ids(&self) -> &[WordId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: WordId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }
}
