use std::collections::HashMap;

use ahash::RandomState;

use crate::bank::{Term, TermMap, TermStatistics};

/// External document-frequency table used for corpus-comparative scoring.
///
/// Holds a document total and, per term, the number of reference documents
/// containing it. Lookups fall back from exact identity to
/// [`Term::close_match`], so a reference built without language codes still
/// serves language-tagged terms.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequencyTable {
    document_count: u64,
    entries: TermMap<u64>,
    // (surface, type) -> candidate terms, sorted for a deterministic close match
    by_surface: HashMap<(String, String), Vec<Term>, RandomState>,
}

impl DocumentFrequencyTable {
    pub fn new(document_count: u64) -> Self {
        Self {
            document_count,
            ..Self::default()
        }
    }

    /// Reference table from another corpus' term statistics
    pub fn from_term_statistics(stats: &TermStatistics) -> Self {
        let mut table = Self::new(stats.document_count() as u64);
        for (term, documents) in stats.term_documents() {
            table.insert(term.clone(), documents.len() as u64);
        }
        table
    }

    /// Set the document frequency of `term`
    pub fn insert(&mut self, term: Term, doc_frequency: u64) {
        if self.entries.insert(term.clone(), doc_frequency).is_none() {
            let key = (term.surface().to_string(), term.term_type().to_string());
            let candidates = self.by_surface.entry(key).or_default();
            candidates.push(term);
            candidates.sort();
        }
    }

    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Document frequency of `term`: exact entry first, then the first close match
    pub fn lookup(&self, term: &Term) -> Option<u64> {
        if let Some(df) = self.entries.get(term) {
            return Some(*df);
        }
        let key = (term.surface().to_string(), term.term_type().to_string());
        self.by_surface
            .get(&key)?
            .iter()
            .find(|candidate| candidate.close_match(term))
            .and_then(|candidate| self.entries.get(candidate).copied())
    }
}
