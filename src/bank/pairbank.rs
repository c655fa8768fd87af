use std::{collections::HashMap, sync::OnceLock};

use ahash::RandomState;
use tracing::debug;

use crate::bank::{
    document::DocumentIdentifier,
    pair::UnorderedTermPair,
    rank::{by_descending_score, canonical_score, score_bounds},
    score::ScoreType,
    term::Term,
    termbank::{DocumentSet, TermMap},
};

pub type PairMap<V> = HashMap<UnorderedTermPair, V, RandomState>;

/// Mutable half of the pair statistics store.
///
/// Tracks, per unordered pair, the raw co-occurrence count and the set of
/// documents contributing to it. Only the size of that set is kept after
/// [`finalize`](Self::finalize).
#[derive(Debug, Clone)]
pub struct PairStatisticsBuilder {
    score_type: ScoreType,
    pair_frequency: PairMap<u64>,
    pair_documents: PairMap<DocumentSet>,
    term_documents: TermMap<DocumentSet>,
    documents: DocumentSet,
    scores: PairMap<f64>,
}

impl PairStatisticsBuilder {
    /// Create an empty store whose single score dimension is `score_type`
    pub fn new(score_type: ScoreType) -> Self {
        Self {
            score_type,
            pair_frequency: PairMap::default(),
            pair_documents: PairMap::default(),
            term_documents: TermMap::default(),
            documents: DocumentSet::default(),
            scores: PairMap::default(),
        }
    }

    pub fn record_document(&mut self, document: &DocumentIdentifier) {
        self.documents.insert(document.clone());
    }

    /// Count one joint occurrence of `pair` in `document`
    /// Document frequency only grows the first time a document is seen for the pair.
    pub fn record_cooccurrence(&mut self, pair: &UnorderedTermPair, document: &DocumentIdentifier) {
        self.record_cooccurrences(pair, document, 1);
    }

    /// Count `events` joint occurrences of `pair` in `document` at once
    /// Zero events record nothing.
    pub fn record_cooccurrences(&mut self, pair: &UnorderedTermPair, document: &DocumentIdentifier, events: u64) {
        if events == 0 {
            return;
        }
        self.record_document(document);
        *self.pair_frequency.entry(pair.clone()).or_insert(0) += events;
        self.pair_documents
            .entry(pair.clone())
            .or_default()
            .insert(document.clone());
    }

    /// Note that `term` occurred in `document`, for document-frequency based pair scores
    pub fn record_term_document(&mut self, term: &Term, document: &DocumentIdentifier) {
        self.record_document(document);
        self.term_documents
            .entry(term.clone())
            .or_default()
            .insert(document.clone());
    }

    /// Overwrite the score of `pair`
    /// NaN is stored with its sign bit cleared.
    pub fn set_score(&mut self, pair: &UnorderedTermPair, score: f64) {
        self.scores.insert(pair.clone(), canonical_score(score));
    }

    /// Score of `pair`, `0.0` if never assigned
    pub fn score(&self, pair: &UnorderedTermPair) -> f64 {
        self.scores.get(pair).copied().unwrap_or(0.0)
    }

    pub fn score_type(&self) -> &ScoreType {
        &self.score_type
    }

    /// Every pair with at least one recorded co-occurrence
    pub fn observed_pairs(&self) -> impl Iterator<Item = &UnorderedTermPair> {
        self.pair_frequency.keys()
    }

    pub fn pair_frequency(&self, pair: &UnorderedTermPair) -> u64 {
        self.pair_frequency.get(pair).copied().unwrap_or(0)
    }

    pub fn pair_document_frequency(&self, pair: &UnorderedTermPair) -> u64 {
        self.pair_documents.get(pair).map_or(0, |docs| docs.len() as u64)
    }

    pub fn term_document_frequency(&self, term: &Term) -> u64 {
        self.term_documents.get(term).map_or(0, |docs| docs.len() as u64)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Freeze the store
    pub fn finalize(self) -> PairStatistics {
        let pair_document_frequency: PairMap<u64> = self
            .pair_documents
            .into_iter()
            .map(|(pair, docs)| (pair, docs.len() as u64))
            .collect();
        let term_document_frequency: TermMap<u64> = self
            .term_documents
            .into_iter()
            .map(|(term, docs)| (term, docs.len() as u64))
            .collect();
        debug!(
            score_type = self.score_type.name(),
            scored_pairs = self.scores.len(),
            observed_pairs = self.pair_frequency.len(),
            documents = self.documents.len(),
            "pair statistics finalized"
        );

        PairStatistics {
            score_type: self.score_type,
            pair_frequency: self.pair_frequency,
            pair_document_frequency,
            term_document_frequency,
            scores: self.scores,
            document_count: self.documents.len(),
            ranking: OnceLock::new(),
            bounds: OnceLock::new(),
        }
    }
}

/// Read-only pair statistics store.
///
/// One score dimension per store, plus co-occurrence frequency and
/// document frequency per pair. The scored pairs are the ranked population.
#[derive(Debug)]
pub struct PairStatistics {
    score_type: ScoreType,
    pair_frequency: PairMap<u64>,
    pair_document_frequency: PairMap<u64>,
    term_document_frequency: TermMap<u64>,
    scores: PairMap<f64>,
    document_count: usize,
    ranking: OnceLock<Vec<UnorderedTermPair>>,
    bounds: OnceLock<(f64, f64)>,
}

impl PairStatistics {
    pub fn score_type(&self) -> &ScoreType {
        &self.score_type
    }

    /// Score of `pair`, `0.0` if never assigned
    pub fn score(&self, pair: &UnorderedTermPair) -> f64 {
        self.scores.get(pair).copied().unwrap_or(0.0)
    }

    pub fn scores(&self) -> &PairMap<f64> {
        &self.scores
    }

    /// Co-occurrence count of `pair`
    pub fn pair_frequency(&self, pair: &UnorderedTermPair) -> u64 {
        self.pair_frequency.get(pair).copied().unwrap_or(0)
    }

    /// Number of distinct documents in which `pair` co-occurs
    pub fn pair_document_frequency(&self, pair: &UnorderedTermPair) -> u64 {
        self.pair_document_frequency.get(pair).copied().unwrap_or(0)
    }

    pub fn term_document_frequency(&self, term: &Term) -> u64 {
        self.term_document_frequency.get(term).copied().unwrap_or(0)
    }

    /// Scored pairs
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = &UnorderedTermPair> {
        self.scores.keys()
    }

    pub fn pair_count(&self) -> usize {
        self.scores.len()
    }

    /// Scored pairs by descending score, ties by (term0, term1).
    /// Computed on first call and cached.
    pub fn pairs_by_descending_score(&self) -> &[UnorderedTermPair] {
        self.ranking.get_or_init(|| {
            let ranked = by_descending_score(self.scores.iter().map(|(p, s)| (p, *s)));
            debug!(pairs = ranked.len(), "pair ranking computed");
            ranked
        })
    }

    fn bounds(&self) -> (f64, f64) {
        *self
            .bounds
            .get_or_init(|| score_bounds(self.scores.values().copied()))
    }

    /// Minimum score, `0.0` when nothing is scored
    pub fn min_score(&self) -> f64 {
        self.bounds().0
    }

    /// Maximum score, `1.0` when nothing is scored
    pub fn max_score(&self) -> f64 {
        self.bounds().1
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }
}
