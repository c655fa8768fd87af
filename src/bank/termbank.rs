use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::OnceLock,
};

use ahash::RandomState;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    bank::{
        document::DocumentIdentifier,
        rank::{by_descending_score, canonical_score, score_bounds},
        score::ScoreType,
        term::Term,
    },
    error::{Result, TermbankError},
};

pub type TermMap<V> = HashMap<Term, V, RandomState>;
pub type DocumentSet = HashSet<DocumentIdentifier, RandomState>;

/// Register score types in order, rejecting duplicates and an empty list.
/// Returns the tables together with the default (first) score type.
fn register_score_types<I>(score_types: I) -> Result<(ScoreType, IndexMap<ScoreType, TermMap<f64>>)>
where
    I: IntoIterator<Item = ScoreType>,
{
    let mut scores: IndexMap<ScoreType, TermMap<f64>> = IndexMap::new();
    for score_type in score_types {
        if scores.keys().any(|st| st.name() == score_type.name()) {
            return Err(TermbankError::DuplicateScoreType(score_type.name().to_string()));
        }
        scores.insert(score_type, TermMap::default());
    }
    let default_type = scores
        .get_index(0)
        .map(|(st, _)| st.clone())
        .ok_or(TermbankError::NoScoreTypes)?;
    Ok((default_type, scores))
}

/// Mutable half of the term statistics store.
///
/// Filled by the aggregation phase (one `record_occurrence` per observed term
/// occurrence) and by the scoring phase (one `set_score` per score type per
/// term), then consumed by [`finalize`](Self::finalize).
#[derive(Debug, Clone)]
pub struct TermStatisticsBuilder {
    default_type: ScoreType,
    scores: IndexMap<ScoreType, TermMap<f64>>,
    term_documents: TermMap<DocumentSet>,
    documents: DocumentSet,
    empty: DocumentSet,
}

impl TermStatisticsBuilder {
    /// Create an empty store
    /// The first score type is the default ranking key.
    pub fn new<I>(score_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = ScoreType>,
    {
        let (default_type, scores) = register_score_types(score_types)?;
        Ok(Self {
            default_type,
            scores,
            term_documents: TermMap::default(),
            documents: DocumentSet::default(),
            empty: DocumentSet::default(),
        })
    }

    /// Count a document towards the corpus total even if it yields no terms
    pub fn record_document(&mut self, document: &DocumentIdentifier) {
        self.documents.insert(document.clone());
    }

    /// Add `document` to the document set of `term`
    /// Repeated identical observations are no-ops.
    pub fn record_occurrence(&mut self, term: &Term, document: &DocumentIdentifier) {
        self.record_document(document);
        self.term_documents
            .entry(term.clone())
            .or_default()
            .insert(document.clone());
    }

    /// Overwrite the score of `term` under `score_type`
    /// Writes to a score type that was never registered are dropped.
    /// NaN is stored with its sign bit cleared.
    pub fn set_score(&mut self, score_type: &ScoreType, term: &Term, score: f64) {
        match self.scores.get_mut(score_type) {
            Some(table) => {
                table.insert(term.clone(), canonical_score(score));
            }
            None => warn!(score_type = score_type.name(), term = %term, "score for unregistered score type ignored"),
        }
    }

    /// Score of `term` under `score_type`, `0.0` if never assigned
    pub fn score(&self, score_type: &ScoreType, term: &Term) -> f64 {
        self.scores
            .get(score_type)
            .and_then(|table| table.get(term))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn score_types(&self) -> impl Iterator<Item = &ScoreType> {
        self.scores.keys()
    }

    pub fn default_score_type(&self) -> &ScoreType {
        &self.default_type
    }

    /// Every term seen by the aggregation phase, scored or not
    pub fn observed_terms(&self) -> impl Iterator<Item = &Term> {
        self.term_documents.keys()
    }

    pub fn documents_for_term(&self, term: &Term) -> &DocumentSet {
        self.term_documents.get(term).unwrap_or(&self.empty)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Freeze the store
    /// Terms without a default score stay reachable through
    /// `documents_for_term` but are not ranked or exported.
    pub fn finalize(self) -> TermStatistics {
        let default_scores = &self.scores[0];
        let unscored = self
            .term_documents
            .keys()
            .filter(|term| !default_scores.contains_key(*term))
            .count();
        debug!(
            default_score_type = self.default_type.name(),
            scored_terms = default_scores.len(),
            unscored_terms = unscored,
            documents = self.documents.len(),
            "term statistics finalized"
        );

        TermStatistics {
            default_type: self.default_type,
            scores: self.scores,
            term_documents: self.term_documents,
            document_count: self.documents.len(),
            empty: self.empty,
            ranking: OnceLock::new(),
            bounds: OnceLock::new(),
        }
    }
}

/// Read-only term statistics store.
///
/// Holds, per term, the set of documents it occurred in and one score per
/// registered [`ScoreType`]. The key set of the default score table defines
/// the known, ranked terms.
///
/// Derived values (the descending-score ordering and the min/max of the
/// default score) are computed at most once, on first read. Concurrent first
/// reads are safe: the store is `Sync` and the caches are `OnceLock`s.
#[derive(Debug)]
pub struct TermStatistics {
    default_type: ScoreType,
    scores: IndexMap<ScoreType, TermMap<f64>>,
    term_documents: TermMap<DocumentSet>,
    document_count: usize,
    empty: DocumentSet,
    ranking: OnceLock<Vec<Term>>,
    bounds: OnceLock<(f64, f64)>,
}

impl TermStatistics {
    /// Score types in registration order
    pub fn score_types(&self) -> impl ExactSizeIterator<Item = &ScoreType> {
        self.scores.keys()
    }

    pub fn default_score_type(&self) -> &ScoreType {
        &self.default_type
    }

    fn default_scores(&self) -> &TermMap<f64> {
        &self.scores[0]
    }

    /// Score of `term` under `score_type`, `0.0` if never assigned
    pub fn score(&self, score_type: &ScoreType, term: &Term) -> f64 {
        self.scores
            .get(score_type)
            .and_then(|table| table.get(term))
            .copied()
            .unwrap_or(0.0)
    }

    /// Score of `term` under the default score type
    pub fn default_score(&self, term: &Term) -> f64 {
        self.default_scores().get(term).copied().unwrap_or(0.0)
    }

    /// Whole score table of one score type
    pub fn scores(&self, score_type: &ScoreType) -> Option<&TermMap<f64>> {
        self.scores.get(score_type)
    }

    /// All scores of `term`, in score type registration order
    pub fn score_map<'a>(&'a self, term: &'a Term) -> impl Iterator<Item = (&'a ScoreType, f64)> + 'a {
        self.scores
            .iter()
            .map(move |(st, table)| (st, table.get(term).copied().unwrap_or(0.0)))
    }

    /// Known, scored terms
    pub fn terms(&self) -> impl ExactSizeIterator<Item = &Term> {
        self.default_scores().keys()
    }

    pub fn term_count(&self) -> usize {
        self.default_scores().len()
    }

    pub fn contains_term(&self, term: &Term) -> bool {
        self.default_scores().contains_key(term)
    }

    /// Scored terms by descending default score, ties by natural term order.
    /// Computed on first call and cached.
    pub fn terms_by_descending_score(&self) -> &[Term] {
        self.ranking.get_or_init(|| {
            let ranked = by_descending_score(self.default_scores().iter().map(|(t, s)| (t, *s)));
            debug!(terms = ranked.len(), "term ranking computed");
            ranked
        })
    }

    fn bounds(&self) -> (f64, f64) {
        *self
            .bounds
            .get_or_init(|| score_bounds(self.default_scores().values().copied()))
    }

    /// Minimum default score, `0.0` when nothing is scored
    pub fn min_score(&self) -> f64 {
        self.bounds().0
    }

    /// Maximum default score, `1.0` when nothing is scored
    pub fn max_score(&self) -> f64 {
        self.bounds().1
    }

    /// Documents `term` occurred in; empty if unknown
    pub fn documents_for_term(&self, term: &Term) -> &DocumentSet {
        self.term_documents.get(term).unwrap_or(&self.empty)
    }

    pub fn term_documents(&self) -> &TermMap<DocumentSet> {
        &self.term_documents
    }

    /// Number of distinct documents aggregated
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Distinct language codes among scored terms
    pub fn languages(&self) -> BTreeSet<&str> {
        self.terms().map(Term::language_code).collect()
    }

    /// Distinct term types among scored terms
    pub fn types(&self) -> BTreeSet<&str> {
        self.terms().map(Term::term_type).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> Term {
        Term::new(s, "", "SingleWord")
    }

    fn doc(id: &str, index: usize) -> DocumentIdentifier {
        DocumentIdentifier::new(id, index)
    }

    fn store(scores: &[(&str, f64)]) -> TermStatistics {
        let freq = ScoreType::new("frequency");
        let mut builder = TermStatisticsBuilder::new([freq.clone()]).unwrap();
        for (i, (s, v)) in scores.iter().enumerate() {
            builder.record_occurrence(&term(s), &doc("d", i));
            builder.set_score(&freq, &term(s), *v);
        }
        builder.finalize()
    }

    #[test]
    fn construction_requires_a_score_type() {
        let err = TermStatisticsBuilder::new(Vec::<ScoreType>::new()).unwrap_err();
        assert!(matches!(err, TermbankError::NoScoreTypes));

        let err = TermStatisticsBuilder::new([ScoreType::new("a"), ScoreType::with_label("a", "A")]).unwrap_err();
        assert!(matches!(err, TermbankError::DuplicateScoreType(name) if name == "a"));
    }

    #[test]
    fn missing_score_is_zero() {
        let freq = ScoreType::new("frequency");
        let other = ScoreType::new("other");
        let mut builder = TermStatisticsBuilder::new([freq.clone(), other.clone()]).unwrap();
        builder.set_score(&freq, &term("a"), 2.0);
        assert_eq!(builder.score(&other, &term("a")), 0.0);

        let stats = builder.finalize();
        assert_eq!(stats.score(&other, &term("a")), 0.0);
        assert_eq!(stats.score(&freq, &term("zzz")), 0.0);
        assert_eq!(stats.score(&ScoreType::new("unregistered"), &term("a")), 0.0);
    }

    #[test]
    fn score_type_is_found_by_name_alone() {
        let labelled = ScoreType::with_label("termFrequency", "Term frequency");
        let mut builder = TermStatisticsBuilder::new([labelled.clone()]).unwrap();
        builder.set_score(&labelled, &term("a"), 4.0);
        builder.set_score(&ScoreType::new("termFrequency"), &term("a"), 9.0);
        assert_eq!(builder.score(&ScoreType::new("termFrequency"), &term("a")), 9.0);

        let stats = builder.finalize();
        assert_eq!(stats.score(&ScoreType::new("termFrequency"), &term("a")), 9.0);
        assert_eq!(stats.score(&labelled, &term("a")), 9.0);
        assert!(stats.scores(&ScoreType::new("termFrequency")).is_some());
    }

    #[test]
    fn nan_scores_rank_first_and_stay_out_of_bounds() {
        let negative_nan = f64::from_bits(f64::NAN.to_bits() | (1 << 63));
        let stats = store(&[("A", 5.0), ("B", 3.0), ("D", 1.0), ("P", f64::NAN), ("N", negative_nan)]);
        let ranked: Vec<&str> = stats.terms_by_descending_score().iter().map(Term::surface).collect();
        assert_eq!(ranked, vec!["N", "P", "A", "B", "D"]);
        assert!(stats.default_score(&term("N")).is_sign_positive());
        assert_eq!(stats.min_score(), 1.0);
        assert_eq!(stats.max_score(), 5.0);
    }

    #[test]
    fn set_score_overwrites() {
        let freq = ScoreType::new("frequency");
        let mut builder = TermStatisticsBuilder::new([freq.clone()]).unwrap();
        builder.set_score(&freq, &term("a"), 2.0);
        builder.set_score(&freq, &term("a"), 7.5);
        assert_eq!(builder.finalize().default_score(&term("a")), 7.5);
    }

    #[test]
    fn occurrences_dedupe_per_document() {
        let mut builder = TermStatisticsBuilder::new([ScoreType::new("f")]).unwrap();
        builder.record_occurrence(&term("a"), &doc("d1", 0));
        builder.record_occurrence(&term("a"), &doc("d1", 0));
        builder.record_occurrence(&term("a"), &doc("d2", 1));
        builder.record_document(&doc("d3", 2));

        assert_eq!(builder.documents_for_term(&term("a")).len(), 2);
        assert!(builder.documents_for_term(&term("b")).is_empty());
        assert_eq!(builder.document_count(), 3);
    }

    #[test]
    fn ranking_is_descending_with_natural_tie_break() {
        let stats = store(&[("D", 1.0), ("C", 3.0), ("A", 5.0), ("B", 3.0)]);
        let ranked: Vec<&str> = stats.terms_by_descending_score().iter().map(Term::surface).collect();
        assert_eq!(ranked, vec!["A", "B", "C", "D"]);

        let ranked = stats.terms_by_descending_score();
        assert_eq!(ranked.len(), stats.term_count());
        for w in ranked.windows(2) {
            let (a, b) = (stats.default_score(&w[0]), stats.default_score(&w[1]));
            assert!(a >= b);
            if a == b {
                assert!(w[0] <= w[1]);
            }
        }
    }

    #[test]
    fn ranking_is_cached() {
        let stats = store(&[("x", 1.0), ("y", 2.0)]);
        let first = stats.terms_by_descending_score();
        let second = stats.terms_by_descending_score();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn bounds_default_to_placeholder_range() {
        let empty = TermStatisticsBuilder::new([ScoreType::new("f")]).unwrap().finalize();
        assert_eq!(empty.min_score(), 0.0);
        assert_eq!(empty.max_score(), 1.0);

        let stats = store(&[("a", 4.0), ("b", -2.0), ("c", 0.5)]);
        assert_eq!(stats.min_score(), -2.0);
        assert_eq!(stats.max_score(), 4.0);
    }

    #[test]
    fn unscored_terms_are_not_ranked() {
        let freq = ScoreType::new("frequency");
        let mut builder = TermStatisticsBuilder::new([freq.clone()]).unwrap();
        builder.record_occurrence(&term("scored"), &doc("d", 0));
        builder.record_occurrence(&term("ignored"), &doc("d", 0));
        builder.set_score(&freq, &term("scored"), 1.0);
        let stats = builder.finalize();

        assert_eq!(stats.terms().collect::<Vec<_>>(), vec![&term("scored")]);
        assert_eq!(stats.terms_by_descending_score(), &[term("scored")]);
        assert_eq!(stats.documents_for_term(&term("ignored")).len(), 1);
    }

    #[test]
    fn score_map_follows_registration_order() {
        let tf = ScoreType::new("tf");
        let df = ScoreType::new("df");
        let mut builder = TermStatisticsBuilder::new([tf.clone(), df.clone()]).unwrap();
        builder.set_score(&tf, &term("a"), 3.0);
        builder.set_score(&df, &term("a"), 1.0);
        let stats = builder.finalize();

        assert_eq!(stats.default_score_type(), &tf);
        let a = term("a");
        let map: Vec<(&str, f64)> = stats.score_map(&a).map(|(st, s)| (st.name(), s)).collect();
        assert_eq!(map, vec![("tf", 3.0), ("df", 1.0)]);
    }

    #[test]
    fn languages_and_types_are_sorted_and_distinct() {
        let f = ScoreType::new("f");
        let mut builder = TermStatisticsBuilder::new([f.clone()]).unwrap();
        builder.set_score(&f, &Term::new("a", "fr", "MultiWord"), 1.0);
        builder.set_score(&f, &Term::new("b", "en", "SingleWord"), 1.0);
        builder.set_score(&f, &Term::new("c", "en", "SingleWord"), 1.0);
        let stats = builder.finalize();

        assert_eq!(stats.languages().into_iter().collect::<Vec<_>>(), vec!["en", "fr"]);
        assert_eq!(stats.types().into_iter().collect::<Vec<_>>(), vec!["MultiWord", "SingleWord"]);
    }
}
