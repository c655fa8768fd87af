use tracing::debug;

use crate::{
    aggregate::observation::DocumentObservation,
    bank::{ScoreType, Term, TermMap, TermStatisticsBuilder},
    scoring::{reference::DocumentFrequencyTable, score_types, TermScorer},
};

/// Smoothed inverse document frequency
/// `ln((N + 1) / (df + 1)) + 1`, finite for `df = 0` and never below 1 when `df <= N`.
pub fn idf(document_count: u64, doc_frequency: u64) -> f64 {
    ((document_count as f64 + 1.0) / (doc_frequency as f64 + 1.0)).ln() + 1.0
}

/// TF-IDF scoring.
///
/// The term frequency is taken over the whole local corpus. Document
/// frequencies come from the reference table when one is set (terms missing
/// from it count as df = 0), otherwise from the local corpus itself.
///
/// Score types, in column order: `tfIdf` (default), `termFrequency`,
/// `localDocFrequency`, `refDocFrequency`.
#[derive(Debug, Default, Clone)]
pub struct TfIdfScorer {
    reference: Option<DocumentFrequencyTable>,
    term_frequency: TermMap<u64>,
    doc_frequency: TermMap<u64>,
    documents: u64,
}

impl TfIdfScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against an external corpus
    pub fn with_reference(reference: DocumentFrequencyTable) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    pub fn reference(&self) -> Option<&DocumentFrequencyTable> {
        self.reference.as_ref()
    }

    /// (N, df) used for the IDF of `term`
    fn idf_inputs(&self, term: &Term, local_df: u64) -> (u64, u64) {
        match &self.reference {
            Some(reference) => (reference.document_count(), reference.lookup(term).unwrap_or(0)),
            None => (self.documents, local_df),
        }
    }
}

impl TermScorer for TfIdfScorer {
    fn score_types(&self) -> Vec<ScoreType> {
        vec![
            score_types::tf_idf(),
            score_types::term_frequency(),
            score_types::local_doc_frequency(),
            score_types::reference_doc_frequency(),
        ]
    }

    fn reset(&mut self) {
        self.term_frequency.clear();
        self.doc_frequency.clear();
        self.documents = 0;
    }

    fn observe(&mut self, observation: &DocumentObservation) {
        self.documents += 1;
        for (term, count) in &observation.term_counts {
            *self.term_frequency.entry(term.clone()).or_insert(0) += count;
            *self.doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    fn compute_scores(&mut self, stats: &mut TermStatisticsBuilder) {
        let tf_idf = score_types::tf_idf();
        let tf = score_types::term_frequency();
        let local_df = score_types::local_doc_frequency();
        let ref_df = score_types::reference_doc_frequency();

        for (term, count) in &self.term_frequency {
            let df = self.doc_frequency.get(term).copied().unwrap_or(0);
            let (n, reference_df) = self.idf_inputs(term, df);
            stats.set_score(&tf_idf, term, *count as f64 * idf(n, reference_df));
            stats.set_score(&tf, term, *count as f64);
            stats.set_score(&local_df, term, df as f64);
            stats.set_score(&ref_df, term, reference_df as f64);
        }
        debug!(
            terms = self.term_frequency.len(),
            documents = self.documents,
            with_reference = self.reference.is_some(),
            "tf-idf scores computed"
        );
    }
}
