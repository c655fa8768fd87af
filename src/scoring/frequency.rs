use tracing::debug;

use crate::{
    aggregate::observation::DocumentObservation,
    bank::{ScoreType, TermMap, TermStatisticsBuilder},
    scoring::{score_types, TermScorer},
};

/// Raw frequency scoring.
///
/// - `termFrequency` (default): total occurrences across all documents
/// - `localDocFrequency`: number of documents containing the term
#[derive(Debug, Default, Clone)]
pub struct FrequencyScorer {
    term_frequency: TermMap<u64>,
    doc_frequency: TermMap<u64>,
}

impl FrequencyScorer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TermScorer for FrequencyScorer {
    fn score_types(&self) -> Vec<ScoreType> {
        vec![score_types::term_frequency(), score_types::local_doc_frequency()]
    }

    fn reset(&mut self) {
        self.term_frequency.clear();
        self.doc_frequency.clear();
    }

    fn observe(&mut self, observation: &DocumentObservation) {
        for (term, count) in &observation.term_counts {
            *self.term_frequency.entry(term.clone()).or_insert(0) += count;
            *self.doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }

    fn compute_scores(&mut self, stats: &mut TermStatisticsBuilder) {
        let tf = score_types::term_frequency();
        let df = score_types::local_doc_frequency();
        for (term, count) in &self.term_frequency {
            stats.set_score(&tf, term, *count as f64);
            let docs = self.doc_frequency.get(term).copied().unwrap_or(0);
            stats.set_score(&df, term, docs as f64);
        }
        debug!(terms = self.term_frequency.len(), "frequency scores computed");
    }
}
