pub mod frequency;
pub mod pair;
pub mod reference;
pub mod tfidf;

use crate::{
    aggregate::observation::DocumentObservation,
    bank::{PairStatisticsBuilder, ScoreType, TermStatisticsBuilder},
};

pub use frequency::FrequencyScorer;
pub use pair::{DicePairScorer, PairFrequencyScorer};
pub use reference::DocumentFrequencyTable;
pub use tfidf::TfIdfScorer;

/// Term Scoring Strategy Trait
/// Populates one or more score dimensions of a term statistics store from the
/// aggregated occurrence data.
///
/// Lifecycle, driven by [`build_term_statistics`](crate::aggregate::build_term_statistics):
/// `score_types()` → `reset()` → `observe(..)` once per document → `compute_scores(..)`.
/// `compute_scores` only runs after every document has been observed.
///
/// Implementations must assign a score under each of their score types to
/// every term they want ranked (zero is a valid score). Terms left without a
/// default score are not exported.
pub trait TermScorer {
    /// Score dimensions filled by this scorer, in column order
    /// The first one is the ranking default; an empty list is a configuration error.
    fn score_types(&self) -> Vec<ScoreType>;

    /// Forget everything observed so far
    fn reset(&mut self);

    /// Take in the terms of one document
    fn observe(&mut self, observation: &DocumentObservation);

    /// Write scores for the observed terms
    fn compute_scores(&mut self, stats: &mut TermStatisticsBuilder);
}

/// Pair Scoring Strategy Trait
/// Fills the single score dimension of a pair statistics store once all
/// co-occurrences have been recorded.
pub trait PairScorer {
    fn score_type(&self) -> ScoreType;

    fn compute_scores(&self, stats: &mut PairStatisticsBuilder);
}

/// Score type names shared by the provided scorers
pub mod score_types {
    use crate::bank::ScoreType;

    pub fn term_frequency() -> ScoreType {
        ScoreType::with_label("termFrequency", "Term frequency")
    }

    pub fn local_doc_frequency() -> ScoreType {
        ScoreType::with_label("localDocFrequency", "Local document frequency")
    }

    pub fn reference_doc_frequency() -> ScoreType {
        ScoreType::with_label("refDocFrequency", "Reference document frequency")
    }

    pub fn tf_idf() -> ScoreType {
        ScoreType::with_label("tfIdf", "tf.idf")
    }

    pub fn pair_frequency() -> ScoreType {
        ScoreType::with_label("pairFrequency", "Pair frequency")
    }

    pub fn dice() -> ScoreType {
        ScoreType::with_label("dice", "Dice coefficient")
    }
}
