pub mod document;
pub mod observation;

use rayon::prelude::*;
use tracing::{info, info_span};

use crate::{
    bank::{PairStatistics, PairStatisticsBuilder, TermStatistics, TermStatisticsBuilder},
    config::TermbankConfig,
    error::{Result, TermbankError},
    scoring::{PairScorer, TermScorer},
};

pub use document::{AnnotatedDocument, TermAnnotation};
pub use observation::DocumentObservation;

/// Extract every document in parallel
/// The result is in corpus order, so merging it is deterministic.
pub fn observe_documents(
    documents: &[AnnotatedDocument],
    config: &TermbankConfig,
    with_pairs: bool,
) -> Vec<DocumentObservation> {
    documents
        .par_iter()
        .enumerate()
        .map(|(index, document)| DocumentObservation::extract(document, index, config, with_pairs))
        .collect()
}

fn check_input(documents: &[AnnotatedDocument], config: &TermbankConfig) -> Result<()> {
    config.validate()?;
    if documents.is_empty() {
        return Err(TermbankError::NoDocuments);
    }
    Ok(())
}

/// Aggregate term occurrences over `documents` and score them with `scorer`.
///
/// Runs the whole pipeline: extraction (parallel), merge (in corpus order),
/// scoring, then freezes the store. The scorer is reset first, so the same
/// instance can be reused across corpora.
pub fn build_term_statistics<S>(
    documents: &[AnnotatedDocument],
    config: &TermbankConfig,
    scorer: &mut S,
) -> Result<TermStatistics>
where
    S: TermScorer + ?Sized,
{
    let _span = info_span!("term_statistics", documents = documents.len()).entered();
    check_input(documents, config)?;
    let mut stats = TermStatisticsBuilder::new(scorer.score_types())?;

    scorer.reset();
    let observations = observe_documents(documents, config, false);
    let mut occurrences = 0u64;
    for observation in &observations {
        stats.record_document(&observation.document);
        for term in observation.term_counts.keys() {
            stats.record_occurrence(term, &observation.document);
        }
        occurrences += observation.term_sum;
        scorer.observe(observation);
    }
    scorer.compute_scores(&mut stats);

    let stats = stats.finalize();
    info!(
        documents = stats.document_count(),
        occurrences,
        terms = stats.term_count(),
        default_score_type = stats.default_score_type().name(),
        "term statistics built"
    );
    Ok(stats)
}

/// Aggregate term co-occurrences over `documents` and score the pairs with `scorer`.
///
/// Every co-occurrence event within `pair_window` positions is recorded; the
/// term document frequencies needed by document-frequency based pair scores
/// are recorded alongside.
pub fn build_pair_statistics<P>(
    documents: &[AnnotatedDocument],
    config: &TermbankConfig,
    scorer: &P,
) -> Result<PairStatistics>
where
    P: PairScorer + ?Sized,
{
    let _span = info_span!("pair_statistics", documents = documents.len(), window = config.pair_window).entered();
    check_input(documents, config)?;
    let mut stats = PairStatisticsBuilder::new(scorer.score_type());

    for observation in observe_documents(documents, config, true) {
        stats.record_document(&observation.document);
        for term in observation.term_counts.keys() {
            stats.record_term_document(term, &observation.document);
        }
        for (pair, events) in &observation.cooccurrences {
            stats.record_cooccurrences(pair, &observation.document, *events);
        }
    }
    scorer.compute_scores(&mut stats);

    let stats = stats.finalize();
    info!(
        documents = stats.document_count(),
        pairs = stats.pair_count(),
        score_type = stats.score_type().name(),
        "pair statistics built"
    );
    Ok(stats)
}
