use indexmap::IndexMap;

use crate::{
    aggregate::document::AnnotatedDocument,
    bank::{DocumentIdentifier, Term, UnorderedTermPair},
    config::TermbankConfig,
};

/// Everything one document contributes to the statistics stores.
///
/// Built independently per document (in parallel), then merged on a single
/// thread. Maps keep first-occurrence order so merging is deterministic.
#[derive(Debug, Clone)]
pub struct DocumentObservation {
    pub document: DocumentIdentifier,
    /// occurrences per term within this document
    pub term_counts: IndexMap<Term, u64>,
    /// co-occurrence events per pair within this document
    pub cooccurrences: IndexMap<UnorderedTermPair, u64>,
    /// accepted term occurrences in this document
    pub term_sum: u64,
}

impl DocumentObservation {
    /// Extract the term occurrences of `document`
    /// Co-occurrences are only collected when `with_pairs` is set.
    pub fn extract(
        document: &AnnotatedDocument,
        index: usize,
        config: &TermbankConfig,
        with_pairs: bool,
    ) -> Self {
        let mut occurrences: Vec<(usize, Term)> = document
            .annotations
            .iter()
            .filter(|a| config.accepts(&a.annotation_type))
            .map(|a| {
                let term = Term::new(
                    &a.surface,
                    a.language.as_deref().unwrap_or(""),
                    &a.annotation_type,
                );
                (a.position, term)
            })
            .collect();

        let mut term_counts: IndexMap<Term, u64> = IndexMap::new();
        for (_, term) in &occurrences {
            *term_counts.entry(term.clone()).or_insert(0) += 1;
        }

        let cooccurrences = if with_pairs {
            occurrences.sort_by_key(|(position, _)| *position);
            cooccurrences_within(&occurrences, config.pair_window)
        } else {
            IndexMap::new()
        };

        Self {
            document: document.identifier(index, config),
            term_sum: occurrences.len() as u64,
            term_counts,
            cooccurrences,
        }
    }
}

/// Pair up occurrences of distinct terms at most `window` positions apart.
/// `occurrences` must be sorted by position.
fn cooccurrences_within(occurrences: &[(usize, Term)], window: usize) -> IndexMap<UnorderedTermPair, u64> {
    let mut pairs: IndexMap<UnorderedTermPair, u64> = IndexMap::new();
    for (i, (position, term)) in occurrences.iter().enumerate() {
        for (other_position, other) in &occurrences[i + 1..] {
            if other_position - position > window {
                break;
            }
            if term == other {
                continue;
            }
            let pair = UnorderedTermPair::new(term.clone(), other.clone());
            *pairs.entry(pair).or_insert(0) += 1;
        }
    }
    pairs
}
