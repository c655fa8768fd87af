/// This crate aggregates term and term-pair statistics over annotated documents
/// and exports them as ranked, threshold-filtered CSV files.
pub mod aggregate;
pub mod bank;
pub mod config;
pub mod error;
pub mod output;
pub mod scoring;

/// Term
/// Identity of a candidate term: surface string, language code and term type.
/// Ordering is (surface, language, type), which is the tie-break used by every
/// ranking in this crate.
///
/// Fields are shared `Arc<str>`, so cloning a term into several maps is cheap.
pub use bank::Term;

/// Document Identifier
/// A document's identifier string together with its position in the corpus.
/// Two identifiers are equal when both the string and the position match.
pub use bank::DocumentIdentifier;

/// Unordered Term Pair
/// Two distinct terms stored in canonical order, so `(a, b)` and `(b, a)` are
/// the same key.
pub use bank::UnorderedTermPair;

/// Score Type
/// Named score dimension. The first one registered on a store is the default,
/// used for ranking and thresholds.
pub use bank::ScoreType;

/// Term Statistics Store
/// `TermStatisticsBuilder` collects, per term, the documents it occurred in
/// and its scores. `finalize` turns it into the read-only `TermStatistics`,
/// whose descending ranking and score bounds are computed once on first read.
///
/// # Thread Safety
/// `TermStatistics` is `Sync`; concurrent first reads of the ranking are safe.
pub use bank::{TermStatistics, TermStatisticsBuilder};

/// Pair Statistics Store
/// Same lifecycle as the term store, for co-occurring term pairs: raw
/// co-occurrence count, document frequency and one score per pair.
pub use bank::{PairStatistics, PairStatisticsBuilder};

/// Scoring Strategy Traits
/// `TermScorer` fills one or more score dimensions of a term store from the
/// aggregated occurrences; `PairScorer` does the same for a pair store.
/// Implement them to plug a different formula into the same aggregation and
/// export machinery.
///
/// Provided strategies:
/// - `FrequencyScorer`: raw term frequency and local document frequency
/// - `TfIdfScorer`: smoothed TF-IDF, optionally against a reference corpus
/// - `PairFrequencyScorer`: raw co-occurrence count
/// - `DicePairScorer`: Dice coefficient over document frequencies
pub use scoring::{
    DicePairScorer, DocumentFrequencyTable, FrequencyScorer, PairFrequencyScorer, PairScorer, TermScorer, TfIdfScorer,
};

/// Annotated input documents
/// The term candidates produced by an external annotation layer.
pub use aggregate::{AnnotatedDocument, TermAnnotation};

/// Aggregation entry points
/// Extract every document in parallel, merge in corpus order, score, finalize.
pub use aggregate::{build_pair_statistics, build_term_statistics};

/// CSV Exporters
/// Walk a finalized store's ranking and write every entry at or above the
/// threshold, stopping at the first one below it.
pub use output::{export_all_pairs, export_all_terms, export_pairs, export_terms, ExportOutcome, ExportSummary};

pub use config::TermbankConfig;
pub use error::{Result, TermbankError};
