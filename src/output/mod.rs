//! Ranked, threshold-filtered CSV export.
//!
//! Both exporters walk a store's descending ranking and stop at the first
//! entry scoring below the threshold. Output is RFC 4180 CSV with CRLF line
//! endings; numbers use their `Display` form.
pub mod pair_csv;
pub mod term_csv;

use std::{cmp::Ordering, fs::File, io::BufWriter, path::Path};

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::error::{Result, TermbankError};

pub use pair_csv::{export_all_pairs, export_pairs};
pub use term_csv::{export_all_terms, export_terms};

/// How the ranking walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// An entry scored below the threshold; nothing after it was looked at
    EarlyStopped,
    /// Every ranked entry passed the threshold
    Exhausted,
}

/// What an export wrote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSummary {
    pub threshold: f64,
    /// ranked entries before filtering
    pub unfiltered: usize,
    /// entries that passed the threshold
    pub written: usize,
    /// per-document rows, always 0 for pairs
    pub detail_rows: usize,
    pub outcome: ExportOutcome,
}

/// Lazily yield ranked entries until the first one scoring below `threshold`.
/// `ranked` must be sorted by descending `score`; the entry that ends the walk
/// is the last one `score` is called on.
pub(crate) fn above_threshold<I, F>(ranked: I, threshold: f64, mut score: F) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> f64,
{
    // NaN never compares below the threshold, matching its place at the top of the ranking
    ranked
        .into_iter()
        .take_while(move |entry| score(entry).partial_cmp(&threshold) != Some(Ordering::Less))
}

pub(crate) fn export_error(path: &Path, source: impl Into<csv::Error>) -> TermbankError {
    TermbankError::Export {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// CRLF, minimal-quoting CSV writer over a freshly created file
pub(crate) fn create_writer(path: &Path) -> Result<Writer<BufWriter<File>>> {
    let file = File::create(path).map_err(|e| export_error(path, e))?;
    Ok(WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(BufWriter::new(file)))
}
