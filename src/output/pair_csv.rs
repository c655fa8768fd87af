use std::path::Path;

use tracing::info;

use crate::{
    bank::{PairStatistics, Term, UnorderedTermPair},
    error::Result,
    output::{above_threshold, create_writer, export_error, ExportOutcome, ExportSummary},
};

fn header(stats: &PairStatistics) -> Vec<String> {
    let mut row: Vec<String> = ["Term", "Lang", "Type", "Term", "Lang", "Type"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    row.push(stats.score_type().label().to_string());
    row.push("DocFrequency".to_string());
    row.push("Frequency".to_string());
    row
}

fn term_columns(term: &Term) -> [String; 3] {
    [
        term.surface().to_string(),
        term.language_code().to_string(),
        term.term_type().to_string(),
    ]
}

fn pair_row(stats: &PairStatistics, pair: &UnorderedTermPair) -> Vec<String> {
    let mut row = Vec::with_capacity(9);
    row.extend(term_columns(pair.term0()));
    row.extend(term_columns(pair.term1()));
    row.push(stats.score(pair).to_string());
    row.push(stats.pair_document_frequency(pair).to_string());
    row.push(stats.pair_frequency(pair).to_string());
    row
}

/// Write the pairs of `stats` scoring at least `threshold` to `path`.
/// Same walk as the term export, without per-document rows.
pub fn export_pairs<P: AsRef<Path>>(stats: &PairStatistics, threshold: f64, path: P) -> Result<ExportSummary> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer.write_record(&header(stats)).map_err(|e| export_error(path, e))?;

    let ranked = stats.pairs_by_descending_score();
    let mut written = 0;
    for pair in above_threshold(ranked, threshold, |pair| stats.score(pair)) {
        writer
            .write_record(&pair_row(stats, pair))
            .map_err(|e| export_error(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| export_error(path, e))?;

    let summary = ExportSummary {
        threshold,
        unfiltered: ranked.len(),
        written,
        detail_rows: 0,
        outcome: if written < ranked.len() {
            ExportOutcome::EarlyStopped
        } else {
            ExportOutcome::Exhausted
        },
    };
    info!(
        destination = %path.display(),
        threshold,
        unfiltered = summary.unfiltered,
        written,
        outcome = ?summary.outcome,
        "pair csv exported"
    );
    Ok(summary)
}

/// Export every scored pair
pub fn export_all_pairs<P: AsRef<Path>>(stats: &PairStatistics, path: P) -> Result<ExportSummary> {
    export_pairs(stats, stats.min_score(), path)
}
