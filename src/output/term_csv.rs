use std::path::Path;

use tracing::info;

use crate::{
    bank::{DocumentIdentifier, Term, TermStatistics},
    error::Result,
    output::{above_threshold, create_writer, export_error, ExportOutcome, ExportSummary},
};

pub const TOTAL_DOCS_MARKER: &str = "_TOTAL_DOCS_";

fn header(stats: &TermStatistics, include_document_detail: bool) -> Vec<String> {
    let mut row: Vec<String> = ["Term", "Lang", "Type"].iter().map(|s| s.to_string()).collect();
    row.extend(stats.score_types().map(|st| st.label().to_string()));
    if include_document_detail {
        row.push("documentID".to_string());
        row.push("termFrequency".to_string());
    }
    row
}

/// `_TOTAL_DOCS_` marker in the Lang column, document count under the first
/// score column; the Term column stays empty so the row never reads as a term.
fn summary_row(stats: &TermStatistics, width: usize) -> Vec<String> {
    let mut row = vec![String::new(); width];
    row[1] = TOTAL_DOCS_MARKER.to_string();
    row[3] = stats.document_count().to_string();
    row
}

fn term_columns(stats: &TermStatistics, term: &Term) -> Vec<String> {
    let mut row = vec![
        term.surface().to_string(),
        term.language_code().to_string(),
        term.term_type().to_string(),
    ];
    row.extend(stats.score_map(term).map(|(_, score)| score.to_string()));
    row
}

/// Write the terms of `stats` scoring at least `threshold` to `path`.
///
/// Rows follow the descending default-score ranking and the walk stops at the
/// first term below the threshold. With `include_document_detail`, every term
/// row is followed by one row per document the term occurred in, sorted by
/// document, carrying the document identifier and its corpus index.
///
/// `path` is created or truncated. On failure the partial file is left behind.
pub fn export_terms<P: AsRef<Path>>(
    stats: &TermStatistics,
    threshold: f64,
    path: P,
    include_document_detail: bool,
) -> Result<ExportSummary> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;

    let header = header(stats, include_document_detail);
    let width = header.len();
    writer.write_record(&header).map_err(|e| export_error(path, e))?;
    writer
        .write_record(&summary_row(stats, width))
        .map_err(|e| export_error(path, e))?;

    let ranked = stats.terms_by_descending_score();
    let mut written = 0;
    let mut detail_rows = 0;
    for term in above_threshold(ranked, threshold, |term| stats.default_score(term)) {
        let mut row = term_columns(stats, term);
        if include_document_detail {
            let columns = row.len();
            row.resize(width, String::new());
            writer.write_record(&row).map_err(|e| export_error(path, e))?;

            let mut documents: Vec<&DocumentIdentifier> = stats.documents_for_term(term).iter().collect();
            documents.sort();
            for document in documents {
                row.truncate(columns);
                row.push(document.identifier().to_string());
                row.push(document.index().to_string());
                writer.write_record(&row).map_err(|e| export_error(path, e))?;
                detail_rows += 1;
            }
        } else {
            writer.write_record(&row).map_err(|e| export_error(path, e))?;
        }
        written += 1;
    }
    writer.flush().map_err(|e| export_error(path, e))?;

    let summary = ExportSummary {
        threshold,
        unfiltered: ranked.len(),
        written,
        detail_rows,
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
        detail_rows,
        outcome = ?summary.outcome,
        "term csv exported"
    );
    Ok(summary)
}

/// Export every scored term
/// The threshold is the store's minimum default score.
pub fn export_all_terms<P: AsRef<Path>>(
    stats: &TermStatistics,
    path: P,
    include_document_detail: bool,
) -> Result<ExportSummary> {
    export_terms(stats, stats.min_score(), path, include_document_detail)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::bank::{ScoreType, TermStatisticsBuilder};

    fn stats() -> TermStatistics {
        let tf = ScoreType::with_label("tf", "Frequency");
        let df = ScoreType::with_label("df", "DocFrequency");
        let mut builder = TermStatisticsBuilder::new([tf.clone(), df.clone()]).unwrap();
        let term = Term::new("cell wall", "en", "MultiWord");
        builder.record_occurrence(&term, &DocumentIdentifier::new("b.txt", 1));
        builder.record_occurrence(&term, &DocumentIdentifier::new("a.txt", 0));
        builder.record_document(&DocumentIdentifier::new("c.txt", 2));
        builder.set_score(&tf, &term, 2.5);
        builder.set_score(&df, &term, 2.0);
        builder.finalize()
    }

    #[test]
    fn header_and_summary_share_width() {
        let stats = stats();
        assert_eq!(header(&stats, false), vec!["Term", "Lang", "Type", "Frequency", "DocFrequency"]);
        assert_eq!(header(&stats, true).len(), 7);
        assert_eq!(summary_row(&stats, 7), vec!["", "_TOTAL_DOCS_", "", "3", "", "", ""]);
    }

    #[test]
    fn detail_rows_are_sorted_by_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");
        let summary = export_terms(&stats(), 0.0, &path, true).unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(summary.detail_rows, 2);
        assert_eq!(summary.outcome, ExportOutcome::Exhausted);
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.split_terminator("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "Term,Lang,Type,Frequency,DocFrequency,documentID,termFrequency",
                ",_TOTAL_DOCS_,,3,,,",
                "cell wall,en,MultiWord,2.5,2,,",
                "cell wall,en,MultiWord,2.5,2,a.txt,0",
                "cell wall,en,MultiWord,2.5,2,b.txt,1",
            ]
        );
    }

    #[test]
    fn threshold_above_every_score_writes_no_terms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");
        let summary = export_terms(&stats(), 10.0, &path, false).unwrap();

        assert_eq!(summary.written, 0);
        assert_eq!(summary.unfiltered, 1);
        assert_eq!(summary.outcome, ExportOutcome::EarlyStopped);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    fn nan_stats() -> TermStatistics {
        let score = ScoreType::new("score");
        let mut builder = TermStatisticsBuilder::new([score.clone()]).unwrap();
        let negative_nan = f64::from_bits(f64::NAN.to_bits() | (1 << 63));
        for (i, (surface, value)) in [("A", 5.0), ("B", 3.0), ("D", 1.0), ("P", f64::NAN), ("N", negative_nan)]
            .into_iter()
            .enumerate()
        {
            let term = Term::new(surface, "", "SingleWord");
            builder.record_occurrence(&term, &DocumentIdentifier::new("d", i));
            builder.set_score(&score, &term, value);
        }
        builder.finalize()
    }

    fn written_terms(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .split_terminator("\r\n")
            .skip(2)
            .map(|line| line.split(',').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn nan_scores_pass_every_threshold() {
        let stats = nan_stats();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.csv");

        let summary = export_terms(&stats, 3.0, &path, false).unwrap();
        assert_eq!(written_terms(&path), vec!["N", "P", "A", "B"]);
        assert_eq!(summary.outcome, ExportOutcome::EarlyStopped);
        assert!(fs::read_to_string(&path).unwrap().contains("N,,SingleWord,NaN\r\n"));

        let summary = export_all_terms(&stats, &path, false).unwrap();
        assert_eq!(summary.threshold, 1.0);
        assert_eq!(summary.written, 5);
        assert_eq!(summary.outcome, ExportOutcome::Exhausted);
    }
}
