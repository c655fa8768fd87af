use tracing::debug;

use crate::{
    bank::{PairStatisticsBuilder, ScoreType, UnorderedTermPair},
    scoring::{score_types, PairScorer},
};

/// Scores a pair by its raw co-occurrence count
#[derive(Debug, Default, Clone, Copy)]
pub struct PairFrequencyScorer;

impl PairScorer for PairFrequencyScorer {
    fn score_type(&self) -> ScoreType {
        score_types::pair_frequency()
    }

    fn compute_scores(&self, stats: &mut PairStatisticsBuilder) {
        let scores: Vec<(UnorderedTermPair, f64)> = stats
            .observed_pairs()
            .map(|pair| (pair.clone(), stats.pair_frequency(pair) as f64))
            .collect();
        debug!(pairs = scores.len(), "pair frequency scores computed");
        for (pair, score) in scores {
            stats.set_score(&pair, score);
        }
    }
}

/// Dice coefficient over document frequencies:
/// `2 * df(a, b) / (df(a) + df(b))`, in `[0, 1]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DicePairScorer;

impl PairScorer for DicePairScorer {
    fn score_type(&self) -> ScoreType {
        score_types::dice()
    }

    fn compute_scores(&self, stats: &mut PairStatisticsBuilder) {
        let scores: Vec<(UnorderedTermPair, f64)> = stats
            .observed_pairs()
            .map(|pair| {
                let joint = stats.pair_document_frequency(pair) as f64;
                let marginal = (stats.term_document_frequency(pair.term0())
                    + stats.term_document_frequency(pair.term1())) as f64;
                let dice = if marginal > 0.0 { 2.0 * joint / marginal } else { 0.0 };
                (pair.clone(), dice)
            })
            .collect();
        debug!(pairs = scores.len(), "dice scores computed");
        for (pair, score) in scores {
            stats.set_score(&pair, score);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::bank::{DocumentIdentifier, Term};

    fn term(s: &str) -> Term {
        Term::new(s, "", "SingleWord")
    }

    fn doc(id: &str) -> DocumentIdentifier {
        DocumentIdentifier::new(id, 0)
    }

    fn builder(scorer: &dyn PairScorer) -> PairStatisticsBuilder {
        let mut stats = PairStatisticsBuilder::new(scorer.score_type());
        let xy = UnorderedTermPair::new(term("x"), term("y"));
        for d in ["d1", "d2"] {
            stats.record_term_document(&term("x"), &doc(d));
            stats.record_term_document(&term("y"), &doc(d));
        }
        stats.record_term_document(&term("x"), &doc("d3"));
        stats.record_cooccurrence(&xy, &doc("d1"));
        stats.record_cooccurrence(&xy, &doc("d1"));
        stats.record_cooccurrence(&xy, &doc("d2"));
        stats
    }

    #[test]
    fn frequency_scores_raw_counts() {
        let mut stats = builder(&PairFrequencyScorer);
        PairFrequencyScorer.compute_scores(&mut stats);
        let stats = stats.finalize();
        let xy = UnorderedTermPair::new(term("y"), term("x"));
        assert_eq!(stats.score(&xy), 3.0);
        assert_eq!(stats.score_type().name(), "pairFrequency");
    }

    #[test]
    fn dice_uses_document_frequencies() {
        let mut stats = builder(&DicePairScorer);
        DicePairScorer.compute_scores(&mut stats);
        let xy = UnorderedTermPair::new(term("x"), term("y"));
        // df(x,y) = 2, df(x) = 3, df(y) = 2
        assert_relative_eq!(stats.score(&xy), 0.8);
    }
}
