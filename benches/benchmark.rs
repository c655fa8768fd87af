use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use termbank::{
    build_term_statistics, export_terms, AnnotatedDocument, FrequencyScorer, TermAnnotation, TermbankConfig,
    TfIdfScorer,
};

// Deterministic synthetic corpus with a skewed vocabulary
fn synthetic_corpus(documents: usize, terms_per_document: usize) -> Vec<AnnotatedDocument> {
    (0..documents)
        .map(|d| {
            let annotations = (0..terms_per_document)
                .map(|p| {
                    let rank = (d * 31 + p * 17) % 997;
                    let surface = format!("term{}", rank * rank % 2003);
                    TermAnnotation::new("SingleWord", &surface, p)
                })
                .collect::<Vec<_>>();
            let mut doc = AnnotatedDocument::new(&format!("doc{d}"));
            doc.annotations = annotations;
            doc
        })
        .collect()
}

fn aggregation_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(500, 400);
    let config = TermbankConfig::default();

    c.bench_function("build_term_statistics_frequency", |b| {
        b.iter(|| build_term_statistics(&corpus, &config, &mut FrequencyScorer::new()).unwrap())
    });
    c.bench_function("build_term_statistics_tfidf", |b| {
        b.iter(|| build_term_statistics(&corpus, &config, &mut TfIdfScorer::new()).unwrap())
    });
}

fn ranking_and_export_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(500, 400);
    let config = TermbankConfig::default();

    // ranking is cached per store, so each iteration needs a fresh one
    c.bench_function("terms_by_descending_score", |b| {
        b.iter_batched(
            || build_term_statistics(&corpus, &config, &mut FrequencyScorer::new()).unwrap(),
            |stats| stats.terms_by_descending_score().len(),
            BatchSize::LargeInput,
        )
    });

    let stats = build_term_statistics(&corpus, &config, &mut FrequencyScorer::new()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terms.csv");
    c.bench_function("export_terms_with_details", |b| {
        b.iter(|| export_terms(&stats, stats.min_score(), &path, true).unwrap())
    });
}

criterion_group!(benches, aggregation_benchmark, ranking_and_export_benchmark);
criterion_main!(benches);
