use std::{env, process::ExitCode, time::Instant};

use termbank::{
    build_pair_statistics, build_term_statistics, export_all_pairs, export_all_terms, export_pairs, export_terms,
    AnnotatedDocument, DicePairScorer, DocumentFrequencyTable, FrequencyScorer, PairFrequencyScorer, PairScorer,
    TermScorer, TermbankConfig, TermbankError, TfIdfScorer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Args {
    input: String,
    output: String,
    pairs: Option<String>,
    reference: Option<String>,
    config: Option<String>,
    threshold: Option<f64>,
    pair_threshold: Option<f64>,
    details: bool,
    scorer: String,
    pair_scorer: String,
}

fn print_usage() {
    eprintln!("Usage: termbank --input DOCS.jsonl --output TERMS.csv [options]");
    eprintln!("  --pairs PAIRS.csv        also export co-occurring term pairs");
    eprintln!("  --threshold X            minimum default term score (default: lowest score)");
    eprintln!("  --pair-threshold X       minimum pair score (default: lowest score)");
    eprintln!("  --details                one extra row per document under each term");
    eprintln!("  --scorer frequency|tfidf");
    eprintln!("  --pair-scorer frequency|dice");
    eprintln!("  --reference REF.jsonl    reference corpus for tfidf document frequencies");
    eprintln!("  --config CONFIG.json");
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut args = env::args().skip(1);
    let mut input = None;
    let mut output = None;
    let mut parsed = Args {
        input: String::new(),
        output: String::new(),
        pairs: None,
        reference: None,
        config: None,
        threshold: None,
        pair_threshold: None,
        details: false,
        scorer: "frequency".to_string(),
        pair_scorer: "frequency".to_string(),
    };

    fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
        args.next().ok_or_else(|| format!("{flag} requires a value"))
    }
    fn number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64, String> {
        let v = value(args, flag)?;
        v.parse::<f64>().map_err(|_| format!("{flag} needs a number, got {v:?}"))
    }

    while let Some(a) = args.next() {
        match a.as_str() {
            "--input" => input = Some(value(&mut args, "--input")?),
            "--output" => output = Some(value(&mut args, "--output")?),
            "--pairs" => parsed.pairs = Some(value(&mut args, "--pairs")?),
            "--reference" => parsed.reference = Some(value(&mut args, "--reference")?),
            "--config" => parsed.config = Some(value(&mut args, "--config")?),
            "--threshold" => parsed.threshold = Some(number(&mut args, "--threshold")?),
            "--pair-threshold" => parsed.pair_threshold = Some(number(&mut args, "--pair-threshold")?),
            "--details" => parsed.details = true,
            "--scorer" => parsed.scorer = value(&mut args, "--scorer")?,
            "--pair-scorer" => parsed.pair_scorer = value(&mut args, "--pair-scorer")?,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    parsed.input = input.ok_or("--input is required")?;
    parsed.output = output.ok_or("--output is required")?;
    Ok(Some(parsed))
}

fn term_scorer(args: &Args, config: &TermbankConfig) -> Result<Box<dyn TermScorer>, TermbankError> {
    match args.scorer.as_str() {
        "frequency" => {
            if args.reference.is_some() {
                warn!("--reference only applies to the tfidf scorer, ignored");
            }
            Ok(Box::new(FrequencyScorer::new()))
        }
        "tfidf" => match &args.reference {
            Some(path) => {
                let documents = AnnotatedDocument::read_json_lines(path)?;
                let stats = build_term_statistics(&documents, config, &mut FrequencyScorer::new())?;
                let table = DocumentFrequencyTable::from_term_statistics(&stats);
                info!(documents = table.document_count(), terms = table.len(), "reference corpus loaded");
                Ok(Box::new(TfIdfScorer::with_reference(table)))
            }
            None => Ok(Box::new(TfIdfScorer::new())),
        },
        other => Err(TermbankError::InvalidConfig(format!("unknown scorer: {other}"))),
    }
}

fn pair_scorer(name: &str) -> Result<Box<dyn PairScorer>, TermbankError> {
    match name {
        "frequency" => Ok(Box::new(PairFrequencyScorer)),
        "dice" => Ok(Box::new(DicePairScorer)),
        other => Err(TermbankError::InvalidConfig(format!("unknown pair scorer: {other}"))),
    }
}

fn run(args: &Args) -> Result<(), TermbankError> {
    let start = Instant::now();
    let config = match &args.config {
        Some(path) => TermbankConfig::from_json_file(path)?,
        None => TermbankConfig::default(),
    };
    // resolve both scorers before any heavy work
    let mut scorer = term_scorer(args, &config)?;
    let pair_scorer = args.pairs.as_ref().map(|_| pair_scorer(&args.pair_scorer)).transpose()?;

    let documents = AnnotatedDocument::read_json_lines(&args.input)?;
    info!(documents = documents.len(), input = %args.input, "documents loaded");

    let stats = build_term_statistics(&documents, &config, scorer.as_mut())?;
    let summary = match args.threshold {
        Some(threshold) => export_terms(&stats, threshold, &args.output, args.details)?,
        None => export_all_terms(&stats, &args.output, args.details)?,
    };
    info!(written = summary.written, output = %args.output, "terms written");

    if let (Some(path), Some(pair_scorer)) = (&args.pairs, pair_scorer) {
        let pairs = build_pair_statistics(&documents, &config, pair_scorer.as_ref())?;
        let summary = match args.pair_threshold {
            Some(threshold) => export_pairs(&pairs, threshold, path)?,
            None => export_all_pairs(&pairs, path)?,
        };
        info!(written = summary.written, output = %path, "pairs written");
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("[error] {message}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, configuration = e.is_configuration_error(), "termbank failed");
            ExitCode::FAILURE
        }
    }
}
