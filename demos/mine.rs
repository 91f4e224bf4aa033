//! Mine recurring phrases from a corpus file
//!
//! Run with:
//!   cargo run --example mine -- corpus.json definition designation
//!   cargo run --example mine -- corpus.json.gz definition \
//!       --prune=per-id --min-ids=3 --format=tsv
//!
//! Set RUST_LOG=phrasemine=debug for pipeline logging.

use phrasemine::{Miner, MinerConfig, PruneStrategy, output, read_corpus};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut path = None;
    let mut config = MinerConfig::default();
    let mut format = "json".to_string();

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--min-words=") {
            config.min_words = parse_or_exit(value, &arg);
        } else if let Some(value) = arg.strip_prefix("--min-ids=") {
            config.min_ids = parse_or_exit(value, &arg);
        } else if let Some(value) = arg.strip_prefix("--prune=") {
            config.prune = match value.parse::<PruneStrategy>() {
                Ok(strategy) => strategy,
                Err(e) => exit_with(&e.to_string()),
            };
        } else if let Some(value) = arg.strip_prefix("--format=") {
            format = value.to_string();
        } else if arg == "--remove-stopwords" {
            config.remove_stopwords = true;
        } else if arg == "--no-lemmatize" {
            config.lemmatize = false;
        } else if arg == "--verbatim" {
            config.verbatim = true;
        } else if arg.starts_with("--") {
            exit_with(&format!("unknown option: {}", arg));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            config.field_names.push(arg);
        }
    }

    let Some(path) = path else {
        exit_with("usage: mine <corpus.json[.gz]> <field>... [options]");
    };

    let miner = match Miner::new(config) {
        Ok(miner) => miner,
        Err(e) => exit_with(&e.to_string()),
    };
    let records = match read_corpus(&path) {
        Ok(records) => records,
        Err(e) => exit_with(&e.to_string()),
    };
    eprintln!("mining {} records from {}", records.len(), path);

    let result = miner.mine(&records);
    let mut stdout = std::io::stdout().lock();
    let written = match format.as_str() {
        "json" => output::to_json(&result)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                use std::io::Write;
                writeln!(stdout, "{}", json).map_err(|e| e.to_string())
            }),
        "csv" => output::write_csv(&result, &mut stdout).map_err(|e| e.to_string()),
        "tsv" => output::write_tsv(&result, &mut stdout).map_err(|e| e.to_string()),
        other => Err(format!("unknown format: {}", other)),
    };
    if let Err(e) = written {
        exit_with(&e);
    }
}

fn parse_or_exit(value: &str, arg: &str) -> usize {
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => exit_with(&format!("invalid value in {}", arg)),
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
