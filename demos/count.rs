//! Count populated fields across a corpus
//!
//! Run with:
//!   cargo run --example count -- corpus.json definition designation
//!   cargo run --example count -- corpus.json definition \
//!       --group-by=stewardOrg --types
//!
//! Counts are grouped per record, so a field is attributed to the grouping
//! value of the record it occurs in.

use phrasemine::count::{
    CountConfig, GroupBy, GroupKind, ValueMatch, count_matching_fields,
    count_matching_fields_by_type,
};
use phrasemine::read_corpus;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut path = None;
    let mut config = CountConfig::default();
    let mut group_kind = GroupKind::TopLevel;
    let mut group_key = None;
    let mut typed = false;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--group-by=") {
            group_key = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--group-kind=") {
            group_kind = match value {
                "top" => GroupKind::TopLevel,
                "path" => GroupKind::PathContains,
                "terminal" => GroupKind::Terminal,
                other => exit_with(&format!("unknown group kind: {}", other)),
            };
        } else if let Some(value) = arg.strip_prefix("--fixed=") {
            config.value_match = ValueMatch::Fixed(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--regex=") {
            config.value_match = match regex::Regex::new(value) {
                Ok(regex) => ValueMatch::Pattern(regex),
                Err(e) => exit_with(&e.to_string()),
            };
        } else if arg == "--null" {
            config.value_match = ValueMatch::Null;
        } else if arg == "--types" {
            typed = true;
        } else if arg.starts_with("--") {
            exit_with(&format!("unknown option: {}", arg));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            config.field_names.push(arg);
        }
    }

    let Some(path) = path else {
        exit_with("usage: count <corpus.json[.gz]> <field>... [options]");
    };
    config.group_by = group_key.map(|key| GroupBy {
        key,
        kind: group_kind,
    });

    let records = match read_corpus(&path) {
        Ok(records) => records,
        Err(e) => exit_with(&e.to_string()),
    };
    eprintln!("counting over {} records from {}", records.len(), path);

    let json = if typed {
        count_matching_fields_by_type(&records, &config)
            .map_err(|e| e.to_string())
            .and_then(|counts| serde_json::to_string_pretty(&counts).map_err(|e| e.to_string()))
    } else {
        count_matching_fields(&records, &config)
            .map_err(|e| e.to_string())
            .and_then(|counts| serde_json::to_string_pretty(&counts).map_err(|e| e.to_string()))
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with(&e),
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
