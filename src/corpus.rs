//! Corpus loading
//!
//! A corpus file is a JSON array of record objects, optionally
//! gzip-compressed. Each object must carry a non-empty string `tinyId`;
//! objects without one are logged and skipped rather than aborting the
//! batch. Parsing preserves the document order of object keys, so traversal
//! of each loaded record is reproducible.

use crate::record::{Node, Record};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Key carrying the record identifier in corpus objects
pub const ID_FIELD: &str = "tinyId";

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corpus root must be a JSON array of record objects")]
    NotAnArray,
}

/// Load records from a corpus file; `.gz` paths are decompressed on the fly
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<Record>, CorpusError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text)?;
    }
    records_from_json(&text)
}

/// Parse records from in-memory JSON text
pub fn records_from_json(text: &str) -> Result<Vec<Record>, CorpusError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(CorpusError::NotAnArray);
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match extract_id(&item) {
            Some(id) => records.push(Record::new(id, Node::from_json(item))),
            None => warn!(index, "skipping record without {}", ID_FIELD),
        }
    }
    Ok(records)
}

fn extract_id(item: &Value) -> Option<String> {
    match item.get(ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const CORPUS: &str = r#"[
        {"tinyId": "C1", "definition": "heart failure treatment"},
        {"tinyId": "C2", "definition": "heart failure"},
        {"definition": "no identifier"},
        {"tinyId": "", "definition": "empty identifier"}
    ]"#;

    #[test]
    fn test_records_from_json_skips_missing_ids() {
        let records = records_from_json(CORPUS).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tiny_id, "C1");
        assert_eq!(records[1].tiny_id, "C2");
        assert_eq!(
            records[1].root.get("definition").unwrap().as_str(),
            Some("heart failure")
        );
    }

    #[test]
    fn test_non_array_root_is_an_error() {
        assert!(matches!(
            records_from_json(r#"{"tinyId": "C1"}"#),
            Err(CorpusError::NotAnArray)
        ));
        assert!(matches!(
            records_from_json("not json"),
            Err(CorpusError::Json(_))
        ));
    }

    #[test]
    fn test_read_corpus_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        std::fs::write(&path, CORPUS).unwrap();

        let records = read_corpus(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_corpus_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(CORPUS.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records = read_corpus(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_corpus("/nonexistent/corpus.json"),
            Err(CorpusError::Io(_))
        ));
    }
}
