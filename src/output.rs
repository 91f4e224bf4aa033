//! Output serialization for mining results
//!
//! JSON carries the full (optionally verbatim-nested) structure. CSV/TSV
//! flatten the phrase map to one row per (path, phrase) with the supporting
//! record IDs joined by `;`; phrases and paths are alphanumeric words, dots,
//! and stars, so no field quoting is needed. Verbatim output is JSON-only —
//! verbatim text is arbitrary and does not survive naive delimiting.

use crate::miner::MineOutput;
use std::io::{self, Write};

/// Separator for record-ID lists inside a single delimited cell
pub const ID_JOIN: &str = ";";

/// Pretty-printed JSON for the whole result
pub fn to_json(output: &MineOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Write the phrase map as delimiter-separated rows with a header
///
/// One row per (path, phrase); the verbatim layer, if present, is ignored.
pub fn write_delimited<W: Write>(
    output: &MineOutput,
    writer: &mut W,
    delimiter: char,
) -> io::Result<()> {
    writeln!(writer, "path{}phrase{}tinyIds", delimiter, delimiter)?;
    for (path, phrases) in &output.phrases {
        for (phrase, ids) in phrases {
            writeln!(
                writer,
                "{}{}{}{}{}",
                path,
                delimiter,
                phrase,
                delimiter,
                ids.join(ID_JOIN)
            )?;
        }
    }
    Ok(())
}

/// CSV convenience wrapper
pub fn write_csv<W: Write>(output: &MineOutput, writer: &mut W) -> io::Result<()> {
    write_delimited(output, writer, ',')
}

/// TSV convenience wrapper
pub fn write_tsv<W: Write>(output: &MineOutput, writer: &mut W) -> io::Result<()> {
    write_delimited(output, writer, '\t')
}
