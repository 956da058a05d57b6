//! CSV parsing into [`RawRow`]s.
//!
//! The first record names the columns; header names are trimmed, cells are
//! not. An empty cell, or one a short row never reaches, is null. A cell of
//! only spaces is a value. Extra trailing cells are ignored, and blank lines
//! are skipped by the reader without producing a row.

use csv::{ReaderBuilder, StringRecord, Trim};
use dashfeed_core::RawRow;

/// A parsed CSV source: its header row and every data row after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parse UTF-8, comma-separated bytes with a header row.
///
/// Fails on structural problems the reader reports, such as invalid UTF-8.
pub fn parse_csv(bytes: &[u8]) -> Result<ParsedTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_row(&headers, &record?));
    }

    Ok(ParsedTable { headers, rows })
}

fn to_row(headers: &[String], record: &StringRecord) -> RawRow {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let value = record.get(idx).filter(|v| !v.is_empty());
            (header.as_str(), value)
        })
        .collect()
}
