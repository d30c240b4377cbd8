//! CSV import of the reference lexicon
//!
//! Expected headers (case-insensitive): `Word`, `Level`,
//! `Age_Of_Acquisition`, `Log_Freq_HAL`, `Concreteness_Rating`,
//! `Definitions`. Definitions are separated by `;`.

use std::collections::HashSet;
use std::io::Read;

use crate::error::Result;
use crate::store::StoreError;

use super::models::LexicalEntry;

const DEFINITION_SEPARATOR: char = ';';

/// Outcome of parsing a lexicon table
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub entries: Vec<LexicalEntry>,
    pub skipped_rows: usize,
    pub duplicate_rows: usize,
}

struct Columns {
    word: usize,
    level: Option<usize>,
    aoa: Option<usize>,
    frequency: Option<usize>,
    concreteness: Option<usize>,
    definitions: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Option<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Some(Self {
            word: find(&["word"])?,
            level: find(&["level"]),
            aoa: find(&["age_of_acquisition", "aoa"]),
            frequency: find(&["log_freq_hal", "log_frequency"]),
            concreteness: find(&["concreteness_rating", "concreteness"]),
            definitions: find(&["definitions", "definition"]),
        })
    }
}

fn cell<'a>(record: &'a csv::StringRecord, col: Option<usize>) -> Option<&'a str> {
    col.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn number(record: &csv::StringRecord, col: Option<usize>) -> Option<f64> {
    cell(record, col)
        .and_then(|s| s.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a lexicon table. The first occurrence of a word wins.
pub fn parse_lexicon_csv<R: Read>(reader: R) -> Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(StoreError::from)?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let columns = Columns::from_headers(&headers).ok_or_else(|| {
        StoreError::InvalidLexicon("missing required 'Word' column".to_string())
    })?;

    let mut report = ImportReport::default();
    let mut seen = HashSet::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping unreadable lexicon row {}: {}", row_idx + 2, e);
                report.skipped_rows += 1;
                continue;
            }
        };

        let word = match cell(&record, Some(columns.word)) {
            Some(w) => w.to_string(),
            None => {
                log::warn!("Skipping lexicon row {} without a word", row_idx + 2);
                report.skipped_rows += 1;
                continue;
            }
        };

        if !seen.insert(word.clone()) {
            report.duplicate_rows += 1;
            continue;
        }

        let definitions = cell(&record, columns.definitions)
            .map(|d| {
                d.split(DEFINITION_SEPARATOR)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        report.entries.push(LexicalEntry {
            word,
            level: cell(&record, columns.level).unwrap_or_default().to_string(),
            age_of_acquisition: number(&record, columns.aoa),
            log_frequency: number(&record, columns.frequency),
            concreteness: number(&record, columns.concreteness),
            definitions,
        });
    }

    log::info!(
        "Parsed lexicon: {} entries, {} skipped rows, {} duplicates",
        report.entries.len(),
        report.skipped_rows,
        report.duplicate_rows
    );

    Ok(report)
}
