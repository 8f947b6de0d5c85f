//! Decoder for the published sheet's CSV export.
//!
//! The sheet is an external, partially trusted source: rows that do not
//! carry a usable id, text and reference are dropped silently so that one
//! bad row never aborts a load. [`decode_with_report`] exposes counters for
//! diagnostics without changing what is returned.
//!
//! Every physical line is one row. Quoted fields may hold commas and `""`
//! escapes but never a line break, so an unbalanced quote only costs its
//! own line.

use csv::{ReaderBuilder, StringRecord, Trim};
use shared::domain::{SheetLayout, VerseId, VerseRecord};
use thiserror::Error;
use tracing::debug;

const REQUIRED_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Id,
    Text,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewColumns { found: usize },
    MissingRequired(RequiredField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDecode {
    Verse(VerseRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub rows_seen: usize,
    pub rows_kept: usize,
    pub too_few_columns: usize,
    pub missing_required: usize,
    pub unreadable: usize,
}

impl DecodeReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_seen - self.rows_kept
    }
}

/// Decodes a sheet laid out as `id, text, reference, reflection 1, reflection 2`.
pub fn decode(raw: &str) -> Vec<VerseRecord> {
    decode_with_layout(raw, SheetLayout::Reflections)
}

pub fn decode_with_layout(raw: &str, layout: SheetLayout) -> Vec<VerseRecord> {
    decode_with_report(raw, layout).0
}

pub fn decode_with_report(raw: &str, layout: SheetLayout) -> (Vec<VerseRecord>, DecodeReport) {
    let mut report = DecodeReport::default();
    let mut verses = Vec::new();

    // `lines` splits on both `\n` and `\r\n`; the first line is the header.
    for (index, line) in raw.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        report.rows_seen += 1;

        let record = match tokenize_line(line) {
            Ok(record) => record,
            Err(err) => {
                debug!(line = index + 1, "skipping unreadable csv row: {err}");
                report.unreadable += 1;
                continue;
            }
        };

        match decode_record(&record, layout) {
            RowDecode::Verse(verse) => {
                report.rows_kept += 1;
                verses.push(verse);
            }
            RowDecode::Skipped(SkipReason::TooFewColumns { .. }) => report.too_few_columns += 1,
            RowDecode::Skipped(SkipReason::MissingRequired(_)) => report.missing_required += 1,
        }
    }

    (verses, report)
}

#[derive(Debug, Error)]
enum LineError {
    #[error("quoted field is never closed")]
    UnclosedQuote,
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Tokenizes a single physical line. A malformed line can only drop itself.
fn tokenize_line(line: &str) -> Result<StringRecord, LineError> {
    let line = normalize_quotes(line).ok_or(LineError::UnclosedQuote)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    Ok(reader.records().next().transpose()?.unwrap_or_default())
}

/// Drops whitespace between a delimiter and an opening quote, and between
/// a closing quote and the next delimiter, so `1, "a, b", c` reads as three
/// fields. Returns `None` when a quoted field is still open at end of line.
fn normalize_quotes(line: &str) -> Option<String> {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            out.push(c);
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    out.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    while chars.next_if(|next| next.is_whitespace()).is_some() {}
                }
            }
            continue;
        }
        match c {
            ',' => {
                out.push(c);
                field_start = true;
            }
            c if field_start && c.is_whitespace() => {}
            '"' if field_start => {
                out.push(c);
                in_quotes = true;
                field_start = false;
            }
            c => {
                out.push(c);
                field_start = false;
            }
        }
    }

    (!in_quotes).then_some(out)
}

fn decode_record(record: &StringRecord, layout: SheetLayout) -> RowDecode {
    let fields: Vec<&str> = record.iter().collect();
    decode_row(&fields, layout)
}

/// Maps one tokenized row onto the layout's schema.
pub fn decode_row(fields: &[&str], layout: SheetLayout) -> RowDecode {
    // An all-blank row tokenizes to a single empty field; count it as zero columns.
    let found = match fields {
        [only] if only.trim().is_empty() => 0,
        _ => fields.len(),
    };
    if found < REQUIRED_COLUMNS {
        return RowDecode::Skipped(SkipReason::TooFewColumns { found });
    }

    let id = fields[0].trim();
    let text = fields[1].trim();
    let reference = fields[2].trim();
    for (value, field) in [
        (id, RequiredField::Id),
        (text, RequiredField::Text),
        (reference, RequiredField::Reference),
    ] {
        if value.is_empty() {
            return RowDecode::Skipped(SkipReason::MissingRequired(field));
        }
    }

    let optional = |index: usize| fields.get(index).map(|value| value.trim().to_string());
    let mut verse = VerseRecord {
        id: VerseId(id.to_string()),
        text: text.to_string(),
        reference: reference.to_string(),
        reflection_primary: None,
        reflection_secondary: None,
        comment: None,
    };
    match layout {
        SheetLayout::Reflections => {
            verse.reflection_primary = optional(3);
            verse.reflection_secondary = optional(4);
        }
        SheetLayout::Comment => {
            verse.comment = optional(3);
        }
    }

    RowDecode::Verse(verse)
}

#[cfg(test)]
#[path = "tests/csv_decoder_tests.rs"]
mod tests;
