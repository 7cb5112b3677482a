//! Flat-file record codec.
//!
//! # Responsibility
//! - Encode event rows into the tabular on-disk layout
//!   (`Date,Event,Type,Severity,Notes`).
//! - Decode stored records back into rows, reporting per-record failures
//!   instead of aborting the whole document.
//!
//! # Invariants
//! - Fields containing separators, quotes or line breaks are quoted with
//!   doubled inner quotes; notes may span multiple physical lines.
//! - `decode_record(encode_row(row))` is identity for any valid row.

use crate::model::event::{EventCategory, EventRow, Severity};
use crate::model::timestamp::EntryTimestamp;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column header of every store file, fixed order.
pub const HEADER: &str = "Date,Event,Type,Severity,Notes";

const FIELD_COUNT: usize = 5;

/// Renders one row as a single record line (no trailing newline).
pub(crate) fn encode_row(row: &EventRow) -> String {
    [
        encode_field(&row.timestamp.to_string()),
        encode_field(&row.event_name),
        encode_field(row.category.as_str()),
        encode_field(&row.severity.to_string()),
        encode_field(&row.note),
    ]
    .join(",")
}

/// Renders a full document: header plus one record per row, in order.
pub(crate) fn encode_document(rows: &[EventRow]) -> String {
    let mut document = String::with_capacity(HEADER.len() + rows.len() * 48);
    document.push_str(HEADER);
    document.push('\n');
    for row in rows {
        document.push_str(&encode_row(row));
        document.push('\n');
    }
    document
}

fn encode_field(value: &str) -> String {
    if !value.contains([',', '"', '\n', '\r']) {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Splits raw file content into records of raw fields.
///
/// Quoted fields may contain separators and line breaks; blank physical
/// lines between records are skipped.
pub(crate) fn parse_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                finish_record(&mut records, &mut record, &mut field);
            }
            '\n' => finish_record(&mut records, &mut record, &mut field),
            _ => field.push(ch),
        }
    }
    finish_record(&mut records, &mut record, &mut field);

    records
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

/// Whether a parsed record is the column header line.
pub(crate) fn is_header(record: &[String]) -> bool {
    record
        .first()
        .is_some_and(|first| first.trim().eq_ignore_ascii_case("Date"))
}

/// Decodes one record into a row.
///
/// Unknown `Type` values decode as `Other`; the category is re-derived on
/// the next reconciliation anyway, so a drifted spelling is not worth
/// dropping the row over. Timestamp and severity failures are.
pub(crate) fn decode_record(record: &[String]) -> Result<EventRow, RecordDecodeError> {
    if record.len() != FIELD_COUNT {
        return Err(RecordDecodeError::ColumnCount {
            found: record.len(),
        });
    }

    let timestamp =
        EntryTimestamp::parse(&record[0]).map_err(|err| RecordDecodeError::Timestamp {
            value: err.value,
        })?;

    let severity = record[3]
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|raw| Severity::new(raw).ok())
        .ok_or_else(|| RecordDecodeError::Severity {
            value: record[3].clone(),
        })?;

    let category = EventCategory::parse(record[2].trim()).unwrap_or(EventCategory::Other);

    Ok(EventRow {
        timestamp,
        event_name: record[1].clone(),
        category,
        severity,
        note: record[4].clone(),
    })
}

/// Per-record decode failure, reported and skipped by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordDecodeError {
    ColumnCount { found: usize },
    Timestamp { value: String },
    Severity { value: String },
}

impl Display for RecordDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnCount { found } => {
                write!(f, "expected {FIELD_COUNT} columns, found {found}")
            }
            Self::Timestamp { value } => write!(f, "unparseable timestamp `{value}`"),
            Self::Severity { value } => write!(f, "unparseable severity `{value}`"),
        }
    }
}

impl Error for RecordDecodeError {}

#[cfg(test)]
mod tests {
    use super::{decode_record, encode_document, encode_row, is_header, parse_records};
    use crate::model::event::{EventCategory, EventRow, Severity};
    use crate::model::timestamp::EntryTimestamp;

    fn sample_row(note: &str) -> EventRow {
        EventRow {
            timestamp: EntryTimestamp::parse("2025-03-14 09:26").expect("fixed timestamp"),
            event_name: "Fatigue".to_string(),
            category: EventCategory::Symptom,
            severity: Severity::new(7).expect("valid severity"),
            note: note.to_string(),
        }
    }

    #[test]
    fn plain_row_round_trips() {
        let row = sample_row("slept badly");
        let records = parse_records(&encode_row(&row));
        assert_eq!(records.len(), 1);
        assert_eq!(decode_record(&records[0]).expect("decode"), row);
    }

    #[test]
    fn quoting_round_trips_commas_quotes_and_newlines() {
        let row = sample_row("worse after \"hot\" bath,\nthen stairs");
        let encoded = encode_row(&row);
        let records = parse_records(&encoded);
        assert_eq!(records.len(), 1);
        assert_eq!(decode_record(&records[0]).expect("decode"), row);
    }

    #[test]
    fn document_includes_header_once_and_all_rows() {
        let rows = vec![sample_row("a"), sample_row("b")];
        let document = encode_document(&rows);
        let records = parse_records(&document);
        assert_eq!(records.len(), 3);
        assert!(is_header(&records[0]));
        assert!(!is_header(&records[1]));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let records = parse_records("2025-03-14 09:26,Fatigue,Symptom,7,note\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 5);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = parse_records("a,b\n\n\nc,d\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let records = parse_records("2025-03-14 09:26,Fatigue,Symptom,7\n");
        let err = decode_record(&records[0]).expect_err("four columns must fail");
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn unknown_category_decodes_as_other() {
        let records = parse_records("2025-03-14 09:26,Fatigue,Mystery,7,\n");
        let row = decode_record(&records[0]).expect("row should decode");
        assert_eq!(row.category, EventCategory::Other);
    }

    #[test]
    fn out_of_range_severity_is_rejected() {
        let records = parse_records("2025-03-14 09:26,Fatigue,Symptom,12,\n");
        let err = decode_record(&records[0]).expect_err("severity 12 must fail");
        assert!(err.to_string().contains("severity"));
    }
}
