//! CSV transcript intake.
//!
//! Parses delimited transcript files into [`TranscriptRow`]s ahead of
//! analysis. The format is a header row with at least the columns
//! `timestamp`, `speaker`, `text` (matched case-insensitively, extra columns
//! ignored), followed by one utterance per record. Double-quoted fields may
//! contain commas, escaped quotes (`""`) and line breaks.
//!
//! Intake fails fast with a typed [`LoadError`]; the engine never sees a
//! partial or malformed row set.

use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::TranscriptRow;

/// Columns every transcript file must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "speaker", "text"];

/// Typed intake failure. Anything beyond file IO surfaces as one of these.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    /// Header parsed but no data records followed.
    #[error("the transcript file appears to be empty")]
    Empty,
    /// Header is missing one or more required columns.
    #[error("transcript is missing required columns: {0}")]
    MissingColumns(String),
    /// A data record lacks its speaker or text field entirely.
    #[error("invalid row at line {line}: missing {field} field")]
    InvalidRow { line: usize, field: &'static str },
}

/// Read and parse a transcript file.
pub fn load_path(path: &Path) -> Result<Vec<TranscriptRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {:?}", path))?;
    let rows = parse_str(&content)
        .with_context(|| format!("Failed to parse transcript file {:?}", path))?;
    Ok(rows)
}

/// Parse CSV content into transcript rows.
pub fn parse_str(content: &str) -> std::result::Result<Vec<TranscriptRow>, LoadError> {
    let records = split_records(content);
    let mut records = records.into_iter();

    let header = records.next();
    let data: Vec<Record> = records.collect();

    if data.is_empty() {
        return Err(LoadError::Empty);
    }

    // Missing columns are reported all at once, by name.
    let header = header.unwrap_or_default();
    let column_index = |name: &str| {
        header
            .fields
            .iter()
            .position(|f| f.to_lowercase() == name)
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| column_index(col).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing.join(", ")));
    }

    let timestamp_idx = column_index("timestamp").unwrap_or(0);
    let speaker_idx = column_index("speaker").unwrap_or(0);
    let text_idx = column_index("text").unwrap_or(0);

    let mut rows = Vec::with_capacity(data.len());
    for record in data {
        // Speaker and text are guaranteed to the engine; a record too short
        // to carry them is rejected rather than silently skipped.
        let speaker = record
            .fields
            .get(speaker_idx)
            .ok_or(LoadError::InvalidRow {
                line: record.line,
                field: "speaker",
            })?;
        let text = record.fields.get(text_idx).ok_or(LoadError::InvalidRow {
            line: record.line,
            field: "text",
        })?;
        // A short record may legitimately drop a trailing timestamp cell;
        // the duration fallback covers it downstream.
        let timestamp = record.fields.get(timestamp_idx).cloned().unwrap_or_default();

        rows.push(TranscriptRow {
            timestamp,
            speaker: speaker.clone(),
            text: text.clone(),
        });
    }

    debug!("Parsed {} transcript rows", rows.len());
    Ok(rows)
}

#[derive(Default)]
struct Record {
    /// 1-based line number where the record starts, for error reporting.
    line: usize,
    fields: Vec<String>,
}

/// Split CSV content into records, honoring double-quoted fields.
///
/// Blank records are skipped, matching the original intake behavior of
/// ignoring empty lines.
fn split_records(content: &str) -> Vec<Record> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        // Escaped quote inside a quoted field.
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, &mut fields, record_line);
                line += 1;
                record_line = line;
            }
            '\n' => {
                field.push('\n');
                line += 1;
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, &mut fields, record_line);
    }

    records
}

fn push_record(records: &mut Vec<Record>, fields: &mut Vec<String>, line: usize) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(Record {
            line,
            fields: std::mem::take(fields),
        });
    } else {
        fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_transcript() {
        let csv = "timestamp,speaker,text\n00:00,PM,Let's get started\n00:05,Eng1,Sounds good\n";
        let rows = parse_str(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], TranscriptRow::new("00:00", "PM", "Let's get started"));
        assert_eq!(rows[1].speaker, "Eng1");
    }

    #[test]
    fn test_header_case_insensitive() {
        let csv = "Timestamp,SPEAKER,Text\n00:00,PM,hello\n";
        let rows = parse_str(csv).unwrap();
        assert_eq!(rows[0].speaker, "PM");
    }

    #[test]
    fn test_extra_columns_ignored_and_reordered() {
        let csv = "speaker,notes,text,timestamp\nPM,ignored,we should ship,00:10\n";
        let rows = parse_str(csv).unwrap();

        assert_eq!(rows[0].timestamp, "00:10");
        assert_eq!(rows[0].speaker, "PM");
        assert_eq!(rows[0].text, "we should ship");
    }

    #[test]
    fn test_quoted_field_with_commas() {
        let csv = "timestamp,speaker,text\n00:00,PM,\"First, we plan. Then, we ship.\"\n";
        let rows = parse_str(csv).unwrap();
        assert_eq!(rows[0].text, "First, we plan. Then, we ship.");
    }

    #[test]
    fn test_quoted_field_with_escaped_quote_and_newline() {
        let csv = "timestamp,speaker,text\n00:00,PM,\"He said \"\"done\"\"\nand left\"\n00:01,QA,ok\n";
        let rows = parse_str(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "He said \"done\"\nand left");
        assert_eq!(rows[1].speaker, "QA");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "timestamp,speaker,text\n\n00:00,PM,hello\n\n\n00:01,QA,hi\n";
        let rows = parse_str(csv).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let csv = "timestamp,speaker,text\r\n00:00,PM,hello\r\n";
        let rows = parse_str(csv).unwrap();
        assert_eq!(rows[0].text, "hello");
    }

    #[test]
    fn test_empty_content_rejected() {
        assert_eq!(parse_str(""), Err(LoadError::Empty));
    }

    #[test]
    fn test_header_only_rejected() {
        assert_eq!(parse_str("timestamp,speaker,text\n"), Err(LoadError::Empty));
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let err = parse_str("timestamp,who,said\n00:00,PM,hello\n").unwrap_err();
        assert_eq!(err, LoadError::MissingColumns("speaker, text".to_string()));
    }

    #[test]
    fn test_short_row_rejected() {
        let csv = "timestamp,speaker,text\n00:00,PM\n";
        let err = parse_str(csv).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidRow {
                line: 2,
                field: "text"
            }
        );
    }

    #[test]
    fn test_missing_trailing_timestamp_defaults_empty() {
        // Timestamp is the last column here, so a two-field record still
        // carries speaker and text.
        let csv = "speaker,text,timestamp\nPM,we need to ship\n";
        let rows = parse_str(csv).unwrap();

        assert_eq!(rows[0].timestamp, "");
        assert_eq!(rows[0].text, "we need to ship");
    }

    #[test]
    fn test_load_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.csv");
        std::fs::write(&path, "timestamp,speaker,text\n00:00,PM,kickoff\n").unwrap();

        let rows = load_path(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].speaker, "PM");
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = load_path(Path::new("/nonexistent/meeting.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_bom_stripped() {
        let csv = "\u{feff}timestamp,speaker,text\n00:00,PM,hello\n";
        let rows = parse_str(csv).unwrap();
        assert_eq!(rows[0].timestamp, "00:00");
    }
}
