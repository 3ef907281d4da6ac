//! Transcript input types.
//!
//! A transcript is an ordered sequence of rows, one speaker utterance each.
//! Row order is significant: it defines temporal precedence for the
//! question-resolution lookahead in the analysis engine.

use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::{LoadError, REQUIRED_COLUMNS};

/// One utterance from a meeting transcript.
///
/// Fields are kept verbatim from the source file; the engine copies
/// `speaker`/`timestamp` into every record it extracts without touching them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRow {
    /// Clock-style time marker, e.g. `"00:15"`. Not validated here; the
    /// stats aggregator degrades to a default duration when it cannot be
    /// parsed.
    pub timestamp: String,
    pub speaker: String,
    pub text: String,
}

impl TranscriptRow {
    pub fn new(
        timestamp: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Distinct speakers in order of first appearance.
///
/// Assignee inference iterates this roster front to back, so the order is
/// part of the documented behavior. Do not sort it.
pub fn speaker_roster(rows: &[TranscriptRow]) -> Vec<String> {
    let mut roster: Vec<String> = Vec::new();
    for row in rows {
        if !roster.iter().any(|s| s == &row.speaker) {
            roster.push(row.speaker.clone());
        }
    }
    roster
}
