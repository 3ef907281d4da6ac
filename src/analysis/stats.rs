//! Meeting-level statistics and per-speaker participation counts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::analysis::types::{ActionItem, Decision, MeetingStats, ParticipationMetrics, Question};
use crate::transcript::TranscriptRow;

/// Returned whenever either boundary timestamp fails to parse.
pub const DEFAULT_DURATION_MINUTES: i64 = 45;

/// Minutes between two `H:MM`-style clock values. Parse trouble on either
/// side falls back to [`DEFAULT_DURATION_MINUTES`]; this never errors.
pub fn duration_minutes(start: &str, end: &str) -> i64 {
    match (clock_minutes(start), clock_minutes(end)) {
        (Some(start_total), Some(end_total)) => end_total - start_total,
        _ => {
            debug!(
                "Could not parse timestamps '{start}' / '{end}', using {DEFAULT_DURATION_MINUTES}-minute default"
            );
            DEFAULT_DURATION_MINUTES
        }
    }
}

/// A clock value as absolute minutes. Takes the first two `:`-separated
/// segments; anything past them (seconds) is ignored.
fn clock_minutes(value: &str) -> Option<i64> {
    let mut parts = value.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Build the meeting-level stats from the rows and the extracted records.
///
/// An empty transcript yields all-zero stats. The word count uses a
/// single-space split, so consecutive spaces inflate it; downstream
/// consumers expect that historical behavior.
pub fn meeting_stats(
    rows: &[TranscriptRow],
    action_items: &[ActionItem],
    questions: &[Question],
) -> MeetingStats {
    let start = rows.first().map_or("00:00", |row| row.timestamp.as_str());
    let end = rows.last().map_or("00:00", |row| row.timestamp.as_str());

    let speaker_count = crate::transcript::speaker_roster(rows).len();
    let addressed = questions.iter().filter(|q| q.addressed).count();

    let action_item_ratio = if rows.is_empty() {
        0.0
    } else {
        action_items.len() as f64 / rows.len() as f64
    };
    let questions_addressed_ratio = addressed as f64 / questions.len().max(1) as f64;

    MeetingStats {
        duration: duration_minutes(start, end),
        speaker_count,
        total_messages: rows.len(),
        action_item_ratio,
        questions_addressed_ratio,
    }
}

/// Tally messages, words, action items, and decisions per speaker. Map
/// keys are speaker names verbatim.
pub fn participation(
    rows: &[TranscriptRow],
    action_items: &[ActionItem],
    decisions: &[Decision],
) -> ParticipationMetrics {
    let mut message_count_by_user: BTreeMap<String, usize> = BTreeMap::new();
    let mut word_count_by_user: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        *message_count_by_user.entry(row.speaker.clone()).or_insert(0) += 1;
        *word_count_by_user.entry(row.speaker.clone()).or_insert(0) +=
            row.text.split(' ').count();
    }

    ParticipationMetrics {
        message_count_by_user,
        word_count_by_user,
        action_items_by_user: count_by_speaker(action_items.iter().map(|a| a.speaker.as_str())),
        decisions_by_user: count_by_speaker(decisions.iter().map(|d| d.speaker.as_str())),
    }
}

fn count_by_speaker<'a>(speakers: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for speaker in speakers {
        *counts.entry(speaker.to_string()).or_insert(0) += 1;
    }
    counts
}
