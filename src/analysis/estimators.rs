//! Secondary-attribute estimators for extracted records.
//!
//! Each estimator is a pure function of its record's source text (plus the
//! row set for the lookahead check). Unlike the classifier rules, these
//! take the original text and lower-case it themselves.

use regex::Regex;
use std::sync::OnceLock;

use crate::analysis::types::{ImpactLevel, Priority, QuestionCategory};
use crate::transcript::TranscriptRow;

/// How many rows after a question are scanned for an answer.
pub const LOOKAHEAD_ROWS: usize = 5;

/// Words this short carry no signal for the addressed check.
const SIGNIFICANT_WORD_LEN: usize = 4;

/// Matching words required before a later row counts as an answer
/// (capped by how many significant words the question has).
const ADDRESSED_MATCH_FLOOR: usize = 2;

const PRIORITY_TIERS: &[(Priority, &[&str])] = &[
    (Priority::High, &["urgent", "critical", "asap", "immediately"]),
    (Priority::Medium, &["soon", "next sprint", "important"]),
];

const IMPACT_TIERS: &[(ImpactLevel, &[&str])] = &[
    (ImpactLevel::High, &["critical", "major", "significant"]),
    (ImpactLevel::Medium, &["important", "substantial"]),
];

const CATEGORY_TIERS: &[(QuestionCategory, &[&str])] = &[
    (QuestionCategory::Bug, &["bug", "issue", "fix", "problem"]),
    (QuestionCategory::Feature, &["feature", "implement", "add"]),
    (QuestionCategory::Schedule, &["timeline", "deadline", "schedule"]),
];

const COMMITMENT_PHRASES: &[&str] = &["will take care", "i'll handle", "i will do"];

fn punctuation_regex() -> &'static Regex {
    static PUNCTUATION_REGEX: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION_REGEX
        .get_or_init(|| Regex::new(r"[.,?!;:]").expect("Failed to compile punctuation regex"))
}

fn match_tier<T: Copy>(text: &str, tiers: &[(T, &[&str])], fallback: T) -> T {
    for (level, keywords) in tiers {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *level;
        }
    }
    fallback
}

/// Urgency of an action item. The high tier is checked first and
/// short-circuits, so "urgent but also important" stays high.
pub fn priority(text: &str) -> Priority {
    match_tier(&text.to_lowercase(), PRIORITY_TIERS, Priority::Normal)
}

/// Reach of a decision.
pub fn impact_level(text: &str) -> ImpactLevel {
    match_tier(&text.to_lowercase(), IMPACT_TIERS, ImpactLevel::Normal)
}

/// Topic bucket for a question. Buckets are checked in fixed order and the
/// first match wins.
pub fn categorize(text: &str) -> QuestionCategory {
    match_tier(&text.to_lowercase(), CATEGORY_TIERS, QuestionCategory::General)
}

/// Who an action item lands on.
///
/// A first-person commitment phrase pins it on the speaker. Otherwise the
/// roster is scanned in first-appearance order for a name occurring as a
/// substring of the text. No roster name matches, the speaker keeps it.
///
/// Roster matching is deliberately substring-based and order-dependent:
/// when one participant's name is a prefix of another's ("Al" vs "Alice"),
/// whichever spoke first wins. Callers rely on that tie-break staying
/// stable.
pub fn infer_assignee(text: &str, speaker: &str, roster: &[String]) -> String {
    let lowercase_text = text.to_lowercase();

    if COMMITMENT_PHRASES
        .iter()
        .any(|phrase| lowercase_text.contains(phrase))
    {
        return speaker.to_string();
    }

    for name in roster {
        if lowercase_text.contains(&name.to_lowercase()) {
            return name.clone();
        }
    }

    speaker.to_string()
}

/// Whether a question appears answered within the lookahead window.
///
/// Significant words are the question's words longer than four characters
/// after stripping `.,?!;:`. The next `min(LOOKAHEAD_ROWS, remaining)`
/// rows are scanned; the question counts as addressed when any single one
/// of them contains at least `min(2, significant-word-count)` of those
/// words. A match beyond the window never counts.
///
/// A question with no significant words has a threshold of zero, so it is
/// addressed as soon as any row follows it. That degenerate case is part
/// of the contract.
pub fn is_addressed(question_text: &str, rows: &[TranscriptRow], index: usize) -> bool {
    let lowercase_question = question_text.to_lowercase();
    let stripped = punctuation_regex().replace_all(&lowercase_question, "");
    let significant_words: Vec<&str> = stripped
        .split(' ')
        .filter(|word| word.len() > SIGNIFICANT_WORD_LEN)
        .collect();
    let threshold = ADDRESSED_MATCH_FLOOR.min(significant_words.len());

    let window_end = rows.len().min(index + 1 + LOOKAHEAD_ROWS);
    for row in &rows[(index + 1).min(rows.len())..window_end] {
        let response = row.text.to_lowercase();
        let matching = significant_words
            .iter()
            .filter(|word| response.contains(**word))
            .count();
        if matching >= threshold {
            return true;
        }
    }
    false
}
