//! The core row classifier.
//!
//! One pass over the rows: each row's text is lower-cased once, all four
//! rule sets are evaluated independently, and matching rows are emitted
//! into the corresponding collections with their secondary attributes
//! filled in by the estimators.

use tracing::debug;

use crate::analysis::estimators;
use crate::analysis::rules;
use crate::analysis::types::{ActionItem, Decision, Question};
use crate::transcript::{speaker_roster, TranscriptRow};

/// The four ordered collections the classifier produces. Row order is
/// preserved within each; a single row may appear in several.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<Decision>,
    pub questions: Vec<Question>,
    pub key_points: Vec<String>,
}

/// Classify every row. Deterministic: the same rows always produce the
/// same collections, ids included.
pub fn classify(rows: &[TranscriptRow]) -> Classification {
    let roster = speaker_roster(rows);
    let mut result = Classification::default();

    for (index, row) in rows.iter().enumerate() {
        let text = row.text.to_lowercase();

        if rules::is_action_item(&text) {
            result.action_items.push(ActionItem {
                id: format!("action-{}", result.action_items.len()),
                text: row.text.clone(),
                speaker: row.speaker.clone(),
                timestamp: row.timestamp.clone(),
                completed: false,
                priority: estimators::priority(&row.text),
                assignee: estimators::infer_assignee(&row.text, &row.speaker, &roster),
            });
        }

        if rules::is_decision(&text) {
            result.decisions.push(Decision {
                id: format!("decision-{}", result.decisions.len()),
                text: row.text.clone(),
                speaker: row.speaker.clone(),
                timestamp: row.timestamp.clone(),
                impact_level: estimators::impact_level(&row.text),
            });
        }

        if rules::is_question(&text) {
            result.questions.push(Question {
                id: format!("question-{}", result.questions.len()),
                text: row.text.clone(),
                speaker: row.speaker.clone(),
                timestamp: row.timestamp.clone(),
                addressed: estimators::is_addressed(&row.text, rows, index),
                category: estimators::categorize(&row.text),
            });
        }

        if rules::is_key_point(&text) {
            result.key_points.push(format!("{}: {}", row.speaker, row.text));
        }
    }

    debug!(
        "Classified {} rows: {} action items, {} decisions, {} questions, {} key points",
        rows.len(),
        result.action_items.len(),
        result.decisions.len(),
        result.questions.len(),
        result.key_points.len()
    );

    result
}
