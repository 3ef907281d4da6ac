//! Post-analysis mutations over a bundle.
//!
//! The engine's output is immutable by convention; everything a caller is
//! allowed to change afterwards goes through [`reduce`]. Actions touch
//! already-extracted records only. Nothing here re-runs classification,
//! and stats are not recomputed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::types::{ActionItem, AnalysisBundle, Priority};

/// Speaker recorded on an action item promoted from a suggestion.
pub const PROMOTED_SPEAKER: &str = "AI Assistant";

/// Timestamp recorded on a promoted action item.
pub const PROMOTED_TIMESTAMP: &str = "AI generated";

/// A single sanctioned mutation of an analysis bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BundleAction {
    /// Flip `completed` on the action item with this id.
    ToggleActionItem { id: String },
    /// Flip `addressed` on the question with this id.
    ToggleQuestion { id: String },
    /// Remove the suggestion with this id and append it to the action
    /// items as a new record.
    PromoteSuggestion { id: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ReduceError {
    #[error("no record with id '{0}' in this bundle")]
    UnknownId(String),
}

/// Apply one action. On an unknown id the bundle is left untouched and a
/// typed error comes back.
pub fn reduce(bundle: &mut AnalysisBundle, action: BundleAction) -> Result<(), ReduceError> {
    match action {
        BundleAction::ToggleActionItem { id } => {
            match bundle.action_items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.completed = !item.completed;
                    Ok(())
                }
                None => Err(ReduceError::UnknownId(id)),
            }
        }
        BundleAction::ToggleQuestion { id } => {
            match bundle.questions.iter_mut().find(|question| question.id == id) {
                Some(question) => {
                    question.addressed = !question.addressed;
                    Ok(())
                }
                None => Err(ReduceError::UnknownId(id)),
            }
        }
        BundleAction::PromoteSuggestion { id } => {
            match bundle.ai_suggestions.iter().position(|s| s.id == id) {
                Some(position) => {
                    let suggestion = bundle.ai_suggestions.remove(position);
                    bundle.action_items.push(ActionItem {
                        id: format!("action-{}", bundle.action_items.len()),
                        text: suggestion.text,
                        speaker: PROMOTED_SPEAKER.to_string(),
                        timestamp: PROMOTED_TIMESTAMP.to_string(),
                        completed: false,
                        priority: Priority::Medium,
                        assignee: String::new(),
                    });
                    Ok(())
                }
                None => Err(ReduceError::UnknownId(id)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::transcript::TranscriptRow;

    fn sample_bundle() -> AnalysisBundle {
        let rows = vec![
            TranscriptRow::new("00:00", "PM", "we need to cut the release"),
            TranscriptRow::new("00:05", "QA", "is the pipeline broken? major issue"),
        ];
        analyze(&rows)
    }

    #[test]
    fn test_toggle_action_item_flips_completed() {
        let mut bundle = sample_bundle();
        assert!(!bundle.action_items[0].completed);

        reduce(
            &mut bundle,
            BundleAction::ToggleActionItem {
                id: "action-0".to_string(),
            },
        )
        .unwrap();
        assert!(bundle.action_items[0].completed);

        reduce(
            &mut bundle,
            BundleAction::ToggleActionItem {
                id: "action-0".to_string(),
            },
        )
        .unwrap();
        assert!(!bundle.action_items[0].completed);
    }

    #[test]
    fn test_toggle_question_flips_addressed() {
        let mut bundle = sample_bundle();
        let before = bundle.questions[0].addressed;

        reduce(
            &mut bundle,
            BundleAction::ToggleQuestion {
                id: "question-0".to_string(),
            },
        )
        .unwrap();
        assert_eq!(bundle.questions[0].addressed, !before);
    }

    #[test]
    fn test_toggle_touches_only_the_named_record() {
        let rows = vec![
            TranscriptRow::new("00:00", "A", "we need to write docs"),
            TranscriptRow::new("00:01", "B", "we need to tag the build"),
        ];
        let mut bundle = analyze(&rows);

        reduce(
            &mut bundle,
            BundleAction::ToggleActionItem {
                id: "action-1".to_string(),
            },
        )
        .unwrap();
        assert!(!bundle.action_items[0].completed);
        assert!(bundle.action_items[1].completed);
    }

    #[test]
    fn test_promote_suggestion_moves_record() {
        let mut bundle = sample_bundle();
        let actions_before = bundle.action_items.len();
        let promoted_text = bundle.ai_suggestions[0].text.clone();

        reduce(
            &mut bundle,
            BundleAction::PromoteSuggestion {
                id: "ai-suggestion-1".to_string(),
            },
        )
        .unwrap();

        assert_eq!(bundle.ai_suggestions.len(), 2);
        assert_eq!(bundle.action_items.len(), actions_before + 1);

        let promoted = bundle.action_items.last().unwrap();
        assert_eq!(promoted.id, format!("action-{actions_before}"));
        assert_eq!(promoted.text, promoted_text);
        assert_eq!(promoted.speaker, PROMOTED_SPEAKER);
        assert_eq!(promoted.timestamp, PROMOTED_TIMESTAMP);
        assert_eq!(promoted.priority, Priority::Medium);
        assert_eq!(promoted.assignee, "");
        assert!(!promoted.completed);
    }

    #[test]
    fn test_unknown_id_errors_and_leaves_bundle_untouched() {
        let mut bundle = sample_bundle();
        let snapshot = bundle.clone();

        let err = reduce(
            &mut bundle,
            BundleAction::ToggleActionItem {
                id: "action-99".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ReduceError::UnknownId("action-99".to_string()));
        assert_eq!(bundle, snapshot);
    }

    #[test]
    fn test_action_json_shape() {
        let action = BundleAction::PromoteSuggestion {
            id: "ai-suggestion-2".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "promoteSuggestion");
        assert_eq!(json["id"], "ai-suggestion-2");

        let parsed: BundleAction =
            serde_json::from_str(r#"{"action":"toggleQuestion","id":"question-0"}"#).unwrap();
        assert_eq!(
            parsed,
            BundleAction::ToggleQuestion {
                id: "question-0".to_string()
            }
        );
    }
}
