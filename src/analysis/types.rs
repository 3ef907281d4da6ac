//! Extracted record and output bundle types.
//!
//! Field names serialize in the camelCase shape the presentation layer
//! consumes (`actionItems`, `impactLevel`, `followUpReminders`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Urgency of an action item, highest tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Normal,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Normal => "normal",
        }
    }
}

/// Reach of a decision, highest tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    High,
    Medium,
    Normal,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Normal => "normal",
        }
    }
}

/// Topic bucket for a question or concern. First matching bucket wins;
/// buckets are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Bug,
    Feature,
    Schedule,
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Schedule => "schedule",
            Self::General => "general",
        }
    }
}

/// A task-like statement detected by the action-item rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// `action-N`, N being the item's position within this collection at
    /// extraction time. Unique here, not globally.
    pub id: String,
    pub text: String,
    pub speaker: String,
    pub timestamp: String,
    /// Starts false; flipped only through the bundle reducer.
    pub completed: bool,
    pub priority: Priority,
    pub assignee: String,
}

/// A conclusive statement detected by the decision rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub text: String,
    pub speaker: String,
    pub timestamp: String,
    pub impact_level: ImpactLevel,
}

/// A question or voiced concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub speaker: String,
    pub timestamp: String,
    /// True when the question's key terms recur within the lookahead
    /// window. Flippable through the reducer afterwards.
    pub addressed: bool,
    pub category: QuestionCategory,
}

/// Flavor of an advisory suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    Process,
    Action,
    FollowUp,
}

/// An advisory entry from the insight generator. Template content, not
/// derived from the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub text: String,
    pub reasoning: String,
}

/// A follow-up reminder from the insight generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub text: String,
    pub due_date: String,
    pub assignee: String,
    pub source: String,
}

/// Meeting-level statistics, recomputed fresh on every analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingStats {
    /// Minutes between the first and last row timestamps; 45 when either
    /// fails to parse.
    pub duration: i64,
    pub speaker_count: usize,
    pub total_messages: usize,
    /// Action items per row, in `[0, 1]`. Zero for an empty transcript.
    pub action_item_ratio: f64,
    /// Addressed questions per question, denominator floored at 1.
    pub questions_addressed_ratio: f64,
}

/// Per-speaker aggregate counts. Keys are speaker names exactly as they
/// appear in the transcript; maps are ordered so serialized output is
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationMetrics {
    pub message_count_by_user: BTreeMap<String, usize>,
    pub word_count_by_user: BTreeMap<String, usize>,
    pub action_items_by_user: BTreeMap<String, usize>,
    pub decisions_by_user: BTreeMap<String, usize>,
}

/// The complete output of one analysis run. Built once per transcript and
/// replaced wholesale on re-analysis; the reducer is the only sanctioned
/// mutation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<Decision>,
    pub questions: Vec<Question>,
    /// `"speaker: text"` lines for rows that matched the key-point rules.
    pub key_points: Vec<String>,
    pub summary: String,
    pub ai_suggestions: Vec<Suggestion>,
    pub meeting_stats: MeetingStats,
    pub participation_metrics: ParticipationMetrics,
    pub follow_up_reminders: Vec<Reminder>,
}

impl AnalysisBundle {
    /// Count of action items marked completed.
    pub fn completed_action_items(&self) -> usize {
        self.action_items.iter().filter(|a| a.completed).count()
    }

    /// Count of questions currently marked addressed.
    pub fn addressed_questions(&self) -> usize {
        self.questions.iter().filter(|q| q.addressed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serialization() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let parsed: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }

    #[test]
    fn test_suggestion_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&SuggestionKind::FollowUp).unwrap(),
            "\"follow-up\""
        );
        assert_eq!(
            serde_json::to_string(&SuggestionKind::Process).unwrap(),
            "\"process\""
        );
    }

    #[test]
    fn test_action_item_field_names() {
        let item = ActionItem {
            id: "action-0".to_string(),
            text: "We need to ship".to_string(),
            speaker: "PM".to_string(),
            timestamp: "00:10".to_string(),
            completed: false,
            priority: Priority::Normal,
            assignee: "PM".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "action-0");
        assert_eq!(json["priority"], "normal");
        assert!(json.get("assignee").is_some());
        assert!(json.get("completed").is_some());
    }

    #[test]
    fn test_bundle_field_names_match_presentation_shape() {
        let bundle = AnalysisBundle {
            action_items: Vec::new(),
            decisions: Vec::new(),
            questions: Vec::new(),
            key_points: Vec::new(),
            summary: String::new(),
            ai_suggestions: Vec::new(),
            meeting_stats: MeetingStats {
                duration: 0,
                speaker_count: 0,
                total_messages: 0,
                action_item_ratio: 0.0,
                questions_addressed_ratio: 0.0,
            },
            participation_metrics: ParticipationMetrics::default(),
            follow_up_reminders: Vec::new(),
        };
        let json = serde_json::to_value(&bundle).unwrap();

        for key in [
            "actionItems",
            "decisions",
            "questions",
            "keyPoints",
            "summary",
            "aiSuggestions",
            "meetingStats",
            "participationMetrics",
            "followUpReminders",
        ] {
            assert!(json.get(key).is_some(), "missing bundle key {key}");
        }
        assert!(json["meetingStats"].get("actionItemRatio").is_some());
        assert!(json["participationMetrics"]
            .get("messageCountByUser")
            .is_some());
    }
}
