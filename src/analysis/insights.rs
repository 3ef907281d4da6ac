//! Advisory content: the meeting summary, suggestions, and follow-up
//! reminders.
//!
//! These are templates, not derived from the transcript. The trait exists
//! so a real heuristic (or model-backed) generator can replace the
//! template content later without touching the classifier.

use crate::analysis::types::{Reminder, Suggestion, SuggestionKind};

/// Source of the advisory part of an analysis bundle.
pub trait InsightGenerator: Send + Sync {
    /// Meeting summary paragraph.
    fn summary(&self) -> String;

    /// Advisory suggestions, in presentation order.
    fn suggestions(&self) -> Vec<Suggestion>;

    /// Follow-up reminders, in presentation order.
    fn reminders(&self) -> Vec<Reminder>;

    /// Get the name of this generator for logging
    fn name(&self) -> &'static str;
}

/// The stock template generator. Content is fixed; only count and shape
/// are contractual.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateInsights;

impl InsightGenerator for TemplateInsights {
    fn summary(&self) -> String {
        "This sprint planning meeting focused on bug fixes for the login flow, \
         feature priorities, and deadline concerns. Several action items were \
         identified to address testing failures and improve the release process."
            .to_string()
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        vec![
            Suggestion {
                id: "ai-suggestion-1".to_string(),
                kind: SuggestionKind::Process,
                text: "Consider setting up a dedicated QA review meeting before sprint \
                       planning to avoid lengthy debugging discussions"
                    .to_string(),
                reasoning: "25% of this meeting was spent discussing test failures that \
                            could have been addressed beforehand"
                    .to_string(),
            },
            Suggestion {
                id: "ai-suggestion-2".to_string(),
                kind: SuggestionKind::Action,
                text: "Create a formal bug triage process for the login flow issues".to_string(),
                reasoning: "The login flow issues have persisted across sprints and need \
                            systematic resolution"
                    .to_string(),
            },
            Suggestion {
                id: "ai-suggestion-3".to_string(),
                kind: SuggestionKind::FollowUp,
                text: "Schedule a dedicated session to review the feature requests \
                       mentioned by Product_Manager"
                    .to_string(),
                reasoning: "Several important feature requests were mentioned but not \
                            conclusively prioritized"
                    .to_string(),
            },
        ]
    }

    fn reminders(&self) -> Vec<Reminder> {
        vec![
            Reminder {
                id: "reminder-1".to_string(),
                text: "Send login flow bug details to the mobile team".to_string(),
                due_date: "Tomorrow".to_string(),
                assignee: "Engineer_1".to_string(),
                source: "Based on Engineer_1's commitment at 12:45".to_string(),
            },
            Reminder {
                id: "reminder-2".to_string(),
                text: "Confirm sprint 19 priorities with stakeholders".to_string(),
                due_date: "Today".to_string(),
                assignee: "PM".to_string(),
                source: "Meeting objective mentioned at 00:01".to_string(),
            },
            Reminder {
                id: "reminder-3".to_string(),
                text: "Update QA test suite to address timeout issues".to_string(),
                due_date: "This week".to_string(),
                assignee: "QA".to_string(),
                source: "Discussion around test failures at 00:28".to_string(),
            },
        ]
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
