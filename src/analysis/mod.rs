//! Transcript analysis engine.
//!
//! Scans ordered transcript rows with rule-based classifiers, derives
//! secondary attributes, aggregates participation statistics, and attaches
//! templated insights. Pure and synchronous: the same rows always produce
//! the same bundle, and nothing here touches I/O.

pub mod classifier;
pub mod estimators;
pub mod insights;
pub mod reducer;
pub mod rules;
pub mod stats;
pub mod types;

pub use classifier::{classify, Classification};
pub use insights::{InsightGenerator, TemplateInsights};
pub use reducer::{reduce, BundleAction, ReduceError};
pub use types::{
    ActionItem, AnalysisBundle, Decision, ImpactLevel, MeetingStats, ParticipationMetrics,
    Priority, Question, QuestionCategory, Reminder, Suggestion, SuggestionKind,
};

use tracing::debug;

use crate::transcript::TranscriptRow;

/// Run the full pipeline with the stock template insights.
pub fn analyze(rows: &[TranscriptRow]) -> AnalysisBundle {
    analyze_with(rows, &TemplateInsights)
}

/// Run the full pipeline with a caller-chosen insight generator.
///
/// Never fails: malformed timestamps degrade to the default duration and
/// an empty row set yields an empty bundle with zeroed stats.
pub fn analyze_with(rows: &[TranscriptRow], insights: &dyn InsightGenerator) -> AnalysisBundle {
    debug!("Running {} insights", insights.name());
    let classification = classify(rows);
    let meeting_stats = stats::meeting_stats(
        rows,
        &classification.action_items,
        &classification.questions,
    );
    let participation_metrics = stats::participation(
        rows,
        &classification.action_items,
        &classification.decisions,
    );

    AnalysisBundle {
        action_items: classification.action_items,
        decisions: classification.decisions,
        questions: classification.questions,
        key_points: classification.key_points,
        summary: insights.summary(),
        ai_suggestions: insights.suggestions(),
        meeting_stats,
        participation_metrics,
        follow_up_reminders: insights.reminders(),
    }
}
