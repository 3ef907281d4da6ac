//! Plain-text rendering of an analysis bundle.
//!
//! Pure string building; printing and styling are the caller's business.

use crate::analysis::AnalysisBundle;

pub struct ReportOptions {
    pub show_key_points: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_key_points: true,
        }
    }
}

/// Render the full report: header counts, summary, advisory sections,
/// extracted records, and the participation table.
pub fn render(title: &str, bundle: &AnalysisBundle, options: &ReportOptions) -> String {
    let mut out = String::new();

    heading(&mut out, &format!("Meeting Analysis: {title}"), '=');
    out.push_str(&format!(
        "Duration: {} min | Speakers: {} | Messages: {}\n",
        bundle.meeting_stats.duration,
        bundle.meeting_stats.speaker_count,
        bundle.meeting_stats.total_messages
    ));
    out.push_str(&format!(
        "Action items: {} ({} done) | Decisions: {} | Questions: {} ({} addressed)\n",
        bundle.action_items.len(),
        bundle.completed_action_items(),
        bundle.decisions.len(),
        bundle.questions.len(),
        bundle.addressed_questions()
    ));
    out.push_str(&format!(
        "Action item ratio: {} | Questions addressed: {}\n\n",
        percent(bundle.meeting_stats.action_item_ratio),
        percent(bundle.meeting_stats.questions_addressed_ratio)
    ));

    heading(&mut out, "Summary", '-');
    out.push_str(&bundle.summary);
    out.push_str("\n\n");

    if options.show_key_points && !bundle.key_points.is_empty() {
        heading(&mut out, "Key Points", '-');
        for point in &bundle.key_points {
            out.push_str(&format!("- {point}\n"));
        }
        out.push('\n');
    }

    heading(&mut out, "Action Items", '-');
    if bundle.action_items.is_empty() {
        out.push_str("No action items detected.\n");
    }
    for item in &bundle.action_items {
        let marker = if item.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!(
            "{} ({}) {} - assignee: {}, at {}\n",
            marker,
            item.priority.as_str(),
            item.text,
            item.assignee,
            item.timestamp
        ));
    }
    out.push('\n');

    heading(&mut out, "Decisions", '-');
    if bundle.decisions.is_empty() {
        out.push_str("No decisions detected.\n");
    }
    for decision in &bundle.decisions {
        out.push_str(&format!(
            "({} impact) {} - {}, at {}\n",
            decision.impact_level.as_str(),
            decision.text,
            decision.speaker,
            decision.timestamp
        ));
    }
    out.push('\n');

    heading(&mut out, "Questions & Concerns", '-');
    if bundle.questions.is_empty() {
        out.push_str("No questions detected.\n");
    }
    for question in &bundle.questions {
        let state = if question.addressed {
            "addressed"
        } else {
            "open"
        };
        out.push_str(&format!(
            "[{}] ({}) {} - {}, at {}\n",
            state,
            question.category.as_str(),
            question.text,
            question.speaker,
            question.timestamp
        ));
    }
    out.push('\n');

    heading(&mut out, "AI Suggestions", '-');
    if bundle.ai_suggestions.is_empty() {
        out.push_str("All suggestions have been processed.\n");
    }
    for suggestion in &bundle.ai_suggestions {
        out.push_str(&format!("* {}\n  why: {}\n", suggestion.text, suggestion.reasoning));
    }
    out.push('\n');

    heading(&mut out, "Follow-up Reminders", '-');
    for reminder in &bundle.follow_up_reminders {
        out.push_str(&format!(
            "* {} (due: {}, assignee: {})\n  {}\n",
            reminder.text, reminder.due_date, reminder.assignee, reminder.source
        ));
    }
    out.push('\n');

    heading(&mut out, "Participation", '-');
    if bundle.participation_metrics.message_count_by_user.is_empty() {
        out.push_str("No speakers.\n");
    }
    for (speaker, messages) in &bundle.participation_metrics.message_count_by_user {
        let words = bundle
            .participation_metrics
            .word_count_by_user
            .get(speaker)
            .copied()
            .unwrap_or(0);
        let actions = bundle
            .participation_metrics
            .action_items_by_user
            .get(speaker)
            .copied()
            .unwrap_or(0);
        let decisions = bundle
            .participation_metrics
            .decisions_by_user
            .get(speaker)
            .copied()
            .unwrap_or(0);
        out.push_str(&format!(
            "{speaker}: {messages} messages, {words} words, {actions} action items, {decisions} decisions\n"
        ));
    }

    out
}

fn heading(out: &mut String, text: &str, underline: char) {
    out.push_str(text);
    out.push('\n');
    for _ in 0..text.len() {
        out.push(underline);
    }
    out.push('\n');
}

fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}
