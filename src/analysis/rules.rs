//! Classifier rule sets, modeled as data so each table can be tested and
//! tuned on its own.
//!
//! All predicates expect text that has already been lower-cased by the
//! caller. Matching is plain substring containment, not word-boundary
//! aware, so a keyword may match inside a larger word ("should" matches
//! "shoulder").

/// A named OR-of-substrings rule table.
pub struct RuleSet {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl RuleSet {
    /// True when any keyword occurs in `text` (expects lower-cased input).
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

pub const ACTION_ITEM: RuleSet = RuleSet {
    name: "action-item",
    keywords: &[
        "need to",
        "will do",
        "let's",
        "should",
        "follow up",
        "assigned to",
        "by tomorrow",
        "by next",
        "take care of",
    ],
};

pub const DECISION: RuleSet = RuleSet {
    name: "decision",
    keywords: &["decided", "agreed", "going with", "conclusion", "we'll", "final"],
};

pub const QUESTION: RuleSet = RuleSet {
    name: "question",
    keywords: &["concerned", "worry", "issue", "problem"],
};

pub const KEY_POINT: RuleSet = RuleSet {
    name: "key-point",
    keywords: &["important", "priority", "critical", "key"],
};

pub fn is_action_item(text: &str) -> bool {
    ACTION_ITEM.matches(text)
}

/// Decision rule: the keyword table, or "plan" talk that is not merely
/// "planning".
pub fn is_decision(text: &str) -> bool {
    DECISION.matches(text) || (text.contains("plan") && !text.contains("planning"))
}

/// Question rule: a literal question mark or any concern keyword.
pub fn is_question(text: &str) -> bool {
    text.contains('?') || QUESTION.matches(text)
}

pub fn is_key_point(text: &str) -> bool {
    KEY_POINT.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_item_keywords() {
        assert!(is_action_item("we need to ship this"));
        assert!(is_action_item("i will do the review"));
        assert!(is_action_item("let's sync on friday"));
        assert!(is_action_item("that is assigned to dana"));
        assert!(is_action_item("done by tomorrow"));
        assert!(!is_action_item("the build is green"));
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        // "should" inside "shoulder" still matches, by contract.
        assert!(is_action_item("my shoulder hurts"));
    }

    #[test]
    fn test_decision_keywords() {
        assert!(is_decision("we decided on postgres"));
        assert!(is_decision("agreed, ship it"));
        assert!(is_decision("we're going with option b"));
        assert!(is_decision("in conclusion the api stays"));
        assert!(is_decision("we'll revisit next week"));
        assert!(is_decision("that's final"));
        assert!(!is_decision("status update only"));
    }

    #[test]
    fn test_decision_plan_without_planning_clause() {
        assert!(is_decision("the plan is to release monday"));
        assert!(!is_decision("planning poker at three"));
        // "planning" also contains "plan", so its presence vetoes the clause.
        assert!(!is_decision("planning the planning session"));
    }

    #[test]
    fn test_question_rule() {
        assert!(is_question("is this tested?"));
        assert!(is_question("i'm concerned about latency"));
        assert!(is_question("that could be a problem"));
        assert!(is_question("no worry markers but an issue here"));
        assert!(!is_question("all good on my side"));
    }

    #[test]
    fn test_key_point_keywords() {
        assert!(is_key_point("this is important"));
        assert!(is_key_point("top priority for the sprint"));
        assert!(is_key_point("a critical dependency"));
        assert!(is_key_point("the key takeaway"));
        assert!(!is_key_point("nothing notable"));
    }

    #[test]
    fn test_rule_sets_are_independent() {
        // One row can satisfy several tables at once.
        let text = "we should fix this critical issue, agreed?";
        assert!(is_action_item(text));
        assert!(is_decision(text));
        assert!(is_question(text));
        assert!(is_key_point(text));
    }
}
