// src/coverage.rs
//! Cross-references upstream improvement issues against the applied change
//! log, classifying each issue as addressed, partially addressed, or not
//! addressed.
//!
//! The decision rules are a frozen legacy heuristic (string containment plus
//! fixed phrase lists) with known false positives and negatives. They are
//! preserved exactly; do not "improve" them without product sign-off.

use crate::rules::{CATEGORY_ISSUE_KEYWORDS, COMMON_PHRASES};
use crate::types::{
    Category, ChangeRecord, Improvement, ImprovementStatus, ImprovementValidationResult,
};
use std::collections::HashSet;
use tracing::debug;

/// Length of the issue prefix matched against change reasoning
const ISSUE_PREFIX_CHARS: usize = 20;

/// Relevant-change count needed, on top of a category match, for an issue to
/// count as fully addressed
const ADDRESSED_MIN_RELEVANT: usize = 2;

/// Classify every improvement index against the applied changes.
///
/// The returned index sets partition `0..improvements.len()` exactly: each
/// index lands in precisely one of addressed, partially addressed, or not
/// addressed.
pub fn validate_improvements(
    improvements: &[Improvement],
    changes: &[ChangeRecord],
) -> ImprovementValidationResult {
    let ai_applied_categories: HashSet<Category> =
        changes.iter().map(|change| change.category).collect();

    let mut addressed = Vec::new();
    let mut partially_addressed = Vec::new();
    let mut not_addressed = Vec::new();

    for (index, improvement) in improvements.iter().enumerate() {
        let issue_lower = improvement.issue.to_lowercase();

        let category_match = CATEGORY_ISSUE_KEYWORDS
            .iter()
            .filter(|(category, _)| ai_applied_categories.contains(category))
            .find(|(_, keywords)| keywords.iter().any(|k| issue_lower.contains(k)))
            .map(|(category, _)| *category);

        let relevant = relevant_changes(&issue_lower, changes);

        if relevant == 0 {
            not_addressed.push(index);
        } else if category_match.is_some() && relevant >= ADDRESSED_MIN_RELEVANT {
            addressed.push(index);
        } else {
            partially_addressed.push(index);
        }
    }

    debug!(
        addressed = addressed.len(),
        partial = partially_addressed.len(),
        unaddressed = not_addressed.len(),
        "Validated improvement coverage"
    );

    ImprovementValidationResult {
        addressed,
        partially_addressed,
        not_addressed,
        ai_applied_categories,
    }
}

/// A change is relevant to an issue when its category label (hyphens as
/// spaces) appears in the issue text, when its reasoning quotes the issue's
/// opening words, or when its reasoning carries a common domain phrase that
/// shares a word with the issue text.
fn relevant_changes(issue_lower: &str, changes: &[ChangeRecord]) -> usize {
    let issue_prefix: String = issue_lower.chars().take(ISSUE_PREFIX_CHARS).collect();

    changes
        .iter()
        .filter(|change| {
            let reasoning_lower = change.reasoning.to_lowercase();
            let category_label = change.category.as_str().replace('-', " ");

            issue_lower.contains(&category_label)
                || (!issue_prefix.is_empty() && reasoning_lower.contains(&issue_prefix))
                || COMMON_PHRASES.iter().any(|phrase| {
                    reasoning_lower.contains(phrase)
                        && phrase
                            .split_whitespace()
                            .any(|word| issue_lower.contains(word))
                })
        })
        .count()
}

/// Display status for one improvement index. A manual completion always wins
/// over the AI classification.
pub fn improvement_status(
    index: usize,
    manually_completed: &HashSet<usize>,
    validation: &ImprovementValidationResult,
) -> ImprovementStatus {
    if manually_completed.contains(&index) {
        ImprovementStatus::ManuallyCompleted
    } else if validation.addressed.contains(&index) {
        ImprovementStatus::AiApplied
    } else if validation.partially_addressed.contains(&index) {
        ImprovementStatus::PartiallyApplied
    } else {
        ImprovementStatus::NotAddressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn improvement(issue: &str) -> Improvement {
        Improvement {
            priority: Priority::High,
            issue: issue.to_string(),
            suggestion: "...".to_string(),
        }
    }

    fn change(category: Category, reasoning: &str) -> ChangeRecord {
        ChangeRecord {
            category,
            section: "summary".to_string(),
            original: "original".to_string(),
            improved: "improved".to_string(),
            reasoning: reasoning.to_string(),
        }
    }

    fn assert_partition(result: &ImprovementValidationResult, total: usize) {
        let mut all: Vec<usize> = result
            .addressed
            .iter()
            .chain(&result.partially_addressed)
            .chain(&result.not_addressed)
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_relevant_change_is_partial() {
        // One relevant change with a category match still falls short of the
        // two-change bar for "addressed".
        let improvements = vec![improvement("Missing professional summary")];
        let changes = vec![change(
            Category::ProfessionalLanguage,
            "Enhances professional language and resume format",
        )];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.addressed, Vec::<usize>::new());
        assert_eq!(result.partially_addressed, vec![0]);
        assert_partition(&result, 1);
    }

    #[test]
    fn test_two_relevant_changes_with_category_match_is_addressed() {
        let improvements = vec![improvement("Missing professional summary")];
        let changes = vec![
            change(
                Category::ProfessionalLanguage,
                "Enhances professional language and resume format",
            ),
            change(
                Category::ProfessionalLanguage,
                "Replaces informal wording with professional language",
            ),
        ];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.addressed, vec![0]);
        assert_partition(&result, 1);
    }

    #[test]
    fn test_no_relevant_changes_is_not_addressed() {
        let improvements = vec![improvement("Add a certifications section")];
        let changes = vec![change(Category::ActionVerbs, "Stronger verbs")];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.not_addressed, vec![0]);
        assert_partition(&result, 1);
    }

    #[test]
    fn test_category_match_requires_applied_category() {
        // Issue mentions keywords, but no keyword-integration change was
        // applied, so two relevant changes still only reach partial.
        let improvements = vec![improvement("keyword optimization needed for ats")];
        let changes = vec![
            change(Category::ActionVerbs, "Improves keyword optimization"),
            change(Category::ActionVerbs, "Also helps keyword optimization"),
        ];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.partially_addressed, vec![0]);
        assert!(!result
            .ai_applied_categories
            .contains(&Category::KeywordIntegration));
    }

    #[test]
    fn test_reasoning_matches_issue_prefix() {
        let improvements = vec![improvement("Quantify your achievements in the experience section")];
        let changes = vec![change(
            Category::Quantification,
            "Addresses: quantify your achievements in the experience bullets",
        )];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.partially_addressed, vec![0]);
    }

    #[test]
    fn test_common_phrase_shared_by_issue_and_reasoning() {
        let improvements = vec![improvement("Use stronger action verbs")];
        let changes = vec![
            change(Category::ActionVerbs, "Swaps weak phrasing for action verbs"),
            change(Category::ActionVerbs, "Uses action verbs recruiters expect"),
        ];
        let result = validate_improvements(&improvements, &changes);
        assert_eq!(result.addressed, vec![0]);
    }

    #[test]
    fn test_partition_holds_for_mixed_list() {
        let improvements = vec![
            improvement("Use stronger action verbs"),
            improvement("Add a certifications section"),
            improvement("Missing professional summary"),
        ];
        let changes = vec![
            change(Category::ActionVerbs, "Swaps weak phrasing for action verbs"),
            change(Category::ActionVerbs, "Uses action verbs recruiters expect"),
            change(
                Category::ProfessionalLanguage,
                "Enhances professional language",
            ),
        ];
        let result = validate_improvements(&improvements, &changes);
        assert_partition(&result, 3);
        assert_eq!(result.addressed, vec![0]);
        assert_eq!(result.not_addressed, vec![1]);
        assert_eq!(result.partially_addressed, vec![2]);
    }

    #[test]
    fn test_empty_inputs() {
        let result = validate_improvements(&[], &[]);
        assert_partition(&result, 0);
        assert!(result.ai_applied_categories.is_empty());

        let improvements = vec![improvement("Anything at all")];
        let result = validate_improvements(&improvements, &[]);
        assert_eq!(result.not_addressed, vec![0]);
    }

    #[test]
    fn test_manual_completion_wins_status_precedence() {
        let improvements = vec![improvement("Use stronger action verbs")];
        let changes = vec![
            change(Category::ActionVerbs, "Swaps weak phrasing for action verbs"),
            change(Category::ActionVerbs, "Uses action verbs recruiters expect"),
        ];
        let validation = validate_improvements(&improvements, &changes);
        assert_eq!(validation.addressed, vec![0]);

        let manual: HashSet<usize> = [0].into_iter().collect();
        assert_eq!(
            improvement_status(0, &manual, &validation),
            ImprovementStatus::ManuallyCompleted
        );
        assert_eq!(
            improvement_status(0, &HashSet::new(), &validation),
            ImprovementStatus::AiApplied
        );
    }
}
