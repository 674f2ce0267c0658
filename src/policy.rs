// src/policy.rs
//! Conflict and policy filtering: partitions a caller-selected candidate list
//! into apply/skip/conflict sets under an `ApplicationPolicy`.
//!
//! The whole pass is a deterministic left-to-right scan over the selection
//! order. Given the same candidates in the same order, the partition is
//! always identical.

use crate::types::{
    ApplicationPolicy, ApplicationResult, Recommendation, SkipReason, SkippedRecommendation,
};
use std::collections::HashMap;
use tracing::debug;

/// Impact at or below this counts as low risk for auto-apply selection
const LOW_RISK_IMPACT_MAX: u8 = 4;

/// Partition `selection` into applied, skipped, and conflicting candidates.
///
/// Policy checks run in a fixed order: priority threshold, category
/// restriction, per-section cap. Survivors then walk a working copy of
/// `content` in selection order; a candidate whose `original` is no longer
/// present conflicts with an earlier accepted edit and is reported, never
/// applied. Earlier candidates always win ties.
pub fn filter_recommendations(
    content: &str,
    selection: &[Recommendation],
    policy: &ApplicationPolicy,
) -> ApplicationResult {
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut conflicts = Vec::new();

    let mut section_counts: HashMap<String, usize> = HashMap::new();
    let mut working = content.to_string();

    for rec in selection {
        if rec.priority < policy.priority_threshold {
            skipped.push(SkippedRecommendation {
                recommendation: rec.clone(),
                reason: SkipReason::Priority,
            });
            continue;
        }

        if !policy.selected_categories.is_empty()
            && !policy.selected_categories.contains(&rec.category)
        {
            skipped.push(SkippedRecommendation {
                recommendation: rec.clone(),
                reason: SkipReason::Category,
            });
            continue;
        }

        let count = section_counts.entry(rec.section.clone()).or_insert(0);
        if *count >= policy.max_changes_per_section {
            skipped.push(SkippedRecommendation {
                recommendation: rec.clone(),
                reason: SkipReason::SectionCap,
            });
            continue;
        }
        // The slot is consumed at acceptance, even if the candidate later
        // turns out to conflict.
        *count += 1;

        // Overlap detection against edits accepted so far. Replacing in the
        // working copy here mirrors exactly what application will do.
        if !working.contains(&rec.original) {
            conflicts.push(rec.clone());
            continue;
        }
        working = working.replacen(&rec.original, &rec.suggested, 1);
        applied.push(rec.clone());
    }

    debug!(
        applied = applied.len(),
        skipped = skipped.len(),
        conflicts = conflicts.len(),
        "Filtered recommendation selection"
    );

    ApplicationResult {
        applied,
        skipped,
        conflicts,
    }
}

/// Resolve a policy into a concrete candidate selection from the full
/// generated list, preserving generation order.
///
/// Candidates meeting the priority threshold and category restriction are
/// selected. With `auto_apply_low_risk` set, low-risk candidates (impact at
/// most 4) are selected even when a category restriction would exclude them.
pub fn auto_selection(
    recommendations: &[Recommendation],
    policy: &ApplicationPolicy,
) -> Vec<Recommendation> {
    recommendations
        .iter()
        .filter(|rec| {
            let low_risk = policy.auto_apply_low_risk && rec.impact <= LOW_RISK_IMPACT_MAX;
            let category_ok = policy.selected_categories.is_empty()
                || policy.selected_categories.contains(&rec.category);
            rec.priority >= policy.priority_threshold && (category_ok || low_risk)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, EditType, Priority};
    use std::collections::HashSet;

    fn rec(
        id: &str,
        category: Category,
        section: &str,
        original: &str,
        suggested: &str,
        priority: Priority,
    ) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            category,
            section: section.to_string(),
            edit_type: EditType::Keyword,
            original: original.to_string(),
            suggested: suggested.to_string(),
            priority,
            impact: 5,
            reasoning: String::new(),
        }
    }

    fn policy(threshold: Priority, cap: usize) -> ApplicationPolicy {
        ApplicationPolicy {
            auto_apply_low_risk: false,
            priority_threshold: threshold,
            selected_categories: HashSet::new(),
            max_changes_per_section: cap,
        }
    }

    const CONTENT: &str = "worked on billing and helped with reporting daily";

    #[test]
    fn test_priority_threshold_skips_below() {
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
            rec("b", Category::ActionVerbs, "experience", "helped with", "facilitated", Priority::Low),
        ];
        let result = filter_recommendations(CONTENT, &selection, &policy(Priority::Medium, 5));
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::Priority);
    }

    #[test]
    fn test_category_restriction_skips_others() {
        let mut p = policy(Priority::Low, 5);
        p.selected_categories.insert(Category::Quantification);
        let selection = vec![rec(
            "a",
            Category::ActionVerbs,
            "experience",
            "worked on",
            "developed",
            Priority::High,
        )];
        let result = filter_recommendations(CONTENT, &selection, &p);
        assert!(result.applied.is_empty());
        assert_eq!(result.skipped[0].reason, SkipReason::Category);
    }

    #[test]
    fn test_section_cap_applies_first_then_skips() {
        // Two high-priority candidates in one section, cap 1: exactly one
        // applied and one skipped with the cap reason.
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
            rec("b", Category::ActionVerbs, "experience", "helped with", "facilitated", Priority::High),
        ];
        let result = filter_recommendations(CONTENT, &selection, &policy(Priority::High, 1));
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.applied[0].id, "a");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::SectionCap);
    }

    #[test]
    fn test_cap_counts_per_section_independently() {
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
            rec("b", Category::ActionVerbs, "summary", "helped with", "facilitated", Priority::High),
        ];
        let result = filter_recommendations(CONTENT, &selection, &policy(Priority::Low, 1));
        assert_eq!(result.applied.len(), 2);
    }

    #[test]
    fn test_overlapping_originals_conflict_first_wins() {
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on billing", "led billing", Priority::High),
            rec("b", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
        ];
        let result = filter_recommendations(CONTENT, &selection, &policy(Priority::Low, 5));
        assert_eq!(result.applied.len(), 1);
        assert_eq!(result.applied[0].id, "a");
        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.conflicts[0].id, "b");
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_stale_original_is_a_conflict_not_a_skip() {
        let selection = vec![rec(
            "a",
            Category::ActionVerbs,
            "experience",
            "no longer present",
            "x",
            Priority::High,
        )];
        let result = filter_recommendations(CONTENT, &selection, &policy(Priority::Low, 5));
        assert!(result.applied.is_empty());
        assert_eq!(result.conflicts.len(), 1);
    }

    #[test]
    fn test_policy_monotonicity_on_threshold() {
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
            rec("b", Category::ActionVerbs, "summary", "helped with", "facilitated", Priority::Medium),
            rec("c", Category::ActionVerbs, "summary", "daily", "every day", Priority::Low),
        ];
        let mut last = usize::MAX;
        for threshold in [Priority::Low, Priority::Medium, Priority::High] {
            let applied =
                filter_recommendations(CONTENT, &selection, &policy(threshold, 5)).applied;
            assert!(applied.len() <= last);
            last = applied.len();
        }
    }

    #[test]
    fn test_deterministic_given_same_order() {
        let selection = vec![
            rec("a", Category::ActionVerbs, "experience", "worked on", "developed", Priority::High),
            rec("b", Category::ActionVerbs, "experience", "helped with", "facilitated", Priority::High),
        ];
        let p = policy(Priority::Low, 5);
        let first = filter_recommendations(CONTENT, &selection, &p);
        let second = filter_recommendations(CONTENT, &selection, &p);
        let ids = |r: &ApplicationResult| {
            r.applied.iter().map(|x| x.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let result = filter_recommendations(CONTENT, &[], &policy(Priority::Low, 5));
        assert!(result.applied.is_empty());
        assert!(result.skipped.is_empty());
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_auto_selection_includes_low_risk_past_category_restriction() {
        let mut p = policy(Priority::Low, 5);
        p.auto_apply_low_risk = true;
        p.selected_categories.insert(Category::KeywordIntegration);

        let mut formatting = rec(
            "f",
            Category::Formatting,
            "general",
            "\t",
            "  ",
            Priority::Low,
        );
        formatting.impact = 2;
        let mut verbs = rec(
            "v",
            Category::ActionVerbs,
            "experience",
            "worked on",
            "developed",
            Priority::Medium,
        );
        verbs.impact = 5;

        let selected = auto_selection(&[formatting, verbs], &p);
        let ids: Vec<_> = selected.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f"]);
    }

    #[test]
    fn test_auto_selection_respects_priority_threshold() {
        let mut p = policy(Priority::High, 5);
        p.auto_apply_low_risk = true;
        let mut low = rec("l", Category::Formatting, "general", "\t", "  ", Priority::Low);
        low.impact = 2;
        assert!(auto_selection(&[low], &p).is_empty());
    }

}
