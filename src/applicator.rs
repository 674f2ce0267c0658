// src/applicator.rs
//! Applies an accepted recommendation list to content, producing the final
//! text, a change log, and the display counters the UI reports.

use crate::types::{Category, ChangeRecord, EditType, Recommendation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Ceiling on the estimated score gain shown to users. The per-edit impact
/// numbers are heuristic and sums above this are not plausible.
const MAX_SCORE_IMPROVEMENT: u32 = 25;

/// Outcome of one application pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedChanges {
    pub content: String,
    /// One record per recommendation actually substituted, in apply order
    pub changes: Vec<ChangeRecord>,
    pub summary: ChangeSummary,
    /// Sum of applied impact values, capped; a display heuristic
    pub estimated_score_improvement: u32,
}

/// Display counters derived from the change log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub keywords_added: usize,
    pub action_verbs_improved: usize,
    pub quantification_edits: usize,
    pub professional_language_edits: usize,
    pub formatting_edits: usize,
}

/// Apply `accepted` sequentially, each as a single first-occurrence literal
/// replacement, in the same order the conflict pass used.
///
/// A recommendation whose `original` is unexpectedly absent at apply time is
/// dropped from the change log and not counted. That case is recoverable and
/// expected when content was edited between analysis and application.
pub fn apply_recommendations(content: &str, accepted: &[Recommendation]) -> AppliedChanges {
    let mut working = content.to_string();
    let mut changes = Vec::new();
    let mut summary = ChangeSummary::default();
    let mut impact_total: u32 = 0;

    for rec in accepted {
        if !working.contains(&rec.original) {
            warn!(
                id = %rec.id,
                section = %rec.section,
                "Recommendation target no longer present at apply time, dropping"
            );
            continue;
        }
        working = working.replacen(&rec.original, &rec.suggested, 1);

        match rec.edit_type {
            EditType::Keyword => summary.keywords_added += 1,
            EditType::ActionVerb => summary.action_verbs_improved += 1,
            EditType::Quantification => summary.quantification_edits += 1,
            EditType::ProfessionalLanguage => summary.professional_language_edits += 1,
            EditType::Formatting => summary.formatting_edits += 1,
        }
        impact_total += u32::from(rec.impact);

        changes.push(ChangeRecord {
            category: rec.category,
            section: rec.section.clone(),
            original: rec.original.clone(),
            improved: rec.suggested.clone(),
            reasoning: rec.reasoning.clone(),
        });
    }

    info!(
        applied = changes.len(),
        requested = accepted.len(),
        "Applied recommendation set"
    );

    AppliedChanges {
        content: working,
        changes,
        summary,
        estimated_score_improvement: impact_total.min(MAX_SCORE_IMPROVEMENT),
    }
}

/// Categories present among applied changes, preserving first-seen order
pub fn applied_categories(changes: &[ChangeRecord]) -> Vec<Category> {
    let mut categories = Vec::new();
    for change in changes {
        if !categories.contains(&change.category) {
            categories.push(change.category);
        }
    }
    categories
}
