// src/completeness.rs
//! Aggregates AI-addressed, manually-completed, and partially-addressed
//! counts into the completeness summary the UI displays. Pure arithmetic,
//! recomputed on every relevant state change.

use crate::types::{ImprovementValidationResult, OptimizationCompleteness};
use std::collections::HashSet;

/// Combine coverage results and manual completions into one summary.
///
/// Partial credit deliberately does not count as complete. An index both
/// AI-addressed and manually completed counts once, as manual, matching the
/// display precedence and keeping `completed_count <= total_improvements`.
pub fn compute_completeness(
    total_improvements: usize,
    validation: &ImprovementValidationResult,
    manually_completed: &HashSet<usize>,
) -> OptimizationCompleteness {
    let manually_completed_count = manually_completed
        .iter()
        .filter(|&&index| index < total_improvements)
        .count();

    let ai_addressed_count = validation
        .addressed
        .iter()
        .filter(|index| !manually_completed.contains(index))
        .count();

    let partially_addressed_count = validation
        .partially_addressed
        .iter()
        .filter(|index| !manually_completed.contains(index))
        .count();

    let completed_count = ai_addressed_count + manually_completed_count;

    let completion_percentage = if total_improvements == 0 {
        100
    } else {
        ((completed_count as f64 / total_improvements as f64) * 100.0).round() as u32
    };

    OptimizationCompleteness {
        total_improvements,
        completed_count,
        ai_addressed_count,
        manually_completed_count,
        partially_addressed_count,
        is_fully_optimized: completed_count == total_improvements,
        completion_percentage,
    }
}
