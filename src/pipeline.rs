// src/pipeline.rs
//! End-to-end orchestration: generate, filter, apply, validate coverage, and
//! aggregate completeness in one pass for callers that do not intervene
//! between stages.

use crate::applicator::{self, AppliedChanges};
use crate::completeness;
use crate::coverage;
use crate::generator;
use crate::policy;
use crate::types::{
    AnalysisReport, ApplicationPolicy, ApplicationResult, ImprovementValidationResult,
    OptimizationCompleteness, Recommendation,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Everything one optimization pass produces. Transient, in-memory,
/// scoped to a single analysis of a single document version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// The full candidate list, before selection
    pub recommendations: Vec<Recommendation>,
    /// Apply/skip/conflict partition of the selection
    pub application: ApplicationResult,
    /// Final content, change log, and display counters
    pub applied: AppliedChanges,
    pub validation: ImprovementValidationResult,
    pub completeness: OptimizationCompleteness,
}

/// Run the full pipeline with the policy's automatic selection.
///
/// Callers that let users check individual recommendations should instead
/// call the stages directly, passing their own selection order to
/// `policy::filter_recommendations`.
pub fn run_optimization(
    content: &str,
    report: &AnalysisReport,
    policy_config: &ApplicationPolicy,
    manually_completed: &HashSet<usize>,
) -> OptimizationOutcome {
    let recommendations = generator::generate_recommendations(content, report);
    let selection = policy::auto_selection(&recommendations, policy_config);
    let application = policy::filter_recommendations(content, &selection, policy_config);
    let applied = applicator::apply_recommendations(content, &application.applied);
    let validation = coverage::validate_improvements(&report.improvements, &applied.changes);
    let completeness = completeness::compute_completeness(
        report.improvements.len(),
        &validation,
        manually_completed,
    );

    info!(
        candidates = recommendations.len(),
        applied = application.applied.len(),
        completion = completeness.completion_percentage,
        "Optimization pass complete"
    );

    OptimizationOutcome {
        recommendations,
        application,
        applied,
        validation,
        completeness,
    }
}
