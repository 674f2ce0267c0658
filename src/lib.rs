//! Deterministic resume optimization core: recommendation generation, policy
//! filtering, text application, improvement coverage, and completeness
//! aggregation. All stages are synchronous, in-memory, and free of I/O;
//! network, persistence, and export surfaces belong to the embedding
//! application.

pub mod applicator;
pub mod completeness;
pub mod coverage;
pub mod generator;
pub mod pipeline;
pub mod policy;
pub mod rules;
pub mod types;
pub mod validation;

pub use applicator::{apply_recommendations, applied_categories, AppliedChanges, ChangeSummary};
pub use completeness::compute_completeness;
pub use coverage::{improvement_status, validate_improvements};
pub use generator::generate_recommendations;
pub use pipeline::{run_optimization, OptimizationOutcome};
pub use policy::{auto_selection, filter_recommendations};
pub use types::{
    AnalysisReport, ApplicationPolicy, ApplicationResult, Category, ChangeRecord, EditType,
    Improvement, ImprovementStatus, ImprovementValidationResult, KeywordAnalysis,
    OptimizationCompleteness, Priority, Recommendation, SectionScore, SectionStatus, SkipReason,
    SkippedRecommendation,
};
pub use validation::validate_analysis;

use anyhow::Result;
use std::collections::HashSet;

/// Convenience entry point: validate raw upstream analysis JSON and run a
/// full optimization pass over it.
pub fn optimize_resume(
    content: &str,
    raw_analysis: &serde_json::Value,
    policy: &ApplicationPolicy,
) -> Result<OptimizationOutcome> {
    let report = validate_analysis(raw_analysis)?;
    Ok(run_optimization(content, &report, policy, &HashSet::new()))
}
