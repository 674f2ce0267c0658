// src/types/analysis.rs
//! Typed shapes for upstream analysis data and derived coverage results

use crate::types::recommendation::{Category, Priority};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Validated snapshot of one upstream analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub industry: String,
    pub target_role: String,
    /// Overall ATS compatibility estimate, 0-100
    pub ats_score: u8,
    pub keywords: KeywordAnalysis,
    /// Per-section scores keyed by section label
    pub sections: HashMap<String, SectionScore>,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionScore {
    /// 0-100
    pub score: u8,
    pub status: SectionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    Excellent,
    Good,
    NeedsImprovement,
}

/// Human-readable issue surfaced by the upstream analysis. Read-only to this
/// core; only annotated with a derived status, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Improvement {
    pub priority: Priority,
    pub issue: String,
    pub suggestion: String,
}

/// Index partition of an improvement list against applied changes.
/// The three index sets cover the full index range exactly, with no overlaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementValidationResult {
    pub addressed: Vec<usize>,
    pub partially_addressed: Vec<usize>,
    pub not_addressed: Vec<usize>,
    pub ai_applied_categories: HashSet<Category>,
}

/// Display status for one improvement, computed on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementStatus {
    ManuallyCompleted,
    AiApplied,
    PartiallyApplied,
    NotAddressed,
}

/// Display-only completeness summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationCompleteness {
    pub total_improvements: usize,
    /// ai_addressed_count + manually_completed_count; partial credit excluded
    pub completed_count: usize,
    pub ai_addressed_count: usize,
    pub manually_completed_count: usize,
    pub partially_addressed_count: usize,
    pub is_fully_optimized: bool,
    /// Rounded percent; 100 when there are no improvements at all
    pub completion_percentage: u32,
}
