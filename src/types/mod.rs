// src/types/mod.rs
pub mod analysis;
pub mod recommendation;

pub use analysis::{
    AnalysisReport, Improvement, ImprovementStatus, ImprovementValidationResult, KeywordAnalysis,
    OptimizationCompleteness, SectionScore, SectionStatus,
};
pub use recommendation::{
    ApplicationPolicy, ApplicationResult, Category, ChangeRecord, EditType, Priority,
    Recommendation, SkipReason, SkippedRecommendation,
};
