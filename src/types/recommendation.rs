// src/types/recommendation.rs
//! Data shapes for candidate text edits and their application results

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Broad edit category, used for policy filtering and coverage matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    KeywordIntegration,
    ActionVerbs,
    Quantification,
    ProfessionalLanguage,
    Formatting,
}

impl Category {
    /// Stable wire label, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::KeywordIntegration => "keyword-integration",
            Category::ActionVerbs => "action-verbs",
            Category::Quantification => "quantification",
            Category::ProfessionalLanguage => "professional-language",
            Category::Formatting => "formatting",
        }
    }
}

/// Narrower tag used for downstream aggregation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditType {
    Keyword,
    ActionVerb,
    Quantification,
    ProfessionalLanguage,
    Formatting,
}

/// Recommendation priority. Variant order gives Low < Medium < High so the
/// derived ordering matches the policy threshold semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A single proposed text edit with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub category: Category,
    /// Free-text label for the resume section the edit targets
    pub section: String,
    #[serde(rename = "type")]
    pub edit_type: EditType,
    /// Literal substring of the content snapshot the edit replaces
    pub original: String,
    pub suggested: String,
    pub priority: Priority,
    /// Estimated ATS-score contribution, 0-10
    pub impact: u8,
    pub reasoning: String,
}

/// Caller configuration for one application pass. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationPolicy {
    pub auto_apply_low_risk: bool,
    /// "high" = apply only high, "medium" = high+medium, "low" = apply all
    pub priority_threshold: Priority,
    /// Empty set means no category restriction
    pub selected_categories: HashSet<Category>,
    /// Cap on applied edits sharing the same `section` value
    pub max_changes_per_section: usize,
}

impl Default for ApplicationPolicy {
    fn default() -> Self {
        Self {
            auto_apply_low_risk: false,
            priority_threshold: Priority::Low,
            selected_categories: HashSet::new(),
            max_changes_per_section: 3,
        }
    }
}

/// Why a candidate was excluded by policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    Priority,
    Category,
    SectionCap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRecommendation {
    pub recommendation: Recommendation,
    pub reason: SkipReason,
}

/// Apply/skip/conflict partition produced by the policy filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResult {
    /// Candidates accepted for application, in application order
    pub applied: Vec<Recommendation>,
    /// Candidates excluded by policy, each with a reason code
    pub skipped: Vec<SkippedRecommendation>,
    /// Candidates whose target text was consumed by an earlier edit
    pub conflicts: Vec<Recommendation>,
}

/// Display-oriented projection of one applied edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub category: Category,
    pub section: String,
    pub original: String,
    pub improved: String,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&Category::KeywordIntegration).unwrap();
        assert_eq!(json, "\"keyword-integration\"");
        assert_eq!(Category::ActionVerbs.as_str(), "action-verbs");
    }

    #[test]
    fn test_edit_type_field_renamed() {
        let rec = Recommendation {
            id: "r1".to_string(),
            category: Category::ActionVerbs,
            section: "experience".to_string(),
            edit_type: EditType::ActionVerb,
            original: "worked on".to_string(),
            suggested: "developed".to_string(),
            priority: Priority::Medium,
            impact: 5,
            reasoning: "Stronger action verbs".to_string(),
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["type"], "action-verb");
    }
}
