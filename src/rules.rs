// src/rules.rs
//! Heuristic rule tables. Rules are data, not inline conditionals, so they can
//! be tested and extended independently of the code that walks them.

use crate::types::Category;

/// Weak verb phrases and their stronger replacements, walked in order.
/// Longer phrases come first so a hit never leaves a dangling prefix behind.
pub const WEAK_VERBS: &[(&str, &str)] = &[
    ("was responsible for", "led"),
    ("responsible for", "led"),
    ("worked on", "developed"),
    ("helped with", "facilitated"),
    ("helped", "facilitated"),
    ("was involved in", "contributed to"),
    ("took care of", "managed"),
    ("dealt with", "resolved"),
    ("made", "created"),
];

/// Informal wording and professional replacements, walked in order
pub const INFORMAL_PHRASES: &[(&str, &str)] = &[
    ("a lot of", "numerous"),
    ("lots of", "extensive"),
    ("really good", "proficient"),
    ("pretty good", "competent"),
    ("stuff", "responsibilities"),
    ("things", "initiatives"),
    ("big", "significant"),
    ("got", "obtained"),
];

/// Whitespace anomalies corrected by formatting recommendations
pub const FORMATTING_FIXES: &[(&str, &str, &str)] = &[
    ("   ", " ", "Collapses runs of spaces that confuse ATS text extraction"),
    ("\t", "  ", "Replaces tab characters, which many ATS parsers mishandle"),
    ("\n\n\n", "\n\n", "Normalizes blank-line spacing between sections"),
];

/// Issue-text keywords that map an improvement to an edit category
pub const CATEGORY_ISSUE_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::KeywordIntegration,
        &["keyword", "ats", "search", "optimization"],
    ),
    (
        Category::ActionVerbs,
        &["action verb", "verb", "passive", "weak language"],
    ),
    (
        Category::Quantification,
        &["quantif", "metric", "number", "achievement", "measurable"],
    ),
    (
        Category::ProfessionalLanguage,
        &["professional", "tone", "wording", "language"],
    ),
    (
        Category::Formatting,
        &["format", "layout", "structure", "spacing"],
    ),
];

/// Domain phrases shared between improvement issues and change reasoning
pub const COMMON_PHRASES: &[&str] = &[
    "resume format",
    "ats friendly",
    "keyword optimization",
    "action verbs",
    "quantify achievements",
    "professional language",
];

/// Section headers recognized when labeling where an edit lands
pub const SECTION_HEADERS: &[&str] = &[
    "summary",
    "objective",
    "experience",
    "work experience",
    "employment",
    "education",
    "skills",
    "projects",
    "certifications",
];

/// Label the section a character offset falls in, by scanning backwards for
/// the nearest recognized header line. Falls back to "general".
pub fn section_at(content: &str, offset: usize) -> String {
    let mut label = "general".to_string();
    let mut pos = 0usize;
    for line in content.lines() {
        if pos > offset {
            break;
        }
        let trimmed = line.trim().trim_end_matches(':').to_lowercase();
        if SECTION_HEADERS.contains(&trimmed.as_str()) {
            label = trimmed;
        }
        pos += line.len() + 1;
    }
    label
}

/// Categories matched against a lower-cased issue text, in table order
pub fn categories_for_issue(issue_lower: &str) -> Vec<Category> {
    CATEGORY_ISSUE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| issue_lower.contains(k)))
        .map(|(category, _)| *category)
        .collect()
}
