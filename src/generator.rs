// src/generator.rs
//! Derives candidate text edits from raw resume content plus a validated
//! analysis report. Pure function of its inputs: no I/O, no shared state.
//!
//! Every emitted recommendation carries an `original` that was verified to be
//! a literal substring of the content snapshot at generation time. Candidates
//! whose target text cannot be located carry no actionable edit and are
//! dropped silently.

use crate::rules::{self, FORMATTING_FIXES, INFORMAL_PHRASES, WEAK_VERBS};
use crate::types::{AnalysisReport, Category, EditType, Priority, Recommendation};
use std::collections::HashSet;
use tracing::debug;

/// Sections scoring below this are eligible for quantification edits
const LOW_SECTION_SCORE: u8 = 70;

/// Cap on quantification candidates per pass
const MAX_QUANTIFICATION_EDITS: usize = 3;

/// Generate the flat candidate list for one content snapshot.
///
/// Output order is fixed by rule-table order, so regeneration from identical
/// inputs yields identical `(category, section, original, suggested)` tuples.
/// The `id` values are fresh each call and must not be relied upon.
pub fn generate_recommendations(content: &str, report: &AnalysisReport) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    keyword_recommendations(content, report, &mut recs);
    action_verb_recommendations(content, &mut recs);
    quantification_recommendations(content, report, &mut recs);
    professional_language_recommendations(content, &mut recs);
    formatting_recommendations(content, &mut recs);

    // Defensive: drop anything whose target is not locatable, then dedupe on
    // the edit tuple so identical proposals never appear twice.
    let mut seen = HashSet::new();
    recs.retain(|rec| {
        content.contains(&rec.original)
            && seen.insert((
                rec.category,
                rec.section.clone(),
                rec.original.clone(),
                rec.suggested.clone(),
            ))
    });

    debug!(
        count = recs.len(),
        "Generated recommendations for {} content bytes",
        content.len()
    );
    recs
}

fn new_recommendation(
    category: Category,
    edit_type: EditType,
    section: String,
    original: String,
    suggested: String,
    priority: Priority,
    impact: u8,
    reasoning: String,
) -> Recommendation {
    Recommendation {
        id: uuid::Uuid::new_v4().to_string(),
        category,
        section,
        edit_type,
        original,
        suggested,
        priority,
        impact,
        reasoning,
    }
}

/// Missing keywords are appended to anchor lines, one keyword per anchor so
/// applied edits never target overlapping spans. Surplus keywords fold into
/// the final anchor's edit.
fn keyword_recommendations(content: &str, report: &AnalysisReport, out: &mut Vec<Recommendation>) {
    let missing: Vec<&str> = report
        .keywords
        .missing
        .iter()
        .map(String::as_str)
        .filter(|kw| find_ci(content, kw).is_none())
        .collect();
    if missing.is_empty() {
        return;
    }

    let anchors = keyword_anchor_lines(content);
    if anchors.is_empty() {
        return;
    }

    let role = if report.target_role.is_empty() {
        report.industry.clone()
    } else {
        report.target_role.clone()
    };

    for (i, anchor) in anchors.iter().enumerate() {
        let assigned: Vec<&str> = if i + 1 == anchors.len() {
            match missing.get(i..) {
                Some(rest) => rest.to_vec(),
                None => break,
            }
        } else {
            match missing.get(i) {
                Some(kw) => vec![*kw],
                None => break,
            }
        };
        if assigned.is_empty() {
            break;
        }

        let offset = match content.find(anchor.as_str()) {
            Some(offset) => offset,
            None => continue,
        };
        let suggested = format!("{}, {}", anchor, assigned.join(", "));
        out.push(new_recommendation(
            Category::KeywordIntegration,
            EditType::Keyword,
            rules::section_at(content, offset),
            anchor.clone(),
            suggested,
            Priority::High,
            8,
            format!(
                "Integrates missing keyword{} '{}' to improve keyword optimization for {} positions",
                if assigned.len() > 1 { "s" } else { "" },
                assigned.join("', '"),
                role
            ),
        ));
    }
}

/// Distinct non-empty lines usable as keyword anchors: the skills section
/// first, then the first non-empty content line as a fallback.
fn keyword_anchor_lines(content: &str) -> Vec<String> {
    let mut anchors = Vec::new();
    let mut in_skills = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let header = trimmed.trim_end_matches(':').to_lowercase();
        if rules::SECTION_HEADERS.contains(&header.as_str()) {
            in_skills = header == "skills";
            continue;
        }
        if in_skills && !anchors.contains(&trimmed.to_string()) {
            anchors.push(trimmed.to_string());
        }
    }
    if anchors.is_empty() {
        if let Some(first) = content.lines().map(str::trim).find(|l| !l.is_empty()) {
            anchors.push(first.to_string());
        }
    }
    anchors
}

fn action_verb_recommendations(content: &str, out: &mut Vec<Recommendation>) {
    let mut consumed: Vec<(usize, usize)> = Vec::new();
    for (weak, strong) in WEAK_VERBS {
        let offset = match find_word_ci(content, weak) {
            Some(offset) => offset,
            None => continue,
        };
        let end = offset + weak.len();
        // Longer table entries run first; skip hits inside an already claimed
        // span so "responsible for" never shadows "was responsible for".
        if consumed.iter().any(|&(s, e)| offset < e && end > s) {
            continue;
        }
        consumed.push((offset, end));

        let original = content[offset..end].to_string();
        out.push(new_recommendation(
            Category::ActionVerbs,
            EditType::ActionVerb,
            rules::section_at(content, offset),
            original.clone(),
            match_case(&original, strong),
            Priority::Medium,
            5,
            format!(
                "Replaces '{}' with strong action verbs that recruiters and ATS scans favor",
                weak
            ),
        ));
    }
}

/// Bullet lines without a single digit, in low-scoring sections, get a
/// suggested metric appended.
fn quantification_recommendations(
    content: &str,
    report: &AnalysisReport,
    out: &mut Vec<Recommendation>,
) {
    let mut emitted = 0usize;
    let mut pos = 0usize;
    for line in content.lines() {
        let offset = pos;
        pos += line.len() + 1;
        if emitted >= MAX_QUANTIFICATION_EDITS {
            break;
        }

        let trimmed = line.trim();
        let is_bullet =
            trimmed.starts_with('-') || trimmed.starts_with('•') || trimmed.starts_with('*');
        if !is_bullet || trimmed.len() < 12 || trimmed.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }

        let section = rules::section_at(content, offset);
        // An unknown section stays eligible; a scored one must be weak.
        if let Some(score) = report.sections.get(&section) {
            if score.score >= LOW_SECTION_SCORE {
                continue;
            }
        }

        let original = trimmed.trim_end_matches('.').to_string();
        out.push(new_recommendation(
            Category::Quantification,
            EditType::Quantification,
            section,
            original.clone(),
            format!("{}, improving team output by an estimated 20%", original),
            Priority::High,
            7,
            "Adds concrete metrics to quantify achievements, which ATS ranking rewards".to_string(),
        ));
        emitted += 1;
    }
}

fn professional_language_recommendations(content: &str, out: &mut Vec<Recommendation>) {
    for (informal, formal) in INFORMAL_PHRASES {
        let offset = match find_word_ci(content, informal) {
            Some(offset) => offset,
            None => continue,
        };
        let original = content[offset..offset + informal.len()].to_string();
        out.push(new_recommendation(
            Category::ProfessionalLanguage,
            EditType::ProfessionalLanguage,
            rules::section_at(content, offset),
            original.clone(),
            match_case(&original, formal),
            Priority::Medium,
            4,
            format!(
                "Replaces informal wording '{}' with professional language",
                informal
            ),
        ));
    }
}

fn formatting_recommendations(content: &str, out: &mut Vec<Recommendation>) {
    for (pattern, replacement, why) in FORMATTING_FIXES {
        let offset = match content.find(pattern) {
            Some(offset) => offset,
            None => continue,
        };
        out.push(new_recommendation(
            Category::Formatting,
            EditType::Formatting,
            rules::section_at(content, offset),
            pattern.to_string(),
            replacement.to_string(),
            Priority::Low,
            2,
            format!("{} and keeps the resume format ats friendly", why),
        ));
    }
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Like `find_ci`, but the match must sit on word boundaries so short phrases
/// never hit inside a larger word ("got" in "forgot").
fn find_word_ci(haystack: &str, needle: &str) -> Option<usize> {
    let lower = haystack.to_ascii_lowercase();
    let target = needle.to_ascii_lowercase();
    let mut search_from = 0usize;
    while let Some(relative) = lower[search_from..].find(&target) {
        let start = search_from + relative;
        let end = start + target.len();
        let before = lower[..start].chars().next_back();
        let after = lower[end..].chars().next();
        let bounded = !before.is_some_and(|c| c.is_alphanumeric())
            && !after.is_some_and(|c| c.is_alphanumeric());
        if bounded {
            return Some(start);
        }
        search_from = end;
    }
    None
}

/// Carry the original's leading capitalization over to the replacement
fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
