// src/validation.rs
//! Schema validation for upstream analysis data.
//!
//! The analysis provider is an external service whose output crosses a trust
//! boundary. Nothing past this pass sees unvalidated input: absent arrays
//! become empty, absent strings become defaults, out-of-range scores and wrong
//! types are surfaced as errors to the caller.

use crate::types::{
    AnalysisReport, Improvement, KeywordAnalysis, Priority, SectionScore, SectionStatus,
};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub fn validate_analysis(raw: &Value) -> Result<AnalysisReport> {
    let obj = raw
        .as_object()
        .context("Analysis data must be a JSON object")?;

    let industry = string_or_default(obj.get("industry"), "general");
    let target_role = string_or_default(obj.get("targetRole"), "");

    let ats_score = score_value(obj.get("atsScore").unwrap_or(&Value::Null), "atsScore")?;

    let keywords = match obj.get("keywords") {
        Some(Value::Object(kw)) => KeywordAnalysis {
            found: string_array(kw.get("found")),
            missing: string_array(kw.get("missing")),
            suggestions: string_array(kw.get("suggestions")),
        },
        Some(other) if !other.is_null() => {
            anyhow::bail!("keywords must be an object, got {}", type_name(other))
        }
        _ => KeywordAnalysis::default(),
    };

    let mut sections = HashMap::new();
    if let Some(value) = obj.get("sections") {
        let table = value
            .as_object()
            .context("sections must be an object keyed by section name")?;
        for (name, entry) in table {
            let entry = entry
                .as_object()
                .with_context(|| format!("section '{}' must be an object", name))?;
            let score = score_value(entry.get("score").unwrap_or(&Value::Null), name)?;
            let status = match entry.get("status").and_then(Value::as_str) {
                Some("excellent") => SectionStatus::Excellent,
                Some("good") => SectionStatus::Good,
                Some("needs-improvement") | None => SectionStatus::NeedsImprovement,
                Some(other) => {
                    warn!("Unknown section status '{}', treating as needs-improvement", other);
                    SectionStatus::NeedsImprovement
                }
            };
            sections.insert(name.clone(), SectionScore { score, status });
        }
    }

    let mut improvements = Vec::new();
    if let Some(value) = obj.get("improvements") {
        let list = value.as_array().context("improvements must be an array")?;
        for (index, entry) in list.iter().enumerate() {
            let entry = entry
                .as_object()
                .with_context(|| format!("improvements[{}] must be an object", index))?;
            let priority = match entry.get("priority").and_then(Value::as_str) {
                Some("high") => Priority::High,
                Some("medium") | None => Priority::Medium,
                Some("low") => Priority::Low,
                Some(other) => {
                    warn!("Unknown improvement priority '{}', treating as medium", other);
                    Priority::Medium
                }
            };
            improvements.push(Improvement {
                priority,
                issue: string_or_default(entry.get("issue"), ""),
                suggestion: string_or_default(entry.get("suggestion"), ""),
            });
        }
    }

    Ok(AnalysisReport {
        industry,
        target_role,
        ats_score,
        keywords,
        sections,
        improvements,
    })
}

fn string_or_default(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn score_value(value: &Value, field: &str) -> Result<u8> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => {
            let score = n
                .as_f64()
                .with_context(|| format!("{}: score is not a finite number", field))?;
            if !(0.0..=100.0).contains(&score) {
                anyhow::bail!("{}: score {} out of range 0-100", field, score);
            }
            Ok(score.round() as u8)
        }
        other => anyhow::bail!("{}: score must be a number, got {}", field, type_name(other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
