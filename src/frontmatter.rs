//! Frontmatter schema validation.
//!
//! Checks a parsed metadata mapping against the fixed field schema:
//! required keys, closed enum sets, the percentage pattern for
//! `source_confidence`, the ISO date for `last_updated`, and the non-empty
//! tag list. Validation never short-circuits: every violated field yields
//! its own finding.

use chrono::NaiveDate;
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

use crate::models::{Finding, Metadata, RuleId, Severity};

/// Every document must carry all of these keys.
pub const REQUIRED_FIELDS: &[&str] = &[
    "title",
    "category",
    "subcategory",
    "tags",
    "stack",
    "priority",
    "audience",
    "complexity",
    "doc_type",
    "source_confidence",
    "last_updated",
];

const VALID_STACKS: &[&str] = &["js-nextjs", "sanity", "php-wp", "cross-stack"];
const VALID_PRIORITIES: &[&str] = &["high", "medium", "low"];
const VALID_AUDIENCES: &[&str] = &["frontend", "backend", "fullstack"];
const VALID_COMPLEXITIES: &[&str] = &["beginner", "intermediate", "advanced"];
const VALID_DOC_TYPES: &[&str] = &["standard", "guide", "reference", "decision"];

const ENUM_FIELDS: &[(&str, &[&str])] = &[
    ("stack", VALID_STACKS),
    ("priority", VALID_PRIORITIES),
    ("audience", VALID_AUDIENCES),
    ("complexity", VALID_COMPLEXITIES),
    ("doc_type", VALID_DOC_TYPES),
];

fn percentage_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+%$").unwrap())
}

/// Render a scalar YAML value the way it appeared in the source.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Validate a metadata mapping against the schema. Pure: predicate in,
/// findings out, one finding per violated field.
pub fn validate_metadata(path: &str, metadata: &Metadata) -> Vec<Finding> {
    let mut findings = Vec::new();

    for field in REQUIRED_FIELDS {
        if !metadata.contains_key(*field) {
            findings.push(Finding::new(
                RuleId::MetadataMissingField,
                Severity::Blocking,
                path,
                format!("missing required frontmatter field '{}'", field),
            ));
        }
    }

    for (field, allowed) in ENUM_FIELDS {
        if let Some(value) = metadata.get(*field) {
            let text = scalar_to_string(value).unwrap_or_else(|| yaml_kind(value).to_string());
            if !allowed.contains(&text.as_str()) {
                findings.push(Finding::new(
                    RuleId::MetadataInvalidEnum,
                    Severity::Blocking,
                    path,
                    format!(
                        "invalid {} value '{}', must be one of: {}",
                        field,
                        text,
                        allowed.join(", ")
                    ),
                ));
            }
        }
    }

    if let Some(value) = metadata.get("source_confidence") {
        let text = scalar_to_string(value).unwrap_or_default();
        if !percentage_pattern().is_match(&text) {
            findings.push(Finding::new(
                RuleId::MetadataInvalidFormat,
                Severity::Blocking,
                path,
                format!(
                    "invalid source_confidence '{}', must match a percentage like '85%'",
                    text
                ),
            ));
        }
    }

    if let Some(value) = metadata.get("last_updated") {
        let text = scalar_to_string(value).unwrap_or_default();
        if NaiveDate::parse_from_str(&text, "%Y-%m-%d").is_err() {
            findings.push(Finding::new(
                RuleId::MetadataInvalidFormat,
                Severity::Blocking,
                path,
                format!(
                    "invalid last_updated '{}', must be an ISO date (YYYY-MM-DD)",
                    text
                ),
            ));
        }
    }

    if let Some(value) = metadata.get("tags") {
        match value {
            Value::Sequence(items) if !items.is_empty() => {}
            Value::Sequence(_) => findings.push(Finding::new(
                RuleId::MetadataInvalidFormat,
                Severity::Blocking,
                path,
                "tags list must not be empty".to_string(),
            )),
            other => findings.push(Finding::new(
                RuleId::MetadataInvalidFormat,
                Severity::Blocking,
                path,
                format!(
                    "tags must be a list of strings, got {}",
                    yaml_kind(other)
                ),
            )),
        }
    }

    findings
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
