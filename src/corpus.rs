//! Corpus-level checks: rules that need visibility across every document.
//!
//! These run as a second phase, after all documents have been loaded, over
//! the full listing. Keeping them out of the per-document pass keeps that
//! pass embarrassingly parallel and makes this one independently testable
//! against a hand-built listing.

use std::collections::BTreeMap;

use regex::Regex;

use crate::config::Config;
use crate::models::{Document, Finding, RuleId, Severity};

/// Run every corpus-level check over the loaded documents, in a fixed
/// order so the resulting report is stable.
pub fn run_corpus_rules(docs: &[Document], config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    findings.extend(check_duplicate_basenames(docs, config));
    findings.extend(check_filename_convention(docs, config));
    findings.extend(check_file_size_class(docs, config));
    findings.extend(check_trailing_newline(docs));
    findings
}

/// Two documents sharing a basename break retrieval-source attribution
/// downstream: a chunk's cited filename no longer identifies one file.
///
/// One finding per group, attributed to the first member in path order so
/// the per-file summary only ever references validated paths; the message
/// lists every member.
fn check_duplicate_basenames(docs: &[Document], config: &Config) -> Vec<Finding> {
    let mut by_basename: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for doc in docs {
        by_basename
            .entry(doc.basename())
            .or_default()
            .push(&doc.path);
    }

    let severity = config.severity.duplicate_basename();
    by_basename
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(basename, mut paths)| {
            paths.sort_unstable();
            Finding::new(
                RuleId::DuplicateBasename,
                severity,
                paths[0],
                format!(
                    "{} files share the basename '{}': {}",
                    paths.len(),
                    basename,
                    paths.join(", ")
                ),
            )
        })
        .collect()
}

fn check_filename_convention(docs: &[Document], config: &Config) -> Vec<Finding> {
    let kebab = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    let severity = config.severity.filename_convention();
    docs.iter()
        .filter(|doc| !kebab.is_match(doc.stem()))
        .map(|doc| {
            Finding::new(
                RuleId::FilenameConvention,
                severity,
                &doc.path,
                format!(
                    "filename '{}' is not lowercase-kebab-case",
                    doc.stem()
                ),
            )
        })
        .collect()
}

fn check_file_size_class(docs: &[Document], config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    for doc in docs.iter().filter(|d| d.load_ok) {
        if doc.line_count < config.limits.stub_lines {
            findings.push(Finding::new(
                RuleId::StubFile,
                Severity::Advisory,
                &doc.path,
                format!(
                    "file has {} lines, below the {}-line stub threshold",
                    doc.line_count, config.limits.stub_lines
                ),
            ));
        } else if doc.line_count > config.limits.oversized_lines {
            findings.push(Finding::new(
                RuleId::OversizedFile,
                Severity::Advisory,
                &doc.path,
                format!(
                    "file has {} lines, above the {}-line review threshold",
                    doc.line_count, config.limits.oversized_lines
                ),
            ));
        }
    }
    findings
}

fn check_trailing_newline(docs: &[Document]) -> Vec<Finding> {
    docs.iter()
        .filter(|doc| doc.load_ok && !doc.raw.is_empty() && !doc.raw.ends_with('\n'))
        .map(|doc| {
            Finding::new(
                RuleId::MissingTrailingNewline,
                Severity::Advisory,
                &doc.path,
                "file does not end with a newline".to_string(),
            )
        })
        .collect()
}
