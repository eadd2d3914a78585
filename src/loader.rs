//! Document loading: raw file → [`Document`] plus any load findings.
//!
//! The loader never aborts the batch. Unreadable files, missing frontmatter
//! delimiters, and unparseable YAML all become findings on the document,
//! and as much of the file as possible is still handed to the structural
//! checks (a parse failure leaves an empty metadata mapping so the schema
//! validator can enumerate every missing field).

use std::path::Path;

use crate::models::{Document, Finding, Metadata, RuleId, Severity};

const DELIMITER: &str = "---";

/// Load one file. Always returns a Document; problems are findings.
pub fn load_document(abs_path: &Path, rel_path: &str) -> (Document, Vec<Finding>) {
    let raw = match std::fs::read_to_string(abs_path) {
        Ok(text) => text,
        Err(err) => {
            let finding = Finding::new(
                RuleId::FileReadError,
                Severity::Blocking,
                rel_path,
                format!("failed to read file: {}", err),
            );
            return (empty_document(rel_path), vec![finding]);
        }
    };

    let (metadata, body_start_line, findings) = split_frontmatter(&raw, rel_path);

    let body: String = raw
        .split_inclusive('\n')
        .skip(body_start_line)
        .collect();

    // Advisory for later corpus checks and verbose output.
    let line_count = raw.lines().count();

    let doc = Document {
        path: rel_path.to_string(),
        raw,
        line_count,
        metadata,
        body,
        body_line_offset: body_start_line,
        load_ok: true,
    };

    (doc, findings)
}

fn empty_document(rel_path: &str) -> Document {
    Document {
        path: rel_path.to_string(),
        raw: String::new(),
        line_count: 0,
        metadata: Metadata::new(),
        body: String::new(),
        body_line_offset: 0,
        load_ok: false,
    }
}

/// Split the leading frontmatter block off the raw text.
///
/// Returns the parsed metadata, the number of raw lines consumed by the
/// header (0 when there is none, so the whole file is body), and any
/// findings produced along the way.
fn split_frontmatter(raw: &str, path: &str) -> (Metadata, usize, Vec<Finding>) {
    let mut findings = Vec::new();
    let lines: Vec<&str> = raw.lines().collect();

    let first = lines.first().map(|l| l.trim_end()).unwrap_or("");
    if first != DELIMITER {
        let message = if first.starts_with("# ") {
            "file opens with an H1 heading instead of a frontmatter block (remove the H1)"
                .to_string()
        } else {
            "file does not begin with a '---' frontmatter block".to_string()
        };
        findings.push(
            Finding::new(RuleId::MissingMetadataBlock, Severity::Blocking, path, message)
                .at_line(1),
        );
        return (Metadata::new(), 0, findings);
    }

    let close = lines[1..]
        .iter()
        .position(|l| l.trim_end() == DELIMITER)
        .map(|idx| idx + 1);

    let close = match close {
        Some(idx) => idx,
        None => {
            findings.push(
                Finding::new(
                    RuleId::MetadataParseError,
                    Severity::Blocking,
                    path,
                    "frontmatter block is not closed (missing second '---')".to_string(),
                )
                .at_line(1),
            );
            // Treat everything after the opening delimiter as body.
            return (Metadata::new(), 1, findings);
        }
    };

    let yaml_text = lines[1..close].join("\n");
    if yaml_text.trim().is_empty() {
        // An empty block parses to nothing; the schema validator will
        // enumerate every required field as missing.
        return (Metadata::new(), close + 1, findings);
    }
    let metadata = match serde_yaml::from_str::<Metadata>(&yaml_text) {
        Ok(map) => map,
        Err(err) => {
            findings.push(
                Finding::new(
                    RuleId::MetadataParseError,
                    Severity::Blocking,
                    path,
                    format!("frontmatter is not a valid YAML mapping: {}", err),
                )
                .at_line(2),
            );
            Metadata::new()
        }
    };

    (metadata, close + 1, findings)
}
