//! Batch validation pipeline orchestration.
//!
//! Coordinates the full run as a two-phase map-reduce over an immutable
//! file set. Phase 1 is per-document and independent across files: load →
//! metadata schema → section model → structural rules. Phase 2 runs the
//! corpus-level rules over the complete listing, which is why it must wait
//! for every document to load. One unreadable or malformed file becomes
//! findings on that document and never sinks the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::corpus::run_corpus_rules;
use crate::discover::discover_documents;
use crate::frontmatter::validate_metadata;
use crate::loader::load_document;
use crate::models::{Document, Finding, Severity};
use crate::progress::{ProgressMode, ValidateProgressEvent};
use crate::report::Report;
use crate::rules::run_structural_rules;
use crate::section::build_sections;

pub struct ValidateOptions {
    /// Print the structured report to stdout instead of text.
    pub json: bool,
    /// Also write the structured report to this file.
    pub out: Option<PathBuf>,
    pub verbose: bool,
    pub progress: ProgressMode,
}

pub fn run_validate(config: &Config, root: &Path, opts: &ValidateOptions) -> Result<Report> {
    let reporter = opts.progress.reporter();
    reporter.report(ValidateProgressEvent::Discovering);

    let files = discover_documents(root, &config.discovery)?;
    let total = files.len() as u64;

    // Phase 1: per-document validation, independent across files.
    let mut documents: Vec<Document> = Vec::with_capacity(files.len());
    let mut findings: Vec<Finding> = Vec::new();

    for (n, file) in files.iter().enumerate() {
        let (doc, mut doc_findings) = load_document(&file.path, &file.relative);

        if doc.load_ok {
            doc_findings.extend(validate_metadata(&doc.path, &doc.metadata));
            let model = build_sections(&doc.body);
            doc_findings.extend(run_structural_rules(&doc, &model, &config.limits));
        }

        if opts.verbose && !opts.json {
            print_file_status(&doc, &doc_findings);
        }

        findings.extend(doc_findings);
        documents.push(doc);
        reporter.report(ValidateProgressEvent::Checking {
            n: n as u64 + 1,
            total,
        });
    }

    // Phase 2: corpus-level rules over the full listing.
    findings.extend(run_corpus_rules(&documents, config));

    let paths: Vec<String> = documents.iter().map(|d| d.path.clone()).collect();
    let report = Report::build(&paths, findings);

    if let Some(out_path) = &opts.out {
        let json = report.to_json()?;
        std::fs::write(out_path, json)
            .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
    }

    if opts.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text(opts.verbose));
        if let Some(out_path) = &opts.out {
            println!();
            println!("json report written to {}", out_path.display());
        }
    }

    Ok(report)
}

/// One status line per file under `--verbose`, before corpus checks run.
fn print_file_status(doc: &Document, findings: &[Finding]) {
    let has_fail = findings.iter().any(|f| f.severity == Severity::Blocking);
    let has_warn = findings.iter().any(|f| f.severity == Severity::Advisory);
    let status = if has_fail {
        "FAIL"
    } else if has_warn {
        "WARN"
    } else {
        "PASS"
    };
    println!("{} {} ({} lines)", status, doc.path, doc.line_count);
}
