//! Single-document drill-down: per-section length diagnostics.
//!
//! Runs only the loader, the section model builder, and the length check
//! against one file, printing every section's measured span so an author
//! can iterate on a failing document without re-running the whole corpus.

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::loader::load_document;
use crate::section::build_sections;

pub fn run_sections(path: &Path, config: &Config) -> Result<()> {
    if !path.is_file() {
        bail!("file not found: {}", path.display());
    }

    let display = path.display().to_string();
    let (doc, _) = load_document(path, &display);
    if !doc.load_ok {
        bail!("failed to read file: {}", path.display());
    }

    let model = build_sections(&doc.body);
    let limit = config.limits.max_section_chars;

    println!("{}", "=".repeat(72));
    println!("File: {}", display);
    println!("{}", "=".repeat(72));
    println!();

    if model.roots.is_empty() {
        println!("no '##' sections found in document");
    }

    let sections = model.walk();
    let mut violations = 0;
    for section in &sections {
        let length = section.effective_length();
        let marker = "#".repeat(section.level as usize);
        if length > limit {
            violations += 1;
            println!("FAIL  {:>6} chars  {} {}", length, marker, section.heading);
            println!(
                "      {} over the {} limit; {} subsections, {} code blocks",
                length - limit,
                limit,
                section.subsection_count(),
                section.total_code_blocks()
            );
        } else {
            println!("PASS  {:>6} chars  {} {}", length, marker, section.heading);
        }
    }

    println!();
    println!(
        "{}/{} sections exceed the {} char limit",
        violations,
        sections.len(),
        limit
    );

    Ok(())
}
