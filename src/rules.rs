//! Structural rules over the section model.
//!
//! Each check is an independent pure function `(document, model, limits) ->
//! findings`, registered in [`STRUCTURAL_RULES`] in a fixed order. Checks
//! have no ordering dependency on one another; the fixed order only keeps
//! report output stable. Adding or disabling a rule means editing the
//! registry, not any shared state.

use crate::config::LimitsConfig;
use crate::models::{Document, Finding, RuleId, Severity};
use crate::section::SectionModel;

/// Sentence openers discouraged at the start of a section: a retrieval
/// chunk is read without its surrounding context, so the referent of a
/// leading pronoun is lost. Matched case-sensitively as the whole first
/// token.
const PRONOUN_OPENERS: &[&str] = &["It", "This", "These", "They", "That", "We"];

pub type StructuralRule = fn(&Document, &SectionModel, &LimitsConfig) -> Vec<Finding>;

/// The fixed, ordered rule registry.
pub const STRUCTURAL_RULES: &[StructuralRule] = &[
    check_sections_exist,
    check_section_length,
    check_heading_skip,
    check_pronoun_opening,
    check_code_block_subsection,
    check_code_block_prose,
];

/// Run every registered structural rule over one document.
pub fn run_structural_rules(
    doc: &Document,
    model: &SectionModel,
    limits: &LimitsConfig,
) -> Vec<Finding> {
    STRUCTURAL_RULES
        .iter()
        .flat_map(|rule| rule(doc, model, limits))
        .collect()
}

/// A document with zero level-2 headings cannot be chunked along heading
/// boundaries at all.
fn check_sections_exist(
    doc: &Document,
    model: &SectionModel,
    _limits: &LimitsConfig,
) -> Vec<Finding> {
    if model.roots.is_empty() {
        vec![Finding::new(
            RuleId::NoSections,
            Severity::Advisory,
            &doc.path,
            "no '##' sections found in document".to_string(),
        )]
    } else {
        Vec::new()
    }
}

fn check_section_length(
    doc: &Document,
    model: &SectionModel,
    limits: &LimitsConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for section in model.walk() {
        let length = section.effective_length();
        if length > limits.max_section_chars {
            findings.push(
                Finding::new(
                    RuleId::SectionLength,
                    Severity::Blocking,
                    &doc.path,
                    format!(
                        "section \"{}\" spans {} chars, exceeding the {} char chunk budget by {}",
                        section.heading,
                        length,
                        limits.max_section_chars,
                        length - limits.max_section_chars
                    ),
                )
                .at_section(&section.heading),
            );
        }
    }
    findings
}

/// Walk headings in document order; a jump of more than one level deeper
/// than the immediately preceding heading breaks the hierarchy the
/// splitter's fallback relies on. The baseline is level 1 (the document
/// title), so an opening `##` never trips the check.
fn check_heading_skip(doc: &Document, model: &SectionModel, _limits: &LimitsConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut prev_level: u8 = 1;
    for heading in &model.headings {
        if heading.level > prev_level + 1 {
            findings.push(
                Finding::new(
                    RuleId::HeadingSkip,
                    Severity::Advisory,
                    &doc.path,
                    format!(
                        "heading \"{}\" jumps from level {} to level {}",
                        heading.text, prev_level, heading.level
                    ),
                )
                .at_line(heading.line + doc.body_line_offset),
            );
        }
        prev_level = heading.level;
    }
    findings
}

fn check_pronoun_opening(
    doc: &Document,
    model: &SectionModel,
    _limits: &LimitsConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for section in model.walk() {
        let Some(opening) = section.opening_text.as_deref() else {
            continue;
        };
        for pronoun in PRONOUN_OPENERS {
            let followed_by_space = opening
                .strip_prefix(pronoun)
                .map_or(false, |rest| rest.starts_with(|c: char| c.is_whitespace()));
            if followed_by_space {
                findings.push(
                    Finding::new(
                        RuleId::PronounOpening,
                        Severity::Advisory,
                        &doc.path,
                        format!(
                            "section \"{}\" opens with \"{}\"; a chunk loses the referent",
                            section.heading, pronoun
                        ),
                    )
                    .at_section(&section.heading),
                );
                break;
            }
        }
    }
    findings
}

/// A long code block sitting directly under a level-2 heading gets chunked
/// together with everything else in the section; a `###` wrapper gives the
/// splitter a boundary to fall back to.
fn check_code_block_subsection(
    doc: &Document,
    model: &SectionModel,
    limits: &LimitsConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for section in model.walk() {
        if section.level != 2 {
            continue;
        }
        for block in &section.code_blocks {
            if block.line_count > limits.long_code_block_lines {
                findings.push(
                    Finding::new(
                        RuleId::CodeBlockNeedsSubsection,
                        Severity::Advisory,
                        &doc.path,
                        format!(
                            "{}-line code block sits directly under \"{}\"; blocks over {} lines should get their own '###' subsection",
                            block.line_count, section.heading, limits.long_code_block_lines
                        ),
                    )
                    .at_line(block.line + doc.body_line_offset),
                );
            }
        }
    }
    findings
}

fn check_code_block_prose(
    doc: &Document,
    model: &SectionModel,
    _limits: &LimitsConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut flag = |line: usize| {
        findings.push(
            Finding::new(
                RuleId::CodeBlockNeedsProse,
                Severity::Advisory,
                &doc.path,
                "code block follows its heading with no introductory prose".to_string(),
            )
            .at_line(line + doc.body_line_offset),
        );
    };
    for block in &model.loose_blocks {
        if !block.has_leading_prose {
            flag(block.line);
        }
    }
    for section in model.walk() {
        for block in &section.code_blocks {
            if !block.has_leading_prose {
                flag(block.line);
            }
        }
    }
    findings
}
