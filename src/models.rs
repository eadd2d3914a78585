//! Core data models used throughout raglint.
//!
//! These types represent the documents, findings, and severities that flow
//! through the validation pipeline. Findings are append-only facts: rules
//! produce them, the reporter aggregates them, nothing mutates them.

use std::collections::BTreeMap;

use serde::Serialize;

/// Identifier for a validation rule. Every finding carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    MetadataMissingField,
    MetadataInvalidEnum,
    MetadataInvalidFormat,
    SectionLength,
    HeadingSkip,
    PronounOpening,
    CodeBlockNeedsSubsection,
    CodeBlockNeedsProse,
    FilenameConvention,
    DuplicateBasename,
    StubFile,
    OversizedFile,
    MissingTrailingNewline,
    NoSections,
    MissingMetadataBlock,
    MetadataParseError,
    FileReadError,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::MetadataMissingField => "metadata-missing-field",
            RuleId::MetadataInvalidEnum => "metadata-invalid-enum",
            RuleId::MetadataInvalidFormat => "metadata-invalid-format",
            RuleId::SectionLength => "section-length",
            RuleId::HeadingSkip => "heading-skip",
            RuleId::PronounOpening => "pronoun-opening",
            RuleId::CodeBlockNeedsSubsection => "code-block-needs-subsection",
            RuleId::CodeBlockNeedsProse => "code-block-needs-prose",
            RuleId::FilenameConvention => "filename-convention",
            RuleId::DuplicateBasename => "duplicate-basename",
            RuleId::StubFile => "stub-file",
            RuleId::OversizedFile => "oversized-file",
            RuleId::MissingTrailingNewline => "missing-trailing-newline",
            RuleId::NoSections => "no-sections",
            RuleId::MissingMetadataBlock => "missing-metadata-block",
            RuleId::MetadataParseError => "metadata-parse-error",
            RuleId::FileReadError => "file-read-error",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding severity. Blocking findings fail the run (non-zero exit);
/// advisory findings are reported but never affect exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocking,
    Advisory,
}

/// Where in a file a finding points: a section heading or a line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Section(String),
    Line(usize),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Section(heading) => write!(f, "section \"{}\"", heading),
            Location::Line(n) => write!(f, "line {}", n),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One reported rule violation or advisory observation.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule: RuleId,
    pub severity: Severity,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub message: String,
}

impl Finding {
    pub fn new(rule: RuleId, severity: Severity, path: &str, message: String) -> Self {
        Finding {
            rule,
            severity,
            path: path.to_string(),
            location: None,
            message,
        }
    }

    pub fn at_section(mut self, heading: &str) -> Self {
        self.location = Some(Location::Section(heading.to_string()));
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.location = Some(Location::Line(line));
        self
    }
}

/// Parsed frontmatter: recognized key → raw YAML value.
///
/// An unparseable or absent frontmatter block yields an empty mapping, so
/// the metadata validator can still enumerate every missing required field.
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

/// A document loaded from disk. Identity is the path (relative to the
/// corpus root); immutable after construction, never written back.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the corpus root, used in findings and the report.
    pub path: String,
    /// Raw file text (empty if the file could not be read).
    pub raw: String,
    /// Total line count of the raw text.
    pub line_count: usize,
    pub metadata: Metadata,
    /// Body text after the frontmatter block.
    pub body: String,
    /// Number of raw-file lines preceding the body, so body-relative line
    /// numbers can be reported as file line numbers.
    pub body_line_offset: usize,
    /// False when the file could not be read; content checks are skipped
    /// for such documents, path-level checks still apply.
    pub load_ok: bool,
}

impl Document {
    /// Filename component of the path (with extension).
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Filename without its extension, checked against naming conventions.
    pub fn stem(&self) -> &str {
        let base = self.basename();
        match base.rfind('.') {
            Some(idx) if idx > 0 => &base[..idx],
            _ => base,
        }
    }
}
