//! Report aggregation and rendering.
//!
//! Merges per-document and corpus-level findings into one [`Report`],
//! renders it as JSON for tooling or as line-oriented text for terminals,
//! and computes the exit status. All map keys are BTree-ordered and all
//! finding lists preserve pipeline order, so two runs over an unchanged
//! corpus render byte-identical output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Finding, Severity};

#[derive(Debug, Serialize)]
pub struct Report {
    pub files_validated: usize,
    pub failures: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub by_rule: BTreeMap<&'static str, usize>,
    pub by_file: BTreeMap<String, FileCounts>,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct FileCounts {
    pub fail_count: usize,
    pub warn_count: usize,
}

impl Report {
    /// Aggregate findings for a run. `paths` is every validated file, so
    /// clean files still appear in the per-file summary with zero counts.
    pub fn build(paths: &[String], findings: Vec<Finding>) -> Report {
        let mut by_rule: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut by_file: BTreeMap<String, FileCounts> = BTreeMap::new();

        for path in paths {
            by_file.entry(path.clone()).or_default();
        }

        let mut failures = Vec::new();
        let mut warnings = Vec::new();
        for finding in findings {
            *by_rule.entry(finding.rule.as_str()).or_default() += 1;
            let counts = by_file.entry(finding.path.clone()).or_default();
            match finding.severity {
                Severity::Blocking => {
                    counts.fail_count += 1;
                    failures.push(finding);
                }
                Severity::Advisory => {
                    counts.warn_count += 1;
                    warnings.push(finding);
                }
            }
        }

        Report {
            files_validated: paths.len(),
            failures,
            warnings,
            summary: Summary { by_rule, by_file },
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Line-oriented text form: totals first, then the per-rule breakdown
    /// sorted worst-first, then the failing files, so a human can triage
    /// before reading the full listing (shown under `verbose`).
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();
        let mut line = |s: String| {
            out.push_str(&s);
            out.push('\n');
        };

        let failing_files = self
            .summary
            .by_file
            .values()
            .filter(|c| c.fail_count > 0)
            .count();
        let passing_files = self.files_validated - failing_files.min(self.files_validated);

        line("raglint — validation report".to_string());
        line("===========================".to_string());
        line(String::new());
        line(format!("  files validated: {}", self.files_validated));
        line(format!("  passing:         {}", passing_files));
        line(format!("  failing:         {}", failing_files));
        line(format!("  failures:        {}", self.failures.len()));
        line(format!("  warnings:        {}", self.warnings.len()));

        if !self.summary.by_rule.is_empty() {
            line(String::new());
            line("  by rule:".to_string());
            line(format!("  {:<32} {:>6}", "RULE", "COUNT"));
            line(format!("  {}", "-".repeat(39)));
            let mut rules: Vec<(&&str, &usize)> = self.summary.by_rule.iter().collect();
            rules.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (rule, count) in rules {
                line(format!("  {:<32} {:>6}", rule, count));
            }
        }

        let mut offenders: Vec<(&String, &FileCounts)> = self
            .summary
            .by_file
            .iter()
            .filter(|(_, c)| c.fail_count > 0)
            .collect();
        offenders.sort_by(|a, b| b.1.fail_count.cmp(&a.1.fail_count).then(a.0.cmp(b.0)));
        if !offenders.is_empty() {
            line(String::new());
            line("  failing files:".to_string());
            line(format!(
                "  {:<48} {:>8} {:>8}",
                "PATH", "FAILURES", "WARNINGS"
            ));
            line(format!("  {}", "-".repeat(66)));
            let shown = offenders.len().min(10);
            for (path, counts) in &offenders[..shown] {
                line(format!(
                    "  {:<48} {:>8} {:>8}",
                    path, counts.fail_count, counts.warn_count
                ));
            }
            if offenders.len() > shown {
                line(format!("  ... and {} more", offenders.len() - shown));
            }
        }

        if verbose && (!self.failures.is_empty() || !self.warnings.is_empty()) {
            line(String::new());
            line("  findings:".to_string());
            for (path, _) in self.summary.by_file.iter() {
                let mut shown_header = false;
                for finding in self.failures.iter().chain(self.warnings.iter()) {
                    if &finding.path != path {
                        continue;
                    }
                    if !shown_header {
                        line(String::new());
                        line(format!("  {}", path));
                        shown_header = true;
                    }
                    let tag = match finding.severity {
                        Severity::Blocking => "FAIL",
                        Severity::Advisory => "WARN",
                    };
                    let loc = finding
                        .location
                        .as_ref()
                        .map(|l| format!(" [{}]", l))
                        .unwrap_or_default();
                    line(format!(
                        "    {} {}{}: {}",
                        tag, finding.rule, loc, finding.message
                    ));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, RuleId};

    fn finding(rule: RuleId, severity: Severity, path: &str) -> Finding {
        Finding::new(rule, severity, path, format!("{} on {}", rule, path))
    }

    fn sample() -> Report {
        let paths = vec!["a.md".to_string(), "b.md".to_string(), "c.md".to_string()];
        let findings = vec![
            finding(RuleId::SectionLength, Severity::Blocking, "a.md"),
            finding(RuleId::SectionLength, Severity::Blocking, "a.md"),
            finding(RuleId::PronounOpening, Severity::Advisory, "a.md"),
            finding(RuleId::StubFile, Severity::Advisory, "b.md"),
        ];
        Report::build(&paths, findings)
    }

    #[test]
    fn partitions_by_severity_and_counts() {
        let report = sample();
        assert_eq!(report.files_validated, 3);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.summary.by_rule["section-length"], 2);
        assert_eq!(report.summary.by_file["a.md"].fail_count, 2);
        assert_eq!(report.summary.by_file["a.md"].warn_count, 1);
        // Clean file is present with zero counts.
        assert_eq!(report.summary.by_file["c.md"].fail_count, 0);
        assert!(report.has_failures());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn advisory_only_run_exits_zero() {
        let paths = vec!["a.md".to_string()];
        let findings = vec![finding(RuleId::StubFile, Severity::Advisory, "a.md")];
        let report = Report::build(&paths, findings);
        assert!(!report.has_failures());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn text_render_puts_totals_first() {
        let report = sample();
        let text = report.render_text(false);
        let totals_pos = text.find("files validated: 3").unwrap();
        let rules_pos = text.find("by rule:").unwrap();
        assert!(totals_pos < rules_pos);
        assert!(text.contains("failing:         1"));
        assert!(text.contains("a.md"));
        // Non-verbose output omits individual findings.
        assert!(!text.contains("section-length on a.md"));
        let verbose = report.render_text(true);
        assert!(verbose.contains("FAIL section-length: section-length on a.md"));
    }

    #[test]
    fn render_is_deterministic() {
        let a = sample();
        let b = sample();
        assert_eq!(a.render_text(true), b.render_text(true));
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn json_schema_shape() {
        let report = sample();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["files_validated"], 3);
        assert!(value["failures"].is_array());
        assert!(value["summary"]["by_rule"].is_object());
        assert_eq!(value["summary"]["by_file"]["a.md"]["fail_count"], 2);
        let first = &value["failures"][0];
        assert_eq!(first["rule"], "section-length");
        assert_eq!(first["severity"], "blocking");
        assert_eq!(first["path"], "a.md");
    }
}
