use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn raglint_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("raglint");
    path
}

const GOOD_FRONTMATTER: &str = "---\n\
title: Sample Document\n\
category: operations\n\
subcategory: deployment\n\
tags: [deploy, ci]\n\
stack: cross-stack\n\
priority: medium\n\
audience: backend\n\
complexity: beginner\n\
doc_type: guide\n\
source_confidence: \"90%\"\n\
last_updated: \"2025-10-01\"\n\
---\n";

/// Filler sections that keep a file above the stub threshold without any
/// single section nearing the chunk budget.
fn pad_sections(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "## Filler {}\nShort filler prose for padding.\nAnother short line.\n",
                i
            )
        })
        .collect()
}

fn write_doc(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("{}{}", GOOD_FRONTMATTER, body)).unwrap();
}

fn run_raglint(args: &[&str]) -> (String, String, Option<i32>) {
    let binary = raglint_binary();
    let output = Command::new(&binary)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run raglint binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code())
}

#[test]
fn clean_corpus_exits_zero() {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "deploy-guide.md",
        &format!(
            "## Overview\nThe validator checks documents.\n{}",
            pad_sections(30)
        ),
    );

    let (stdout, stderr, code) = run_raglint(&["validate", tmp.path().to_str().unwrap()]);
    assert_eq!(code, Some(0), "stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("files validated: 1"));
    assert!(stdout.contains("failures:        0"));
}

#[test]
fn blocking_finding_exits_one() {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "big-doc.md",
        &format!("## Big\n{}\n{}", "x".repeat(1600), pad_sections(30)),
    );

    let (stdout, _, code) = run_raglint(&["validate", tmp.path().to_str().unwrap()]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains("section-length"));
    assert!(stdout.contains("big-doc.md"));
}

#[test]
fn advisory_only_findings_do_not_fail_the_run() {
    let tmp = TempDir::new().unwrap();
    // Stub file: below 80 lines, otherwise conformant.
    write_doc(tmp.path(), "tiny-note.md", "## Note\nA very short note.\n");

    let (stdout, _, code) = run_raglint(&["validate", tmp.path().to_str().unwrap()]);
    assert_eq!(code, Some(0), "stdout={}", stdout);
    assert!(stdout.contains("stub-file"));
}

#[test]
fn json_report_schema() {
    let tmp = TempDir::new().unwrap();
    write_doc(tmp.path(), "tiny-note.md", "## Note\nA very short note.\n");

    let (stdout, _, code) =
        run_raglint(&["validate", tmp.path().to_str().unwrap(), "--json"]);
    assert_eq!(code, Some(0));

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["files_validated"], 1);
    assert!(report["failures"].as_array().unwrap().is_empty());
    assert_eq!(report["summary"]["by_rule"]["stub-file"], 1);
    assert_eq!(
        report["summary"]["by_file"]["tiny-note.md"]["warn_count"]
            .as_u64()
            .unwrap()
            >= 1,
        true
    );
    let warning = &report["warnings"][0];
    assert!(warning["rule"].is_string());
    assert_eq!(warning["severity"], "advisory");
    assert_eq!(warning["path"], "tiny-note.md");
    assert!(warning["message"].is_string());
}

#[test]
fn duplicate_basenames_fail_and_config_can_demote() {
    let tmp = TempDir::new().unwrap();
    let body = format!("## Section\nPlain content here.\n{}", pad_sections(30));
    write_doc(tmp.path(), "a/shared-name.md", &body);
    write_doc(tmp.path(), "b/shared-name.md", &body);

    let (stdout, _, code) = run_raglint(&["validate", tmp.path().to_str().unwrap(), "--json"]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains("duplicate-basename"));

    // The group finding is charged to a real member file; the per-file
    // summary never grows an entry for the bare basename.
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let by_file = report["summary"]["by_file"].as_object().unwrap();
    assert_eq!(by_file.len(), 2);
    assert!(!by_file.contains_key("shared-name.md"));
    assert_eq!(by_file["a/shared-name.md"]["fail_count"], 1);
    assert_eq!(by_file["b/shared-name.md"]["fail_count"], 0);

    // Demote via config and the same corpus passes.
    let config_path = tmp.path().join("raglint.toml");
    fs::write(&config_path, "[severity]\nduplicate_basename = \"advisory\"\n").unwrap();
    let (stdout, _, code) = run_raglint(&[
        "--config",
        config_path.to_str().unwrap(),
        "validate",
        tmp.path().to_str().unwrap(),
    ]);
    assert_eq!(code, Some(0), "stdout={}", stdout);
    assert!(stdout.contains("duplicate-basename"));
}

#[test]
fn missing_frontmatter_fields_are_all_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("partial-doc.md"),
        format!(
            "---\ntitle: Only a title\n---\n## Body\nContent lines.\n{}",
            pad_sections(30)
        ),
    )
    .unwrap();

    let (stdout, _, code) = run_raglint(&[
        "validate",
        tmp.path().to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // 10 of 11 required fields are absent.
    assert_eq!(report["summary"]["by_rule"]["metadata-missing-field"], 10);
}

#[test]
fn one_unreadable_file_does_not_sink_the_run() {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "good-doc.md",
        &format!("## Fine\nAll good here.\n{}", pad_sections(30)),
    );
    // Invalid UTF-8 cannot be read to a string.
    fs::write(tmp.path().join("broken-doc.md"), [0xff, 0xfe, 0x00, 0x42]).unwrap();

    let (stdout, _, code) = run_raglint(&[
        "validate",
        tmp.path().to_str().unwrap(),
        "--json",
    ]);
    assert_eq!(code, Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["files_validated"], 2);
    assert_eq!(report["summary"]["by_rule"]["file-read-error"], 1);
    assert_eq!(report["summary"]["by_file"]["good-doc.md"]["fail_count"], 0);
}

#[test]
fn missing_root_is_fatal_without_a_report() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    let (stdout, stderr, code) = run_raglint(&["validate", missing.to_str().unwrap()]);
    assert_ne!(code, Some(0));
    assert!(!stdout.contains("files validated"));
    assert!(stderr.contains("does not exist"));
}

#[test]
fn out_flag_writes_json_report() {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "fine-doc.md",
        &format!("## Fine\nAll good here.\n{}", pad_sections(30)),
    );
    let out = tmp.path().join("report.json");

    let (_, _, code) = run_raglint(&[
        "validate",
        tmp.path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, Some(0));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["files_validated"], 1); // report.json itself is not discovered
    assert!(report["summary"]["by_file"]["fine-doc.md"].is_object());
}

#[test]
fn sections_drill_down_reports_overage() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("mixed-doc.md");
    fs::write(
        &file,
        format!(
            "{}## Big\n{}\n## Small\nShort section body.\n",
            GOOD_FRONTMATTER,
            "x".repeat(1600)
        ),
    )
    .unwrap();

    let (stdout, stderr, code) = run_raglint(&["sections", file.to_str().unwrap()]);
    assert_eq!(code, Some(0), "stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("FAIL"));
    assert!(stdout.contains("## Big"));
    assert!(stdout.contains("101 over the 1500 limit"));
    assert!(stdout.contains("PASS"));
    assert!(stdout.contains("## Small"));
    assert!(stdout.contains("1/2 sections exceed the 1500 char limit"));
}

#[test]
fn sections_on_sectionless_file_reports_zero() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("flat-doc.md");
    fs::write(
        &file,
        format!("{}Just prose with no headings at all.\n", GOOD_FRONTMATTER),
    )
    .unwrap();

    let (stdout, _, code) = run_raglint(&["sections", file.to_str().unwrap()]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("no '##' sections found"));
    assert!(stdout.contains("0/0 sections exceed the 1500 char limit"));
}

#[test]
fn sections_on_missing_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("ghost.md");
    let (_, stderr, code) = run_raglint(&["sections", missing.to_str().unwrap()]);
    assert_ne!(code, Some(0));
    assert!(stderr.contains("file not found"));
}

#[test]
fn validator_runs_are_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "repeat-doc.md",
        &format!("## Big\n{}\n{}", "x".repeat(1600), pad_sections(30)),
    );

    let args = ["validate", tmp.path().to_str().unwrap(), "--json"];
    let (first, _, _) = run_raglint(&args);
    let (second, _, _) = run_raglint(&args);
    assert_eq!(first, second);
}
