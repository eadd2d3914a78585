//! Validation progress reporting.
//!
//! Emits observable progress during `raglint validate` so users watching a
//! large corpus run see what is being checked. Progress goes to **stderr**
//! so stdout stays parseable (text report or `--json`).

use std::io::Write;

/// A single progress event for a validation run.
#[derive(Clone, Debug)]
pub enum ValidateProgressEvent {
    /// Walking the corpus root; total unknown.
    Discovering,
    /// Per-document phase: n files checked out of total.
    Checking { n: u64, total: u64 },
}

/// Reports validation progress. Implementations write to stderr.
pub trait ProgressReporter {
    fn report(&self, event: ValidateProgressEvent);
}

/// Human-friendly progress: "validate  checking  1,234 / 5,000 files".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ValidateProgressEvent) {
        let line = match &event {
            ValidateProgressEvent::Discovering => "validate  discovering...\n".to_string(),
            ValidateProgressEvent::Checking { n, total } => {
                format!(
                    "validate  checking  {} / {} files\n",
                    format_number(*n),
                    format_number(*total)
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ValidateProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off or human-readable on stderr.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
        }
    }
}
