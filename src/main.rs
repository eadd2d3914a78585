//! # raglint CLI
//!
//! The `raglint` binary validates a documentation corpus against the
//! retrieval-chunk hygiene rule set.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `raglint validate <root>` | Validate every document under a directory |
//! | `raglint sections <file>` | Per-section length drill-down for one file |
//!
//! ## Examples
//!
//! ```bash
//! # Validate the corpus; exit code 1 if any blocking finding exists
//! raglint validate docs/
//!
//! # Structured report for CI tooling
//! raglint validate docs/ --json
//!
//! # Write the JSON report next to the text summary
//! raglint validate docs/ --out report.json
//!
//! # Iterate on one failing document
//! raglint sections docs/deploy-steps.md
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use raglint::analyze;
use raglint::config::{self, Config};
use raglint::progress::ProgressMode;
use raglint::validate::{run_validate, ValidateOptions};

/// raglint — a batch conformance validator for RAG documentation corpora.
///
/// All thresholds and severity policies can be overridden with a `--config`
/// TOML file; without one, built-in defaults apply.
#[derive(Parser)]
#[command(
    name = "raglint",
    about = "Validate a RAG documentation corpus against chunk-hygiene rules",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Built-in defaults are used when
    /// the file does not exist.
    #[arg(long, global = true, default_value = "./raglint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every document under a corpus root.
    ///
    /// Runs per-document checks (frontmatter schema, section lengths,
    /// heading hierarchy, code-block context) and corpus-level checks
    /// (duplicate basenames, naming convention, size classification).
    /// Exit code 0 when no blocking finding exists, 1 otherwise;
    /// advisory findings never affect the exit code.
    Validate {
        /// Corpus root directory to discover documents under.
        root: PathBuf,

        /// Emit the report as JSON on stdout instead of text.
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// List every finding per file, not just the summary.
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Suppress progress output on stderr.
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show per-section lengths for a single document.
    ///
    /// Prints one line per section with its heading, measured character
    /// span, and pass/fail against the chunk budget, plus the overage for
    /// failing sections. Corpus-level checks do not apply here.
    Sections {
        /// The document to analyze.
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = if cli.config.is_file() {
        config::load_config(&cli.config)?
    } else {
        Config::minimal()
    };

    match cli.command {
        Commands::Validate {
            root,
            json,
            out,
            verbose,
            quiet,
        } => {
            let progress = if quiet || json {
                ProgressMode::Off
            } else {
                ProgressMode::default_for_tty()
            };
            let opts = ValidateOptions {
                json,
                out,
                verbose,
                progress,
            };
            let report = run_validate(&cfg, &root, &opts)?;
            std::process::exit(report.exit_code());
        }
        Commands::Sections { file } => {
            analyze::run_sections(&file, &cfg)?;
        }
    }

    Ok(())
}
