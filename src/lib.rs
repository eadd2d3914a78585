//! # raglint
//!
//! A batch conformance validator for RAG documentation corpora.
//!
//! Each document in the corpus is a YAML frontmatter block followed by a
//! heading-organized markdown body. raglint checks retrieval-chunk hygiene
//! against a fixed rule set: bounded section size, heading-hierarchy
//! integrity, code-example context, metadata completeness, and
//! naming/duplication constraints. It never edits documents; it emulates
//! the downstream chunk splitter's boundary logic just closely enough to
//! predict chunk sizes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────────────────────────┐   ┌──────────┐
//! │ Discover │──▶│ Phase 1 (per document)         │──▶│ Reporter │
//! │ walk+glob│   │ load → metadata → sections →   │   │ text/JSON│
//! └──────────┘   │ structural rules               │   └────▲─────┘
//!                └───────────────┬────────────────┘        │
//!                                ▼                         │
//!                ┌────────────────────────────────┐        │
//!                │ Phase 2 (whole corpus)         │────────┘
//!                │ duplicates, naming, size class │
//!                └────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! raglint validate docs/                 # exit 1 on any blocking finding
//! raglint validate docs/ --json          # structured report on stdout
//! raglint sections docs/deploy-steps.md  # per-section length drill-down
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration (thresholds, globs, severity policy) |
//! | [`models`] | Core data types: documents, findings, severities |
//! | [`discover`] | Recursive corpus file discovery |
//! | [`loader`] | File → Document, frontmatter splitting |
//! | [`frontmatter`] | Metadata schema validation |
//! | [`section`] | Heading-bounded section model |
//! | [`rules`] | Structural rule registry |
//! | [`corpus`] | Corpus-level rules (second phase) |
//! | [`report`] | Report aggregation and rendering |
//! | [`validate`] | Two-phase batch pipeline |
//! | [`analyze`] | Single-document drill-down |

pub mod analyze;
pub mod config;
pub mod corpus;
pub mod discover;
pub mod frontmatter;
pub mod loader;
pub mod models;
pub mod progress;
pub mod report;
pub mod rules;
pub mod section;
pub mod validate;
