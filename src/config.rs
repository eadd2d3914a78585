use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::models::Severity;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub severity: SeverityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscoveryConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

/// Thresholds for the length-sensitive rules. Defaults mirror the chunk
/// budget of the downstream embedding pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_section_chars")]
    pub max_section_chars: usize,
    #[serde(default = "default_stub_lines")]
    pub stub_lines: usize,
    #[serde(default = "default_oversized_lines")]
    pub oversized_lines: usize,
    #[serde(default = "default_long_code_block_lines")]
    pub long_code_block_lines: usize,
}

fn default_max_section_chars() -> usize {
    1500
}
fn default_stub_lines() -> usize {
    80
}
fn default_oversized_lines() -> usize {
    600
}
fn default_long_code_block_lines() -> usize {
    10
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_section_chars: default_max_section_chars(),
            stub_lines: default_stub_lines(),
            oversized_lines: default_oversized_lines(),
            long_code_block_lines: default_long_code_block_lines(),
        }
    }
}

/// Severity overrides for the rules whose policy is site-specific.
#[derive(Debug, Deserialize, Clone)]
pub struct SeverityConfig {
    #[serde(default = "default_duplicate_basename")]
    pub duplicate_basename: String,
    #[serde(default = "default_filename_convention")]
    pub filename_convention: String,
}

fn default_duplicate_basename() -> String {
    "blocking".to_string()
}
fn default_filename_convention() -> String {
    "advisory".to_string()
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            duplicate_basename: default_duplicate_basename(),
            filename_convention: default_filename_convention(),
        }
    }
}

impl SeverityConfig {
    pub fn duplicate_basename(&self) -> Severity {
        parse_severity(&self.duplicate_basename).unwrap_or(Severity::Blocking)
    }

    pub fn filename_convention(&self) -> Severity {
        parse_severity(&self.filename_convention).unwrap_or(Severity::Advisory)
    }
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s {
        "blocking" => Some(Severity::Blocking),
        "advisory" => Some(Severity::Advisory),
        _ => None,
    }
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Config::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.limits.max_section_chars == 0 {
        anyhow::bail!("limits.max_section_chars must be > 0");
    }

    if config.limits.stub_lines >= config.limits.oversized_lines {
        anyhow::bail!("limits.stub_lines must be less than limits.oversized_lines");
    }

    if config.discovery.include_globs.is_empty() {
        anyhow::bail!("discovery.include_globs must not be empty");
    }

    for (key, value) in [
        ("severity.duplicate_basename", &config.severity.duplicate_basename),
        ("severity.filename_convention", &config.severity.filename_convention),
    ] {
        if parse_severity(value).is_none() {
            anyhow::bail!("{} must be 'blocking' or 'advisory', got '{}'", key, value);
        }
    }

    Ok(config)
}
