//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.repoflat.toml` files.

use crate::aggregator::DEFAULT_EXCLUDED_EXTENSIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Aggregator settings.
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Tree aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// File extensions to skip (lower-cased, with leading dot).
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,

    /// Sort directory entries lexicographically.
    #[serde(default)]
    pub sort_entries: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: default_excluded_extensions(),
            sort_entries: false,
        }
    }
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Document output path; None derives `<repo-name>.txt` from the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Statistics output path.
    #[serde(default = "default_stats_path")]
    pub stats: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            document: None,
            stats: default_stats_path(),
        }
    }
}

fn default_stats_path() -> String {
    "format.txt".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".repoflat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Sorting - a flag only enables, never disables
        if args.sort {
            self.aggregator.sort_entries = true;
        }

        // Extra exclusions extend the configured set
        if let Some(ref extra) = args.exclude_ext {
            for ext in extra {
                let normalized = normalize_extension(ext);
                if !self.aggregator.excluded_extensions.contains(&normalized) {
                    self.aggregator.excluded_extensions.push(normalized);
                }
            }
        }

        // Output paths - only override if provided
        if let Some(ref output) = args.output {
            self.output.document = Some(output.to_string_lossy().to_string());
        }
        if args.stats_output != Path::new("format.txt") {
            self.output.stats = args.stats_output.to_string_lossy().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

/// Normalize a user-supplied extension: lower-cased, with leading dot.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
