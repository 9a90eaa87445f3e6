//! Data models for the repository flattener.
//!
//! This module contains the core data structures shared between the
//! aggregator and the report generator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Frequency count of file extensions among included files.
///
/// Keys are lower-cased extensions including the leading dot (or the
/// empty string for files without one) and are reported in the order
/// they were first encountered during traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionStats {
    /// Extensions in first-encountered order.
    order: Vec<String>,
    /// Count per extension.
    counts: HashMap<String, u64>,
}

impl ExtensionStats {
    /// Creates an empty statistics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more file with the given extension.
    pub fn record(&mut self, extension: &str) {
        match self.counts.get_mut(extension) {
            Some(count) => *count += 1,
            None => {
                self.order.push(extension.to_string());
                self.counts.insert(extension.to_string(), 1);
            }
        }
    }

    /// Returns the count for an extension (0 if never seen).
    #[allow(dead_code)] // Utility accessor, exercised in tests
    pub fn get(&self, extension: &str) -> u64 {
        self.counts.get(extension).copied().unwrap_or(0)
    }

    /// Iterates over `(extension, count)` pairs in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(|ext| (ext.as_str(), self.counts[ext]))
    }

    /// Total number of included files across all extensions.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct extensions observed.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no file has been recorded.
    #[allow(dead_code)] // Utility accessor, exercised in tests
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the statistics as serializable rows, preserving order.
    pub fn entries(&self) -> Vec<ExtensionCount> {
        self.iter()
            .map(|(ext, count)| ExtensionCount {
                extension: ext.to_string(),
                count,
            })
            .collect()
    }
}

/// A single row of the statistics artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionCount {
    /// Lower-cased extension including the leading dot; empty if none.
    pub extension: String,
    /// Number of included files with this extension.
    pub count: u64,
}

/// The finished output of a traversal.
///
/// Both fields are built up during the walk and are immutable once the
/// aggregator returns.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// The aggregate document: headings plus file contents.
    pub document: String,
    /// Extension frequency statistics over included files.
    pub stats: ExtensionStats,
}
