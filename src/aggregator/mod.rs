//! Directory tree aggregation.
//!
//! This module implements the core traversal: it walks a directory tree
//! depth-first, concatenates the contents of every included file into a
//! single document with depth-coded headings, and tallies how many files
//! of each extension it saw.

use crate::models::{AggregateResult, ExtensionStats};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Extensions that are skipped entirely (binary/image formats).
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".ico", ".bin",
];

/// Marker character used for heading lines; repeated once per depth level.
const HEADING_MARKER: char = '#';

/// Directory name skipped at every depth: git metadata is binary and has
/// no place in a text snapshot.
const VCS_DIR: &str = ".git";

/// Configuration for the tree aggregator.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Extensions to skip, lower-cased, with leading dot.
    pub excluded_extensions: Vec<String>,
    /// Sort directory entries lexicographically instead of relying on
    /// the platform listing order.
    pub sort_entries: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sort_entries: false,
        }
    }
}

/// Recursive tree walker producing an aggregate document plus statistics.
pub struct TreeAggregator {
    root: PathBuf,
    options: AggregateOptions,
}

impl TreeAggregator {
    /// Creates a new aggregator rooted at `root`.
    ///
    /// The caller guarantees that `root` is an existing, readable
    /// directory; a violated precondition surfaces as a filesystem error
    /// from [`TreeAggregator::traverse`].
    pub fn new(root: PathBuf, options: AggregateOptions) -> Self {
        Self { root, options }
    }

    /// Walks the whole tree and returns the finished document and stats.
    ///
    /// Any unreadable or non-UTF-8 file aborts the traversal; nothing
    /// partial is returned.
    pub fn traverse(&self) -> Result<AggregateResult> {
        let mut document = String::new();
        let mut stats = ExtensionStats::new();

        self.walk_dir(&self.root, 1, Path::new(""), &mut document, &mut stats)?;

        debug!(
            "Traversal complete: {} files across {} extensions",
            stats.total(),
            stats.len()
        );

        Ok(AggregateResult { document, stats })
    }

    /// Processes one directory level, depth-first and pre-order.
    fn walk_dir(
        &self,
        dir: &Path,
        depth: usize,
        prefix: &Path,
        document: &mut String,
        stats: &mut ExtensionStats,
    ) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

        let mut entries: Vec<fs::DirEntry> = entries
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read directory entry in: {}", dir.display()))?;

        if self.options.sort_entries {
            entries.sort_by_key(|e| e.file_name());
        }

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let rel_path = prefix.join(&name);

            if path.is_dir() {
                if name == VCS_DIR {
                    trace!("Skipping VCS metadata: {}", rel_path.display());
                    continue;
                }

                document.push_str(&heading(depth, &name));
                self.walk_dir(&path, depth + 1, &rel_path, document, stats)?;
            } else if path.is_file() {
                let ext = file_extension(&name);

                if self.is_excluded(&ext) {
                    trace!("Excluded file: {}", rel_path.display());
                    continue;
                }

                stats.record(&ext);

                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;

                document.push_str(&heading(depth, &rel_path.to_string_lossy()));
                document.push_str(&contents);
                document.push_str("\n\n");
            }
        }

        Ok(())
    }

    /// Checks an extension against the excluded set.
    fn is_excluded(&self, extension: &str) -> bool {
        self.options
            .excluded_extensions
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(extension))
    }
}

/// Formats a heading line: the marker repeated `depth` times, a space,
/// then the label.
fn heading(depth: usize, label: &str) -> String {
    let mut line = String::with_capacity(depth + label.len() + 2);
    for _ in 0..depth {
        line.push(HEADING_MARKER);
    }
    line.push(' ');
    line.push_str(label);
    line.push('\n');
    line
}

/// Extracts a file's extension: the lower-cased substring from and
/// including the last `.`, or the empty string when there is none.
///
/// A leading dot alone does not count, so dotfiles such as `.gitignore`
/// have no extension.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}
