//! Statistics artifact generation.
//!
//! This module renders the extension statistics into the text format
//! (fixed header plus one line per extension) or JSON, and persists the
//! finished artifacts.

use crate::models::{ExtensionCount, ExtensionStats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Fixed header line of the text statistics artifact.
pub const STATS_HEADER: &str = "File format statistics:";

/// JSON shape of the statistics artifact.
#[derive(Debug, Serialize)]
struct StatsReport {
    total_files: u64,
    extensions: Vec<ExtensionCount>,
}

/// Render the statistics as plain text: the fixed header, then one
/// `<extension>: <count>` line per extension in first-encountered order.
pub fn generate_stats_text(stats: &ExtensionStats) -> String {
    let mut output = String::new();

    output.push_str(STATS_HEADER);
    output.push('\n');

    for (extension, count) in stats.iter() {
        output.push_str(&format!("{}: {}\n", extension, count));
    }

    output
}

/// Render the statistics as pretty-printed JSON, preserving order.
pub fn generate_stats_json(stats: &ExtensionStats) -> Result<String> {
    let report = StatsReport {
        total_files: stats.total(),
        extensions: stats.entries(),
    };

    serde_json::to_string_pretty(&report).map_err(Into::into)
}

/// Write a finished artifact to disk.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> ExtensionStats {
        let mut stats = ExtensionStats::new();
        stats.record(".txt");
        stats.record(".md");
        stats.record(".txt");
        stats.record("");
        stats
    }

    #[test]
    fn test_stats_text_format() {
        let text = generate_stats_text(&sample_stats());
        assert_eq!(text, "File format statistics:\n.txt: 2\n.md: 1\n: 1\n");
    }

    #[test]
    fn test_stats_text_empty() {
        let text = generate_stats_text(&ExtensionStats::new());
        assert_eq!(text, "File format statistics:\n");
    }

    #[test]
    fn test_stats_json() {
        let json = generate_stats_json(&sample_stats()).unwrap();
        assert!(json.contains("\"total_files\": 4"));
        assert!(json.contains("\".txt\""));
        assert!(json.contains("\"count\": 2"));

        // Order must survive serialization.
        let txt_pos = json.find(".txt").unwrap();
        let md_pos = json.find(".md").unwrap();
        assert!(txt_pos < md_pos);
    }

    #[test]
    fn test_write_artifact() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("format.txt");

        write_artifact(&path, "File format statistics:\n.rs: 3\n").unwrap();
        let read_back = std::fs::read_to_string(&path).unwrap();
        assert!(read_back.contains(".rs: 3"));
    }

    #[test]
    fn test_write_artifact_bad_path() {
        let result = write_artifact(Path::new("/nonexistent-dir/out.txt"), "x");
        assert!(result.is_err());
    }
}
