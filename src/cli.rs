//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Repoflat - flatten a git repository into a single text document
///
/// Clones a repository, concatenates every non-binary file into one
/// document with depth-coded headings, and writes a per-extension
/// file count alongside it.
///
/// Examples:
///   repoflat https://github.com/owner/repo.git
///   repoflat https://github.com/owner/repo.git --output repo.txt --sort
///   repoflat --local ./my-project
///   repoflat https://github.com/owner/repo.git --format json
///   repoflat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Repository URL to clone and flatten
    ///
    /// Supports HTTPS URLs (e.g., https://github.com/owner/repo.git)
    /// and SSH URLs (git@host:owner/repo.git). Not required when using
    /// --local or --init-config.
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Output file path for the aggregate document
    ///
    /// Defaults to ./<repo-name>.txt derived from the URL.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file path for the extension statistics
    #[arg(long, default_value = "format.txt", value_name = "FILE")]
    pub stats_output: PathBuf,

    /// Local directory to flatten instead of cloning
    #[arg(long, value_name = "DIR")]
    pub local: Option<PathBuf>,

    /// Specific branch to clone
    ///
    /// If not specified, uses the default branch
    #[arg(short, long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Depth for a shallow clone
    ///
    /// If not specified, performs a full clone
    #[arg(long, value_name = "N")]
    pub depth: Option<i32>,

    /// Sort directory entries lexicographically
    ///
    /// Without this flag, output follows the platform's directory
    /// listing order, which is not guaranteed to be stable.
    #[arg(long)]
    pub sort: bool,

    /// Additional file extensions to exclude (comma-separated)
    ///
    /// Example: --exclude-ext .pdf,.zip
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub exclude_ext: Option<Vec<String>>,

    /// Statistics output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: StatsFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .repoflat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .repoflat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the statistics artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatsFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the repo URL, empty if not set (should be validated first).
    pub fn repo_url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.url.is_none() && self.local.is_none() {
            return Err("A repository URL is required (or use --local <DIR>)".to_string());
        }

        // Validate repository URL format
        if let Some(ref url) = self.url {
            if !url.starts_with("https://") && !url.starts_with("git@") {
                return Err("Repository URL must start with 'https://' or 'git@'".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate depth if provided
        if let Some(depth) = self.depth {
            if depth < 1 {
                return Err("Clone depth must be at least 1".to_string());
            }
        }

        // Validate local directory if provided
        if let Some(ref local_path) = self.local {
            if !local_path.exists() {
                return Err(format!(
                    "Local directory does not exist: {}",
                    local_path.display()
                ));
            }
            if !local_path.is_dir() {
                return Err(format!(
                    "Local path is not a directory: {}",
                    local_path.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            url: Some("https://github.com/test/repo.git".to_string()),
            output: None,
            stats_output: PathBuf::from("format.txt"),
            local: None,
            branch: None,
            depth: None,
            sort: false,
            exclude_ext: None,
            format: StatsFormat::Text,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_passes() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_url() {
        let mut args = make_args();
        args.url = None;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.url = Some("invalid-url".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_bad_depth() {
        let mut args = make_args();
        args.depth = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_missing_url_ok_with_local() {
        let mut args = make_args();
        args.url = None;
        args.local = Some(PathBuf::from("."));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
