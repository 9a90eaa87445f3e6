//! Git repository cloning functionality.
//!
//! This module handles cloning repositories to a local directory using
//! the git2 library. The clone is an external capability as far as the
//! aggregator is concerned: populate a directory with the repository's
//! working tree, or fail.

use anyhow::{Context, Result};
use git2::{FetchOptions, Progress, RemoteCallbacks, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for cloning a repository.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Branch to checkout (None for default branch).
    pub branch: Option<String>,
    /// Depth for shallow clone (None for full clone).
    pub depth: Option<i32>,
    /// Whether to show progress.
    pub show_progress: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            branch: None,
            depth: None,
            show_progress: true,
        }
    }
}

/// Clone a repository from a URL into `dest`.
///
/// Fails when `dest` already exists; network, authentication, and
/// not-found conditions surface as the underlying git error.
pub fn clone_repository(url: &str, dest: &Path, options: CloneOptions) -> Result<Repository> {
    info!("Cloning repository: {}", url);

    if dest.exists() {
        anyhow::bail!("Destination already exists: {}", dest.display());
    }

    debug!("Clone target: {}", dest.display());

    // Set up progress callback
    let progress_bar = if options.show_progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(Arc::new(pb))
    } else {
        None
    };

    let pb_clone = progress_bar.clone();
    let mut callbacks = RemoteCallbacks::new();

    callbacks.transfer_progress(move |progress: Progress<'_>| {
        if let Some(ref pb) = pb_clone {
            pb.set_length(progress.total_objects() as u64);
            pb.set_position(progress.received_objects() as u64);
        }
        true
    });

    // Set up fetch options
    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(callbacks);

    if let Some(depth) = options.depth {
        fetch_opts.depth(depth);
    }

    // Build the repository
    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_opts);

    if let Some(ref branch) = options.branch {
        builder.branch(branch);
    }

    // Perform the clone
    let repo = builder
        .clone(url, dest)
        .with_context(|| format!("Failed to clone repository: {}", url))?;

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Clone complete");
    }

    info!("Successfully cloned repository to: {}", dest.display());

    Ok(repo)
}

/// Derive a local directory name from a repository URL.
///
/// Takes the last path segment and strips a trailing `.git`, handling
/// both `https://host/owner/name(.git)` and `git@host:owner/name(.git)`
/// forms. Falls back to `"repository"` when nothing parseable remains.
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/').trim_end_matches(".git");

    let name = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or("")
        .trim();

    if name.is_empty() {
        "repository".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_name_https() {
        assert_eq!(repo_name_from_url("https://github.com/rust-lang/rust"), "rust");
    }

    #[test]
    fn test_repo_name_https_with_git() {
        assert_eq!(
            repo_name_from_url("https://github.com/rust-lang/rust.git"),
            "rust"
        );
    }

    #[test]
    fn test_repo_name_ssh() {
        assert_eq!(repo_name_from_url("git@github.com:owner/tool.git"), "tool");
    }

    #[test]
    fn test_repo_name_trailing_slash() {
        assert_eq!(repo_name_from_url("https://github.com/owner/tool/"), "tool");
    }

    #[test]
    fn test_repo_name_fallback() {
        assert_eq!(repo_name_from_url(""), "repository");
        assert_eq!(repo_name_from_url("///"), "repository");
    }

    #[test]
    fn test_clone_options_default() {
        let opts = CloneOptions::default();
        assert!(opts.branch.is_none());
        assert!(opts.depth.is_none());
        assert!(opts.show_progress);
    }

    #[test]
    fn test_clone_into_existing_dir_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = clone_repository(
            "https://example.invalid/repo.git",
            tmp.path(),
            CloneOptions::default(),
        );
        assert!(result.is_err());
    }
}
