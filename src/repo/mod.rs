//! Repository acquisition.

pub mod cloner;

pub use cloner::{clone_repository, repo_name_from_url, CloneOptions};
