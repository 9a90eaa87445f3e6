//! Output artifact rendering and persistence.

pub mod generator;

pub use generator::{generate_stats_json, generate_stats_text, write_artifact};
