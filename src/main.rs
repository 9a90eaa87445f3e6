//! Repoflat - repository flattener
//!
//! A CLI tool that clones a git repository, concatenates every
//! non-binary file into a single text document with depth-coded
//! headings, and writes per-extension file counts alongside it.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing argument, clone failure, read failure, etc.)

mod aggregator;
mod cli;
mod config;
mod models;
mod repo;
mod report;

use aggregator::{AggregateOptions, TreeAggregator};
use anyhow::{Context, Result};
use cli::{Args, StatsFormat};
use config::Config;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("Repoflat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_flatten(args) {
        error!("Flatten failed: {}", e);
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .repoflat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".repoflat.toml");

    if path.exists() {
        anyhow::bail!(".repoflat.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .repoflat.toml")?;

    println!("Created .repoflat.toml with default settings.");
    println!("Edit it to customize excluded extensions, sorting, and output paths.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete flatten workflow.
fn run_flatten(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Get the repository tree
    let (repo_root, repo_name) = get_repository(&args)?;
    info!("Repository at: {}", repo_root.display());

    // Step 2: Walk the tree
    if !args.quiet {
        println!("Flattening {}...", repo_root.display());
    }

    let options = AggregateOptions {
        excluded_extensions: config.aggregator.excluded_extensions.clone(),
        sort_entries: config.aggregator.sort_entries,
    };

    let result = TreeAggregator::new(repo_root, options).traverse()?;

    // Step 3: Render the statistics artifact
    let stats_content = match args.format {
        StatsFormat::Text => report::generate_stats_text(&result.stats),
        StatsFormat::Json => report::generate_stats_json(&result.stats)?,
    };

    // Step 4: Persist both artifacts (only after a fully successful walk)
    let document_path = config
        .output
        .document
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.txt", repo_name)));
    let stats_path = PathBuf::from(&config.output.stats);

    report::write_artifact(&document_path, &result.document)?;
    if !args.quiet {
        println!("Document written to {}", document_path.display());
    }

    report::write_artifact(&stats_path, &stats_content)?;
    if !args.quiet {
        println!("Statistics written to {}", stats_path.display());
    }

    // Print summary
    let duration = start_time.elapsed().as_secs_f64();
    if !args.quiet {
        println!("\nSummary:");
        println!("   Files included: {}", result.stats.total());
        println!("   Distinct extensions: {}", result.stats.len());
        println!("   Duration: {:.1}s", duration);
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .repoflat.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Get the repository tree (clone if needed) and its name.
fn get_repository(args: &Args) -> Result<(PathBuf, String)> {
    // Use local directory if specified
    if let Some(ref local) = args.local {
        info!("Using local directory: {}", local.display());
        let name = local
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "repository".to_string());
        return Ok((local.clone(), name));
    }

    // Clone the repository
    let repo_url = args.repo_url();
    let repo_name = repo::repo_name_from_url(repo_url);
    let dest = PathBuf::from(format!("./{}", repo_name));

    if !args.quiet {
        println!("Cloning repository: {}", repo_url);
    }

    let clone_options = repo::CloneOptions {
        branch: args.branch.clone(),
        depth: args.depth,
        show_progress: !args.quiet,
    };

    repo::clone_repository(repo_url, &dest, clone_options)?;
    Ok((dest, repo_name))
}
