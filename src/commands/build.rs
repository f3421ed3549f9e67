//! # Build Command Implementation
//!
//! This module implements the `build` subcommand, which amalgamates one or
//! more libraries of a repository checkout into single-file headers.
//!
//! ## Functionality
//!
//! - **Library Selection**: `--all`, or one or more `--library` glob patterns
//!   matched against the known library names
//! - **Parallel Builds**: Libraries are built concurrently, bounded by `--jobs`
//! - **Smoke Tests**: `--tests-out` also writes one test translation unit per
//!   library
//!
//! Unknown library names fail before anything is written.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sane_amalgamate::amalgamation::{build_libraries, Artifact};
use sane_amalgamate::config::{BuildConfig, LineEnding, DEFAULT_ORDER_DIR};
use sane_amalgamate::output::{emoji, OutputConfig};
use sane_amalgamate::path::glob_match;
use sane_amalgamate::repository::LocalRepository;
use sane_amalgamate::suggestions;
use sane_amalgamate::write::{write_artifacts, write_smoke_tests};

use super::{known_libraries, load_dependencies};

/// Default output directory, relative to the repository root
pub const DEFAULT_OUTPUT_DIR: &str = "_Build/_SingleFileLibraries";

/// Build single-file libraries
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Root of the repository checkout.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo_root: PathBuf,

    /// Ref recorded in the build (branch, tag or commit).
    #[arg(long = "ref", value_name = "REF", default_value = "HEAD")]
    pub git_ref: String,

    /// Build every known library.
    #[arg(long, conflicts_with = "library")]
    pub all: bool,

    /// Library name or glob pattern to build (repeatable).
    #[arg(short, long, value_name = "PATTERN")]
    pub library: Vec<String>,

    /// Output directory for the artifacts. Relative paths are resolved
    /// against the repository root.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub out: PathBuf,

    /// Also write smoke-test sources into this directory.
    #[arg(long, value_name = "DIR")]
    pub tests_out: Option<PathBuf>,

    /// Path to Dependencies.json.
    #[arg(long, value_name = "FILE", env = "SANE_AMALGAMATE_DEPENDENCIES")]
    pub dependencies: Option<PathBuf>,

    /// Repository directory holding SaneCpp<Library>.json order descriptors.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ORDER_DIR)]
    pub order_dir: String,

    /// Line ending of the generated files (lf, crlf, native).
    #[arg(long, value_name = "EOL", default_value = "native")]
    pub line_endings: LineEnding,

    /// Maximum number of libraries built in parallel.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Only report errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs, output: &OutputConfig) -> Result<()> {
    let repo = LocalRepository::new(&args.repo_root).with_order_dir(&args.order_dir);
    let dependencies = load_dependencies(&args.repo_root, args.dependencies.as_deref())?;
    let known = known_libraries(&repo, &args.git_ref, &dependencies)?;

    let selected = select_libraries(&args, &known)?;

    let config = BuildConfig::default()
        .with_ref(&args.git_ref)
        .with_dependencies(dependencies)
        .with_order_dir(&args.order_dir)
        .with_line_ending(args.line_endings);

    if !args.quiet {
        println!(
            "{} Building {} librar{} from {}",
            emoji(output, "🔨", "[BUILD]"),
            selected.len(),
            if selected.len() == 1 { "y" } else { "ies" },
            args.repo_root.display()
        );
    }

    let artifacts = build_libraries(&selected, &repo, &config, args.jobs)
        .context("Failed to build single-file libraries")?;

    let out_dir = resolve(&args.repo_root, &args.out);
    let written = write_artifacts(&artifacts, &out_dir)?;

    if let Some(tests_out) = &args.tests_out {
        write_smoke_tests(&artifacts, &resolve(&args.repo_root, tests_out))?;
    }

    if !args.quiet {
        for (artifact, path) in artifacts.iter().zip(&written) {
            println!(
                "{} {} -> {}",
                output.success_marker(),
                output.library(&artifact.library),
                path.display()
            );
        }
        print_summary(&artifacts);
    }

    Ok(())
}

/// Resolves `--library` patterns (or `--all`) against the known names.
///
/// Selection keeps pattern order; a library matched by several patterns is
/// built once.
fn select_libraries(args: &BuildArgs, known: &[String]) -> Result<Vec<String>> {
    if args.all {
        return Ok(known.to_vec());
    }
    if args.library.is_empty() {
        return Err(suggestions::no_libraries_selected());
    }

    let mut selected: Vec<String> = Vec::new();
    for pattern in &args.library {
        let mut matched = false;
        for name in known {
            let is_match =
                glob_match(pattern, name).map_err(|e| suggestions::invalid_glob(pattern, &e))?;
            if is_match {
                matched = true;
                if !selected.contains(name) {
                    selected.push(name.clone());
                }
            }
        }
        if !matched {
            return Err(suggestions::unknown_library(pattern, known));
        }
    }
    Ok(selected)
}

fn resolve(root: &std::path::Path, path: &std::path::Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn print_summary(artifacts: &[Artifact]) {
    let header_code: usize = artifacts.iter().map(|a| a.header_counts.code).sum();
    let implementation_code: usize = artifacts.iter().map(|a| a.implementation_counts.code).sum();
    println!();
    println!(
        "{} librar{}, {} header + {} implementation lines of code",
        artifacts.len(),
        if artifacts.len() == 1 { "y" } else { "ies" },
        header_code,
        implementation_code
    );
}
