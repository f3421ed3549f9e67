//! # Order Command Implementation
//!
//! This module implements the `order` subcommand, which prints the header and
//! implementation order a build of one library would use, where that order
//! came from, and which repository file each entry resolves to.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sane_amalgamate::amalgamation::order::load_order;
use sane_amalgamate::amalgamation::{Inliner, LineMatchers, OrderSource, SourceTree};
use sane_amalgamate::config::{BuildConfig, DEFAULT_ORDER_DIR};
use sane_amalgamate::output::{emoji, OutputConfig};
use sane_amalgamate::repository::LocalRepository;
use sane_amalgamate::suggestions;

use super::{known_libraries, load_dependencies};

/// Show the inlining order of a library
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Library name.
    #[arg(value_name = "LIBRARY")]
    pub library: String,

    /// Root of the repository checkout.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo_root: PathBuf,

    /// Repository directory holding SaneCpp<Library>.json order descriptors.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ORDER_DIR)]
    pub order_dir: String,
}

/// Execute the `order` command.
pub fn execute(args: OrderArgs, output: &OutputConfig) -> Result<()> {
    let repo = LocalRepository::new(&args.repo_root).with_order_dir(&args.order_dir);
    let config = BuildConfig::default().with_order_dir(&args.order_dir);

    let dependencies = load_dependencies(&args.repo_root, None)?;
    let known = known_libraries(&repo, &config.r#ref, &dependencies)?;
    if !known.contains(&args.library) {
        return Err(suggestions::unknown_library(&args.library, &known));
    }

    let tree = SourceTree::load(&repo, &config.r#ref).context("Failed to list repository tree")?;
    let order = load_order(&repo, &config, &args.library, &tree);

    let source = match order.source {
        OrderSource::Descriptor => format!("from {}", config.order_path(&args.library)),
        OrderSource::Derived => "derived from the tree".to_string(),
    };
    println!(
        "{} Order for {} ({})",
        emoji(output, "📋", "[ORDER]"),
        output.library(&args.library),
        source
    );

    let matchers = LineMatchers::new()?;
    let inliner = Inliner::new(
        &repo,
        &config.r#ref,
        &args.library,
        &tree,
        &matchers,
        config.line_ending.as_str(),
    );

    for (title, entries) in [
        ("Headers", &order.header_order),
        ("Implementation", &order.implementation_order),
    ] {
        println!("{}:", title);
        if entries.is_empty() {
            println!("  (none)");
        }
        for entry in entries {
            match inliner.resolve_entry(entry) {
                Some(path) => println!("  {} -> {}", entry, path),
                None => println!("  {} (unresolved)", entry),
            }
        }
    }

    Ok(())
}
