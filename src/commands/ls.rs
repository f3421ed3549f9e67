//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the libraries of a
//! repository checkout together with the flattened dependencies their
//! single-file builds include.
//!
//! Libraries come from the dependency map and from the folders under
//! `Libraries/`. This command is read-only.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use sane_amalgamate::config::Dependencies;
use sane_amalgamate::output::{emoji, OutputConfig};
use sane_amalgamate::path::glob_match;
use sane_amalgamate::repository::LocalRepository;
use sane_amalgamate::suggestions;

use super::{known_libraries, load_dependencies};

/// List libraries and their dependencies
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Root of the repository checkout.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub repo_root: PathBuf,

    /// Path to Dependencies.json.
    #[arg(long, value_name = "FILE", env = "SANE_AMALGAMATE_DEPENDENCIES")]
    pub dependencies: Option<PathBuf>,

    /// Filter libraries by glob pattern (e.g., "File*").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Print names only.
    #[arg(long)]
    pub names_only: bool,

    /// Show only the total count of libraries.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let repo = LocalRepository::new(&args.repo_root);
    let dependencies = load_dependencies(&args.repo_root, args.dependencies.as_deref())?;
    let mut libraries = known_libraries(&repo, "HEAD", &dependencies)?;

    if let Some(pattern) = &args.pattern {
        let mut filtered = Vec::new();
        for name in libraries {
            if glob_match(pattern, &name).map_err(|e| suggestions::invalid_glob(pattern, &e))? {
                filtered.push(name);
            }
        }
        libraries = filtered;
    }

    if args.count {
        println!("{}", libraries.len());
        return Ok(());
    }

    if libraries.is_empty() {
        println!("No libraries found.");
        return Ok(());
    }

    for name in &libraries {
        if args.names_only {
            println!("{}", name);
        } else {
            println!(
                "{} {}: {}",
                emoji(output, "📦", "-"),
                output.library(name),
                describe_dependencies(&dependencies, name)
            );
        }
    }

    if !args.names_only {
        println!();
        println!("{} librar{}", libraries.len(), if libraries.len() == 1 { "y" } else { "ies" });
    }

    Ok(())
}

/// Comma-separated flattened dependencies, or `None`
fn describe_dependencies(dependencies: &Dependencies, library: &str) -> String {
    let all = dependencies.all_dependencies(library);
    if all.is_empty() {
        "None".to_string()
    } else {
        all.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_dependencies() {
        let mut deps = Dependencies::new();
        deps.insert("Time", ["Foundation"]);
        deps.insert("Strings", ["Foundation", "Memory"]);

        assert_eq!(describe_dependencies(&deps, "Time"), "Foundation");
        assert_eq!(describe_dependencies(&deps, "Strings"), "Foundation, Memory");
        assert_eq!(describe_dependencies(&deps, "Foundation"), "None");
    }
}
