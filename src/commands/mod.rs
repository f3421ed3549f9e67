//! # CLI Command Implementations
//!
//! Each subcommand of `sane-amalgamate` lives in its own file and provides:
//! - An `Args` struct with the command-specific options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `sane_amalgamate` library.
//!
//! The helpers below are shared by commands that read a repository checkout.

pub mod build;
pub mod ls;
pub mod order;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use sane_amalgamate::amalgamation::{discover_libraries, SourceTree};
use sane_amalgamate::config::{Dependencies, DEFAULT_DEPENDENCIES_PATH};
use sane_amalgamate::repository::RepositoryContext;
use sane_amalgamate::suggestions;

/// Loads the dependency map.
///
/// An explicit path must exist. Without one, the conventional location under
/// `repo_root` is used when present and an empty map otherwise.
pub fn load_dependencies(repo_root: &Path, explicit: Option<&Path>) -> Result<Dependencies> {
    let path: PathBuf = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(suggestions::dependencies_not_found(path));
            }
            path.to_path_buf()
        }
        None => {
            let path = repo_root.join(DEFAULT_DEPENDENCIES_PATH);
            if !path.exists() {
                debug!(
                    "No dependency map at {}, building without dependencies",
                    path.display()
                );
                return Ok(Dependencies::new());
            }
            path
        }
    };

    Dependencies::from_file(&path)
        .with_context(|| format!("Failed to load dependency map {}", path.display()))
}

/// Every library known from the dependency map or the tree, sorted by name
pub fn known_libraries(
    ctx: &dyn RepositoryContext,
    r#ref: &str,
    dependencies: &Dependencies,
) -> Result<Vec<String>> {
    let tree = SourceTree::load(ctx, r#ref)
        .with_context(|| format!("Failed to list repository tree at {}", r#ref))?;
    let mut names = discover_libraries(&tree);
    names.extend(dependencies.library_names().map(str::to_string));
    names.sort();
    names.dedup();
    Ok(names)
}
