//! Single-file library builds.
//!
//! ## Overview
//!
//! Building one library goes through these steps, strictly in sequence:
//! 1. Tree listing - Fetch the repository paths from the Repository Context
//! 2. Order resolution - Pick header and implementation file orders
//! 3. Header inlining - Expand the header order depth-first
//! 4. Implementation inlining - Expand the implementation order, sharing the
//!    ProcessedSet and license metadata with step 3
//! 5. Statistics - Count code/comment lines of both inlined sections
//! 6. Assembly - Render banner, license block, dependency includes and guards
//!
//! All mutable state (`BuildState`) is created fresh for each library and
//! dropped once the artifact is rendered, so builds of different libraries
//! are independent and may run in parallel (see `build_libraries`).

use std::collections::{BTreeSet, HashSet};

use log::info;
use rayon::prelude::*;

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::git::UNKNOWN_VERSION;
use crate::path::{library_of, PRIMARY_LIBRARY_ROOT};
use crate::repository::RepositoryContext;

pub mod assembler;
pub mod inliner;
pub mod line_count;
pub mod metadata;
pub mod order;

pub use assembler::{artifact_name, header_guard, implementation_guard};
pub use inliner::{BuildState, Inliner, LineMatchers};
pub use line_count::{count_lines, LineCounts};
pub use metadata::{AuthorsInfo, LicenseMetadata, SpdxSet};
pub use order::{OrderSource, OrderSpec};

/// File paths of a repository tree listing, in listing order
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    paths: Vec<String>,
    index: HashSet<String>,
}

impl SourceTree {
    /// Lists the tree through `ctx`, keeping files only. Listing errors
    /// propagate unchanged.
    pub fn load(ctx: &dyn RepositoryContext, r#ref: &str) -> Result<Self> {
        let entries = ctx.list_tree(r#ref)?;
        Ok(Self::from_paths(
            entries.into_iter().filter(|e| e.is_file).map(|e| e.path),
        ))
    }

    /// Builds a tree from paths; repeated paths keep their first position.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut tree = Self::default();
        for path in paths {
            if tree.index.insert(path.clone()) {
                tree.paths.push(path);
            }
        }
        tree
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains(path)
    }

    /// Paths in listing order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A rendered single-file library
#[derive(Debug, Clone)]
pub struct Artifact {
    pub library: String,
    /// `SaneCpp<Library>.h`
    pub file_name: String,
    pub content: String,
    pub header_counts: LineCounts,
    pub implementation_counts: LineCounts,
    pub order: OrderSpec,
    /// Whether the artifact carries an implementation section
    pub has_implementation: bool,
}

/// Builds the single-file artifact for `library`.
///
/// Only failures raised by `ctx` while listing the tree or fetching the
/// version string propagate; unreadable files, unresolvable entries and a
/// malformed order descriptor are not errors.
pub fn build_library(
    library: &str,
    ctx: &dyn RepositoryContext,
    config: &BuildConfig,
) -> Result<Artifact> {
    let tree = SourceTree::load(ctx, &config.r#ref)?;
    let order = order::load_order(ctx, config, library, &tree);

    let matchers = LineMatchers::new()?;
    let eol = config.line_ending.as_str();
    let inliner = Inliner::new(ctx, &config.r#ref, library, &tree, &matchers, eol);

    let mut state = BuildState::new();
    let header_body = inliner.inline_ordered(&order.header_order, &mut state);
    let implementation_body = inliner.inline_ordered(&order.implementation_order, &mut state);

    let header_counts = count_lines(&header_body);
    let implementation_counts = count_lines(&implementation_body);
    let has_implementation = !implementation_body.trim().is_empty();

    let version = ctx.version_string(&config.r#ref)?;
    let version = if version.is_empty() {
        UNKNOWN_VERSION.to_string()
    } else {
        version
    };

    let content = assembler::assemble(&assembler::AssemblyInput {
        library,
        dependencies: config.dependencies.all_dependencies(library),
        version: &version,
        header_body: &header_body,
        implementation_body: &implementation_body,
        header_counts,
        implementation_counts,
        metadata: &state.metadata,
        eol,
    });

    info!(
        "Amalgamated {}: {} files inlined, header {}, implementation {}",
        library,
        state.processed.len(),
        header_counts,
        implementation_counts
    );

    Ok(Artifact {
        library: library.to_string(),
        file_name: artifact_name(library),
        content,
        header_counts,
        implementation_counts,
        order,
        has_implementation,
    })
}

/// Builds several libraries concurrently on at most `jobs` worker threads
/// (rayon's default when `None`).
///
/// Artifacts are returned in the order of `libraries`. If builds fail, the
/// error of the earliest failing library in that order is returned.
pub fn build_libraries(
    libraries: &[String],
    ctx: &dyn RepositoryContext,
    config: &BuildConfig,
    jobs: Option<usize>,
) -> Result<Vec<Artifact>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .map_err(|e| Error::ThreadPool {
            message: e.to_string(),
        })?;

    let results: Vec<Result<Artifact>> = pool.install(|| {
        libraries
            .par_iter()
            .map(|library| build_library(library, ctx, config))
            .collect()
    });
    results.into_iter().collect()
}

/// Library names with at least one file under the primary library root,
/// sorted by name
pub fn discover_libraries(tree: &SourceTree) -> Vec<String> {
    let prefix = format!("{}/", PRIMARY_LIBRARY_ROOT);
    let names: BTreeSet<&str> = tree
        .paths()
        .filter(|p| p.starts_with(&prefix) && p.matches('/').count() >= 2)
        .filter_map(library_of)
        .collect();
    names.into_iter().map(str::to_string).collect()
}
