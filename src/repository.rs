//! # Repository Context
//!
//! This module defines `RepositoryContext`, the only interface the
//! amalgamation core uses to reach repository data, and `LocalRepository`,
//! the implementation backed by a checkout on disk.
//!
//! ## Design
//!
//! The core never touches the host filesystem or the network directly.
//! Everything it needs (the tree listing, file contents and a version
//! string) comes through the trait, so backends can be swapped out:
//!
//! - **`LocalRepository`**: walks `Libraries/`, `LibrariesExtra/` and the
//!   order-descriptor directory of a checkout and asks `git` for the version.
//! - **`MemoryRepository`** (in `filesystem`): holds files in memory; used by
//!   tests, benchmarks and embedders.
//!
//! A remote backend (hosted repository API, authentication, rate limits,
//! caching) would implement the same trait; retries and caching are its
//! business, not the core's.

use crate::config::DEFAULT_ORDER_DIR;
use crate::error::{Error, Result};
use crate::path::LIBRARY_ROOTS;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry of a repository tree listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Repository-relative, `/`-separated path.
    pub path: String,
    /// `true` for files, `false` for directories.
    pub is_file: bool,
}

impl TreeEntry {
    /// A file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_file: true,
        }
    }

    /// A directory entry
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_file: false,
        }
    }
}

/// Source of repository data for a build.
///
/// Implementations must be shareable across threads so that different
/// libraries can be built concurrently against the same context.
pub trait RepositoryContext: Send + Sync {
    /// Lists the repository tree at `r#ref`. Directories are optional.
    fn list_tree(&self, r#ref: &str) -> Result<Vec<TreeEntry>>;

    /// Reads a repository file as text. Fails with `Error::NotFound` when the
    /// path does not exist.
    fn read_file(&self, r#ref: &str, path: &str) -> Result<String>;

    /// Opaque version descriptor, conventionally `<tag-or-ref> (<short-hash>)`.
    fn version_string(&self, r#ref: &str) -> Result<String>;
}

/// Repository Context backed by a checkout on the local filesystem.
///
/// The ref is informational only: the working tree is read as it is.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
    order_dir: String,
}

impl LocalRepository {
    /// Creates a context rooted at `root`, using the default order directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            order_dir: DEFAULT_ORDER_DIR.to_string(),
        }
    }

    /// Also list files under `order_dir` (repository-relative).
    pub fn with_order_dir(mut self, order_dir: &str) -> Self {
        self.order_dir = order_dir.trim_end_matches('/').to_string();
        self
    }

    /// Repository root on disk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks `dir` recursively, returning repo-relative file paths sorted by
    /// file name within each directory.
    ///
    /// Only a failure to open `dir` itself is an error; entries below it that
    /// cannot be read are skipped.
    fn list_files_under(&self, dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            let components: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(components.join("/"));
        }
        Ok(files)
    }
}

impl RepositoryContext for LocalRepository {
    fn list_tree(&self, _ref: &str) -> Result<Vec<TreeEntry>> {
        let mut scan_roots: Vec<&str> = LIBRARY_ROOTS.to_vec();
        scan_roots.push(&self.order_dir);

        let mut entries = Vec::new();
        for scan_root in scan_roots {
            let dir = self.root.join(scan_root);
            if !dir.is_dir() {
                debug!("Skipping missing directory {}", dir.display());
                continue;
            }
            entries.extend(self.list_files_under(&dir)?.into_iter().map(TreeEntry::file));
        }
        Ok(entries)
    }

    fn read_file(&self, _ref: &str, path: &str) -> Result<String> {
        let full_path = self.root.join(path);
        match std::fs::read(&full_path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn version_string(&self, _ref: &str) -> Result<String> {
        Ok(crate::git::describe_version(&self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[test]
    fn test_list_tree_scans_library_roots_and_order_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Libraries/Foo/Foo.h", "");
        write(temp.path(), "Libraries/Foo/Internal/FooInternal.h", "");
        write(temp.path(), "LibrariesExtra/Bar/Bar.h", "");
        write(temp.path(), "Support/SingleFileLibs/SaneCppFoo.json", "{}");
        write(temp.path(), "Tests/FooTest.cpp", "");

        let repo = LocalRepository::new(temp.path());
        let paths: Vec<String> = repo
            .list_tree("HEAD")
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();

        assert_eq!(
            paths,
            vec![
                "Libraries/Foo/Foo.h",
                "Libraries/Foo/Internal/FooInternal.h",
                "LibrariesExtra/Bar/Bar.h",
                "Support/SingleFileLibs/SaneCppFoo.json",
            ]
        );
    }

    #[test]
    fn test_list_tree_is_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Libraries/Foo/b.h", "");
        write(temp.path(), "Libraries/Foo/a.h", "");
        write(temp.path(), "Libraries/Foo/c.cpp", "");

        let repo = LocalRepository::new(temp.path());
        let paths: Vec<String> = repo
            .list_tree("HEAD")
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(
            paths,
            vec!["Libraries/Foo/a.h", "Libraries/Foo/b.h", "Libraries/Foo/c.cpp"]
        );
    }

    #[test]
    fn test_list_tree_custom_order_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Order/SaneCppFoo.json", "{}");

        let repo = LocalRepository::new(temp.path()).with_order_dir("Order/");
        let entries = repo.list_tree("HEAD").unwrap();
        assert_eq!(entries, vec![TreeEntry::file("Order/SaneCppFoo.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_tree_skips_unreadable_directories() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write(temp.path(), "Libraries/Foo/Foo.h", "");
        write(temp.path(), "Libraries/Locked/Locked.h", "");
        let locked = temp.path().join("Libraries/Locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = LocalRepository::new(temp.path()).list_tree("HEAD");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let paths: Vec<String> = result.unwrap().into_iter().map(|e| e.path).collect();
        assert!(paths.contains(&"Libraries/Foo/Foo.h".to_string()));
    }

    #[test]
    fn test_read_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Libraries/Foo/Foo.h", "int foo;\n");

        let repo = LocalRepository::new(temp.path());
        assert_eq!(
            repo.read_file("HEAD", "Libraries/Foo/Foo.h").unwrap(),
            "int foo;\n"
        );
    }

    #[test]
    fn test_read_file_not_found() {
        let temp = TempDir::new().unwrap();
        let repo = LocalRepository::new(temp.path());
        let err = repo.read_file("HEAD", "Libraries/Foo/Nope.h").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref path } if path == "Libraries/Foo/Nope.h"));
    }

    #[test]
    fn test_version_string_outside_git_is_unknown() {
        let temp = TempDir::new().unwrap();
        let repo = LocalRepository::new(temp.path());
        assert_eq!(repo.version_string("HEAD").unwrap(), "unknown");
    }
}
