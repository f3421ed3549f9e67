//! In-memory Repository Context

use crate::error::{Error, Result};
use crate::repository::{RepositoryContext, TreeEntry};

/// Represents a repository file held in memory
#[derive(Debug, Clone)]
pub struct File {
    /// Repository-relative, `/`-separated path
    pub path: String,
    /// File content as text
    pub content: String,
}

/// In-memory repository.
///
/// Files are listed in insertion order, so tests control tree-listing order
/// (and with it default derivation and filename resolution) exactly.
/// Re-adding an existing path replaces its content in place.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    files: Vec<File>,
    version: String,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            version: crate::git::UNKNOWN_VERSION.to_string(),
        }
    }
}

impl MemoryRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version string reported for every ref
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Builder form of `add_file`
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    /// Add or update a file
    pub fn add_file(&mut self, path: &str, content: &str) {
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(file) => file.content = content.to_string(),
            None => self.files.push(File {
                path: path.to_string(),
                content: content.to_string(),
            }),
        }
    }

    /// Remove a file, returning it if present
    pub fn remove_file(&mut self, path: &str) -> Option<File> {
        let index = self.files.iter().position(|f| f.path == path)?;
        Some(self.files.remove(index))
    }

    /// Get a file by path
    pub fn get_file(&self, path: &str) -> Option<&File> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Check if a file exists
    pub fn exists(&self, path: &str) -> bool {
        self.get_file(path).is_some()
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the repository is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files in listing order
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.iter()
    }
}

impl RepositoryContext for MemoryRepository {
    fn list_tree(&self, _ref: &str) -> Result<Vec<TreeEntry>> {
        Ok(self
            .files
            .iter()
            .map(|f| TreeEntry::file(f.path.clone()))
            .collect())
    }

    fn read_file(&self, _ref: &str, path: &str) -> Result<String> {
        self.get_file(path)
            .map(|f| f.content.clone())
            .ok_or_else(|| Error::NotFound {
                path: path.to_string(),
            })
    }

    fn version_string(&self, _ref: &str) -> Result<String> {
        Ok(self.version.clone())
    }
}
