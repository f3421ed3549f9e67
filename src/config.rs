//! # Build Configuration
//!
//! This module defines the settings a library build consumes next to its
//! Repository Context:
//!
//! - **`Dependencies`**: the dependency map, normally loaded from
//!   `Support/Dependencies/Dependencies.json`. Each library lists its
//!   direct, minimal and flattened (`all_dependencies`) dependencies; the
//!   amalgamated banner and include block use the flattened list.
//!
//! - **`LineEnding`**: the terminator applied uniformly to every emitted line.
//!
//! - **`BuildConfig`**: the ref to build, the dependency map, where order
//!   descriptors live, and the line ending.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default location of the dependency map, relative to the repository root.
pub const DEFAULT_DEPENDENCIES_PATH: &str = "Support/Dependencies/Dependencies.json";

/// Default directory holding per-library order descriptors.
pub const DEFAULT_ORDER_DIR: &str = "Support/SingleFileLibs";

/// Dependency entry for one library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDependencies {
    /// Libraries this one includes directly.
    #[serde(default)]
    pub direct_dependencies: Vec<String>,
    /// Smallest set of libraries whose closure covers the direct ones.
    #[serde(default)]
    pub minimal_dependencies: Vec<String>,
    /// Flattened, ordered transitive dependencies.
    #[serde(default)]
    pub all_dependencies: Vec<String>,
}

/// Dependency map keyed by library name
///
/// Libraries are kept in name order, which is also the order `--all`
/// builds them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dependencies {
    libraries: BTreeMap<String, LibraryDependencies>,
}

impl Dependencies {
    /// Create an empty dependency map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dependency map from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::Dependencies {
                message: "top-level value must be an object keyed by library name".to_string(),
                hint: Some(
                    "Expected e.g. {\"Foo\": {\"all_dependencies\": [\"Bar\"]}}".to_string(),
                ),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a dependency map from a file on disk
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Dependencies {
            message: format!("failed to read {}: {}", path.display(), e),
            hint: None,
        })?;
        Self::parse(&content)
    }

    /// Register a library with its flattened dependencies
    pub fn insert<I, S>(&mut self, library: &str, all_dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let all_dependencies: Vec<String> = all_dependencies.into_iter().map(Into::into).collect();
        self.libraries.insert(
            library.to_string(),
            LibraryDependencies {
                direct_dependencies: all_dependencies.clone(),
                minimal_dependencies: all_dependencies.clone(),
                all_dependencies,
            },
        );
    }

    /// Flattened dependencies of `library`; empty for unknown libraries
    pub fn all_dependencies(&self, library: &str) -> &[String] {
        self.libraries
            .get(library)
            .map(|deps| deps.all_dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Full entry for `library`
    pub fn get(&self, library: &str) -> Option<&LibraryDependencies> {
        self.libraries.get(library)
    }

    /// Whether `library` is present in the map
    pub fn contains(&self, library: &str) -> bool {
        self.libraries.contains_key(library)
    }

    /// Library names in name order
    pub fn library_names(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    /// Number of libraries in the map
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the map has no libraries
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Line terminator applied to every emitted line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    /// The terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// The host platform's conventional line ending
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::Crlf => write!(f, "crlf"),
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::Crlf),
            "native" => Ok(LineEnding::native()),
            other => Err(format!(
                "unknown line ending '{}' (expected lf, crlf or native)",
                other
            )),
        }
    }
}

/// Settings for one or more library builds
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Branch, tag or commit handed to the Repository Context.
    pub r#ref: String,
    /// Dependency map used for the banner and dependency includes.
    pub dependencies: Dependencies,
    /// Repository directory holding `SaneCpp<Library>.json` order descriptors.
    pub order_dir: String,
    /// Terminator for every emitted line.
    pub line_ending: LineEnding,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            r#ref: "HEAD".to_string(),
            dependencies: Dependencies::new(),
            order_dir: DEFAULT_ORDER_DIR.to_string(),
            line_ending: LineEnding::Lf,
        }
    }
}

impl BuildConfig {
    /// Replace the dependency map
    pub fn with_dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Replace the line ending
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Replace the ref
    pub fn with_ref(mut self, r#ref: &str) -> Self {
        self.r#ref = r#ref.to_string();
        self
    }

    /// Replace the order descriptor directory
    pub fn with_order_dir(mut self, order_dir: &str) -> Self {
        self.order_dir = order_dir.trim_end_matches('/').to_string();
        self
    }

    /// Repository path of the order descriptor for `library`
    pub fn order_path(&self, library: &str) -> String {
        format!("{}/SaneCpp{}.json", self.order_dir, library)
    }
}
