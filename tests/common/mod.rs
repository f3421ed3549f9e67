//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_foo_library();
//!     fixture.command().args(["build", "--all"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::sources;
    pub use super::TestFixture;
}

/// Source snippets shared by the tests.
#[allow(dead_code)]
pub mod sources {
    /// Public header of the `Foo` library.
    pub const FOO_H: &str = "#pragma once\n#include \"Internal/FooInternal.h\"\nint foo();\n";

    /// Internal header of the `Foo` library.
    pub const FOO_INTERNAL_H: &str = "// internal helper\nint helper();\n";

    /// Implementation of the `Foo` library.
    pub const FOO_CPP: &str = "#include \"Foo.h\"\nint foo() { return helper(); }\n";

    /// `//` followed by 118 dashes.
    pub fn divider() -> String {
        format!("//{}", "-".repeat(118))
    }
}

/// A temporary repository checkout laid out like a Sane C++ repository:
/// `Libraries/<Lib>/...`, `Support/Dependencies/Dependencies.json` and
/// `Support/SingleFileLibs/SaneCpp<Lib>.json`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given repository-relative path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a file under `Libraries/<library>/`.
    pub fn with_library_file(self, library: &str, path: &str, content: &str) -> Self {
        self.with_file(&format!("Libraries/{}/{}", library, path), content)
    }

    /// Add the `Foo` library: a public header, an internal header and an
    /// implementation file.
    pub fn with_foo_library(self) -> Self {
        self.with_library_file("Foo", "Foo.h", sources::FOO_H)
            .with_library_file("Foo", "Internal/FooInternal.h", sources::FOO_INTERNAL_H)
            .with_library_file("Foo", "Foo.cpp", sources::FOO_CPP)
    }

    /// Write `Support/Dependencies/Dependencies.json`.
    pub fn with_dependencies(self, json: &str) -> Self {
        self.with_file("Support/Dependencies/Dependencies.json", json)
    }

    /// Write the order descriptor of `library`.
    pub fn with_order(self, library: &str, json: &str) -> Self {
        self.with_file(&format!("Support/SingleFileLibs/SaneCpp{}.json", library), json)
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Path of a built artifact in the default output directory.
    pub fn artifact_path(&self, library: &str) -> PathBuf {
        self.path()
            .join("_Build/_SingleFileLibraries")
            .join(format!("SaneCpp{}.h", library))
    }

    /// Content of a built artifact in the default output directory.
    pub fn read_artifact(&self, library: &str) -> String {
        std::fs::read_to_string(self.artifact_path(library)).expect("Artifact was not written")
    }

    /// Create a command configured to run in this fixture's directory, with
    /// colors off and no environment overrides.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sane-amalgamate");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("SANE_AMALGAMATE_DEPENDENCIES");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
