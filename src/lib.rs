//! # Sane C++ Single-File Amalgamation
//!
//! This library turns a multi-file C++ library of a Sane C++-style repository
//! into one self-contained header: a banner, an aggregated license block,
//! includes of the libraries it depends on, a guarded header section and an
//! optional guarded implementation section. It is designed to be used by the
//! `sane-amalgamate` command-line tool but works with any source of files
//! that implements `RepositoryContext`.
//!
//! ## Quick Example
//!
//! ```
//! use sane_amalgamate::amalgamation::build_library;
//! use sane_amalgamate::config::BuildConfig;
//! use sane_amalgamate::filesystem::MemoryRepository;
//!
//! let repo = MemoryRepository::new()
//!     .with_version("v1 (abc1234)")
//!     .with_file("Libraries/Foo/Foo.h", "#pragma once\nint foo();\n")
//!     .with_file("Libraries/Foo/Foo.cpp", "#include \"Foo.h\"\nint foo() { return 1; }\n");
//!
//! let artifact = build_library("Foo", &repo, &BuildConfig::default()).unwrap();
//! assert_eq!(artifact.file_name, "SaneCppFoo.h");
//! assert!(artifact.content.contains("#if !defined(SANE_CPP_FOO_HEADER)"));
//! assert!(artifact.content.contains("int foo() { return 1; }"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Repository Context (`repository`, `filesystem`)**: Where files come
//!   from. `LocalRepository` reads a checkout on disk, `MemoryRepository`
//!   holds files in memory.
//! - **Configuration (`config`)**: The dependency map, the ref to build, the
//!   order descriptor directory and the line ending.
//! - **Amalgamation (`amalgamation`)**: Order resolution, depth-first include
//!   inlining with deduplication, license aggregation, line statistics and
//!   final assembly.
//! - **Output (`write`)**: Persisting artifacts and smoke tests.
//!
//! ## Execution Flow
//!
//! For each library, `amalgamation::build_library`:
//!
//! 1.  **Lists** the repository tree.
//! 2.  **Resolves** the header and implementation orders, from the library's
//!     order descriptor or derived from the tree.
//! 3.  **Inlines** every header, then every implementation file, recursing
//!     into same-library `#include "..."` targets exactly once each.
//! 4.  **Assembles** the artifact text.
//!
//! `amalgamation::build_libraries` runs several such builds in parallel.

pub mod amalgamation;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod output;
pub mod path;
pub mod repository;
pub mod suggestions;
pub mod write;

#[cfg(test)]
mod path_proptest;
