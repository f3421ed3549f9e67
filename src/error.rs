//! # Error Handling
//!
//! This module defines the centralized error type for `sane-amalgamate`. It
//! uses `thiserror` to describe every failure that can leave the library.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Most variants originate in a Repository
//!   Context (tree listing, file reads, version lookup) or in loading the
//!   dependency map. The amalgamation core itself treats missing data as
//!   "nothing to contribute" and only propagates what its collaborators raise,
//!   unchanged.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for sane-amalgamate operations
#[derive(Error, Debug)]
pub enum Error {
    /// A repository path was requested that does not exist.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// The dependency map could not be loaded or is not shaped as expected.
    #[error("Dependency map error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Dependencies {
        message: String,
        /// Optional hint for how to fix the dependency map
        hint: Option<String>,
    },

    /// An error occurred while executing a Git command.
    #[error("Git command failed in {dir}: {command} - {stderr}")]
    GitCommand {
        command: String,
        dir: String,
        stderr: String,
    },

    /// An error occurred while writing generated files.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The worker pool for parallel builds could not be created.
    #[error("Thread pool error: {message}")]
    ThreadPool { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
