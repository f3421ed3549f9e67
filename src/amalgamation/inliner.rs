//! Recursive include inlining
//!
//! Expands an ordered list of library files depth-first, replacing every
//! quoted include of a same-library file with that file's expanded text.
//!
//! ## Process (per file)
//!
//! 1.  **Visit once**: a path already in the `ProcessedSet` contributes
//!     nothing. Otherwise it is inserted before anything else happens, which
//!     is what makes cyclic and repeated includes terminate.
//!
//! 2.  **Provenance banner**: files in a subdirectory of their library folder
//!     are prefixed with a divider, a `// <Lib>/<dir>/<file>` line and another
//!     divider.
//!
//! 3.  **Line scan**: copyright and SPDX lines feed the license metadata;
//!     `#pragma once` is dropped; a quoted include of an existing file under a
//!     library root is either expanded in place (same library) or dropped
//!     (other library). Every other line is emitted with the configured line
//!     ending.
//!
//! 4.  **Uniform spacing**: trailing whitespace is stripped from the file's
//!     contribution and exactly two line endings are appended.
//!
//! A file that cannot be read contributes nothing and the build continues.

use std::collections::HashSet;

use log::debug;
use regex::Regex;

use super::assembler::divider;
use super::metadata::LicenseMetadata;
use super::SourceTree;
use crate::error::Result;
use crate::path::{
    is_under_library_root, join_normalized, library_of, library_prefix, nested_library_path,
    parent_dir,
};
use crate::repository::RepositoryContext;

/// Anchored matchers applied to each trimmed source line
#[derive(Debug, Clone)]
pub struct LineMatchers {
    copyright: Regex,
    spdx: Regex,
    include: Regex,
}

impl LineMatchers {
    pub fn new() -> Result<Self> {
        Ok(Self {
            copyright: Regex::new(r"^//\s*Copyright \(c\)\s*(.*)$")?,
            spdx: Regex::new(r"^//\s*SPDX-License-Identifier:\s*(.*)$")?,
            include: Regex::new(r#"^#include\s+"(.*)""#)?,
        })
    }

    /// Holder named by a copyright line
    pub fn copyright_holder<'l>(&self, stripped: &'l str) -> Option<&'l str> {
        self.copyright
            .captures(stripped)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Identifier named by an SPDX line
    pub fn spdx_identifier<'l>(&self, stripped: &'l str) -> Option<&'l str> {
        self.spdx
            .captures(stripped)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Target of a quoted include directive
    pub fn quoted_include<'l>(&self, stripped: &'l str) -> Option<&'l str> {
        self.include
            .captures(stripped)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_pragma_once(stripped: &str) -> bool {
        stripped.starts_with("#pragma once")
    }
}

/// Mutable state of one library build, shared by its header and
/// implementation sections and never reused across builds.
#[derive(Debug, Default)]
pub struct BuildState {
    /// Paths already inlined (the ProcessedSet)
    pub processed: HashSet<String>,
    pub metadata: LicenseMetadata,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Inlines files of one target library
pub struct Inliner<'a> {
    ctx: &'a dyn RepositoryContext,
    r#ref: &'a str,
    library: &'a str,
    tree: &'a SourceTree,
    matchers: &'a LineMatchers,
    eol: &'a str,
}

impl<'a> Inliner<'a> {
    pub fn new(
        ctx: &'a dyn RepositoryContext,
        r#ref: &'a str,
        library: &'a str,
        tree: &'a SourceTree,
        matchers: &'a LineMatchers,
        eol: &'a str,
    ) -> Self {
        Self {
            ctx,
            r#ref,
            library,
            tree,
            matchers,
            eol,
        }
    }

    /// Expands each entry of `order` in turn and concatenates the results.
    ///
    /// Entries that do not resolve to a library file are skipped.
    pub fn inline_ordered(&self, order: &[String], state: &mut BuildState) -> String {
        let mut content = String::new();
        for entry in order {
            match self.resolve_entry(entry) {
                Some(path) => content.push_str(&self.expand(path, state)),
                None => debug!("'{}' not found in library '{}'", entry, self.library),
            }
        }
        content
    }

    /// First tree path under the library root ending with `entry`.
    ///
    /// Several candidates sharing a suffix resolve to whichever is listed
    /// first.
    pub fn resolve_entry(&self, entry: &str) -> Option<&'a str> {
        let prefix = library_prefix(self.library);
        self.tree
            .paths()
            .find(|p| p.starts_with(&prefix) && p.ends_with(entry))
    }

    fn expand(&self, path: &str, state: &mut BuildState) -> String {
        if !state.processed.insert(path.to_string()) {
            return String::new();
        }

        let text = match self.ctx.read_file(self.r#ref, path) {
            Ok(text) => text,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", path, e);
                return String::new();
            }
        };

        let mut content = String::new();
        if let Some(relative) = nested_library_path(path) {
            content.push_str(&divider(self.eol));
            content.push_str("// ");
            content.push_str(relative);
            content.push_str(self.eol);
            content.push_str(&divider(self.eol));
        }

        let directory = parent_dir(path);
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let stripped = line.trim();

            if let Some(holder) = self.matchers.copyright_holder(stripped) {
                state.metadata.authors.record(holder);
            }
            if let Some(identifier) = self.matchers.spdx_identifier(stripped) {
                state.metadata.spdx.record(identifier);
            }

            if LineMatchers::is_pragma_once(stripped) {
                continue;
            }

            if let Some(target) = self.matchers.quoted_include(stripped) {
                let included = join_normalized(directory, target);
                if self.tree.contains(&included) && is_under_library_root(&included) {
                    if library_of(&included) == Some(self.library) {
                        content.push_str(&self.expand(&included, state));
                    } else {
                        debug!("Dropping cross-library include of {} from {}", included, path);
                    }
                    continue;
                }
            }

            content.push_str(line);
            content.push_str(self.eol);
        }

        let mut contribution = content.trim_end().to_string();
        contribution.push_str(self.eol);
        contribution.push_str(self.eol);
        contribution
    }
}
