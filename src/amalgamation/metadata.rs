//! Copyright and SPDX aggregation
//!
//! Every inlined file is scanned for `// Copyright (c) <holder>` and
//! `// SPDX-License-Identifier: <id>` lines. The results end up in the
//! license block of the artifact banner.

use std::collections::{BTreeSet, HashMap};

/// Copyright holders with their occurrence counts, in discovery order
#[derive(Debug, Clone, Default)]
pub struct AuthorsInfo {
    holders: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl AuthorsInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `holder`
    pub fn record(&mut self, holder: &str) {
        match self.index.get(holder) {
            Some(&position) => self.holders[position].1 += 1,
            None => {
                self.index.insert(holder.to_string(), self.holders.len());
                self.holders.push((holder.to_string(), 1));
            }
        }
    }

    /// Occurrences recorded for `holder`
    pub fn count(&self, holder: &str) -> usize {
        self.index
            .get(holder)
            .map(|&position| self.holders[position].1)
            .unwrap_or(0)
    }

    /// Holders by descending count; equal counts keep discovery order.
    pub fn ranked(&self) -> Vec<&str> {
        let mut ranked: Vec<&(String, usize)> = self.holders.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(holder, _)| holder.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

/// Distinct SPDX identifiers, kept in alphabetical order
#[derive(Debug, Clone, Default)]
pub struct SpdxSet {
    identifiers: BTreeSet<String>,
}

impl SpdxSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, identifier: &str) {
        if !self.identifiers.contains(identifier) {
            self.identifiers.insert(identifier.to_string());
        }
    }

    /// Identifiers joined with `", "`, or `None` when nothing was recorded
    pub fn joined(&self) -> Option<String> {
        if self.identifiers.is_empty() {
            return None;
        }
        Some(
            self.identifiers
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// License metadata accumulated over one library build (both sections)
#[derive(Debug, Clone, Default)]
pub struct LicenseMetadata {
    pub authors: AuthorsInfo,
    pub spdx: SpdxSet,
}

impl LicenseMetadata {
    pub fn new() -> Self {
        Self::default()
    }
}
