//! Repository path arithmetic for sane-amalgamate
//!
//! Paths handled here are repository-relative and always `/`-separated,
//! regardless of the host platform. They come from a Repository Context
//! listing, never from `std::path`.

use crate::error::{Error, Result};
use glob::Pattern;

/// Top-level folders whose immediate children are libraries.
pub const LIBRARY_ROOTS: [&str; 2] = ["Libraries", "LibrariesExtra"];

/// The root that library files are looked up under when resolving order
/// entries and deriving default orders.
pub const PRIMARY_LIBRARY_ROOT: &str = "Libraries";

/// Prefix shared by every file of `library` under the primary root.
pub fn library_prefix(library: &str) -> String {
    format!("{}/{}/", PRIMARY_LIBRARY_ROOT, library)
}

/// Join `rel` onto directory `dir`, dropping empty and `.` segments and
/// popping on `..`.
///
/// A `rel` starting with `/` is repository-absolute and only loses its
/// leading slash. Popping past the repository root is a no-op.
pub fn join_normalized(dir: &str, rel: &str) -> String {
    if let Some(absolute) = rel.strip_prefix('/') {
        return absolute.to_string();
    }
    let joined = format!("{}/{}", dir, rel);
    let mut stack: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(part),
        }
    }
    stack.join("/")
}

/// Directory part of `path`, or `""` for a path without separators.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

/// Final component of `path`.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Name of the library owning `path`, if it sits under a recognised root.
pub fn library_of(path: &str) -> Option<&str> {
    let mut parts = path.split('/');
    let root = parts.next()?;
    if !LIBRARY_ROOTS.contains(&root) {
        return None;
    }
    parts.next()
}

/// Whether `path` starts with one of the recognised library roots.
pub fn is_under_library_root(path: &str) -> bool {
    LIBRARY_ROOTS
        .iter()
        .any(|root| path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/')))
}

/// Path relative to its recognised root when the file sits in a
/// subdirectory of its library folder (`<root>/<Lib>/<dir>/.../<file>`).
///
/// Direct children of a library folder yield `None`.
pub fn nested_library_path(path: &str) -> Option<&str> {
    let (root, rest) = path.split_once('/')?;
    if !LIBRARY_ROOTS.contains(&root) {
        return None;
    }
    if rest.split('/').count() > 2 {
        Some(rest)
    } else {
        None
    }
}

/// Match a library name against a glob pattern
pub fn glob_match(pattern: &str, name: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_normalized() {
        assert_eq!(
            join_normalized("Libraries/Foo", "Internal/FooInternal.h"),
            "Libraries/Foo/Internal/FooInternal.h"
        );
        assert_eq!(
            join_normalized("Libraries/Foo/Internal", "../Foo.h"),
            "Libraries/Foo/Foo.h"
        );
        assert_eq!(
            join_normalized("Libraries/Foo", "./../Bar/./Bar.h"),
            "Libraries/Bar/Bar.h"
        );
        assert_eq!(join_normalized("", "Foo.h"), "Foo.h");
        assert_eq!(join_normalized("a", "../../../b.h"), "b.h");
    }

    #[test]
    fn test_join_normalized_absolute() {
        assert_eq!(
            join_normalized("Libraries/Foo", "/Libraries/Bar/Bar.h"),
            "Libraries/Bar/Bar.h"
        );
    }

    #[test]
    fn test_parent_dir_and_file_name() {
        assert_eq!(parent_dir("Libraries/Foo/Foo.h"), "Libraries/Foo");
        assert_eq!(parent_dir("Foo.h"), "");
        assert_eq!(file_name("Libraries/Foo/Foo.h"), "Foo.h");
        assert_eq!(file_name("Foo.h"), "Foo.h");
    }

    #[test]
    fn test_library_of() {
        assert_eq!(library_of("Libraries/Foo/Foo.h"), Some("Foo"));
        assert_eq!(library_of("LibrariesExtra/Bar/Internal/X.h"), Some("Bar"));
        assert_eq!(library_of("Libraries/Foo"), Some("Foo"));
        assert_eq!(library_of("Libraries"), None);
        assert_eq!(library_of("Tests/Foo/Foo.h"), None);
    }

    #[test]
    fn test_is_under_library_root() {
        assert!(is_under_library_root("Libraries/Foo/Foo.h"));
        assert!(is_under_library_root("LibrariesExtra/Foo/Foo.h"));
        assert!(!is_under_library_root("LibrariesOther/Foo/Foo.h"));
        assert!(!is_under_library_root("Support/Foo.h"));
    }

    #[test]
    fn test_nested_library_path() {
        assert_eq!(
            nested_library_path("Libraries/Foo/Internal/FooInternal.h"),
            Some("Foo/Internal/FooInternal.h")
        );
        assert_eq!(
            nested_library_path("LibrariesExtra/Foo/A/B/C.h"),
            Some("Foo/A/B/C.h")
        );
        assert_eq!(nested_library_path("Libraries/Foo/Foo.h"), None);
        assert_eq!(nested_library_path("Support/Foo/Internal/X.h"), None);
    }

    #[test]
    fn test_glob_match() {
        assert!(glob_match("File*", "FileSystem").unwrap());
        assert!(glob_match("Strings", "Strings").unwrap());
        assert!(!glob_match("File*", "Strings").unwrap());
        assert!(glob_match("[", "x").is_err());
    }
}
