//! # Error Suggestions
//!
//! Helpers that build user-facing errors with hints: what went wrong AND how
//! to fix it.
//!
//! ```rust,ignore
//! return Err(suggestions::unknown_library("Tim", &known));
//! ```

use std::path::Path;

/// Error for a library name that matches nothing known.
///
/// Suggests the closest known name when one is within a small edit distance.
pub fn unknown_library(name: &str, known: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown library: {name}{did_you_mean}\n\n\
         hint: Run 'sane-amalgamate ls' to list available libraries\n\
         hint: Library patterns are globs, e.g. 'File*'"
    )
}

/// Error for a dependency map that does not exist.
pub fn dependencies_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Dependency map not found: {path}\n\n\
         hint: Use --dependencies to point at Dependencies.json\n\
         hint: Use --repo-root if you are not running from the repository root",
        path = path.display()
    )
}

/// Error for a build invoked without selecting libraries.
pub fn no_libraries_selected() -> anyhow::Error {
    anyhow::anyhow!(
        "No libraries selected\n\n\
         hint: Use --all to build every library\n\
         hint: Use --library <PATTERN> (repeatable) to pick libraries"
    )
}

/// Error for an invalid glob pattern.
pub fn invalid_glob(pattern: &str, error: &dyn std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid library pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Use * for any sequence of characters, ? for a single one\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(&input.to_lowercase(), &candidate.to_lowercase());
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0usize; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["Foundation", "FileSystem", "Time", "Threading"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_unknown_library_suggests_similar() {
        let message = unknown_library("Tme", &known()).to_string();

        assert!(message.contains("Unknown library: Tme"));
        assert!(message.contains("Did you mean 'Time'?"));
        assert!(message.contains("sane-amalgamate ls"));
    }

    #[test]
    fn test_unknown_library_ignores_case_when_suggesting() {
        let message = unknown_library("filesystem", &known()).to_string();
        assert!(message.contains("Did you mean 'FileSystem'?"));
    }

    #[test]
    fn test_unknown_library_no_suggestion_for_very_different() {
        let message = unknown_library("Http", &known()).to_string();
        assert!(!message.contains("Did you mean"));
    }

    #[test]
    fn test_dependencies_not_found_includes_hints() {
        let message = dependencies_not_found(Path::new("/x/Dependencies.json")).to_string();
        assert!(message.contains("/x/Dependencies.json"));
        assert!(message.contains("--dependencies"));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("time", "time"), 0);
        assert_eq!(edit_distance("tme", "time"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar() {
        let candidates = ["Time", "Threading", "Foundation"];
        assert_eq!(find_similar("Threadng", &candidates), Some("Threading"));
        assert_eq!(find_similar("Xyz", &candidates), None);
    }
}
