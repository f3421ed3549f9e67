//! Property-based tests for repository path functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{file_name, glob_match, join_normalized, library_of, parent_dir};
    use proptest::prelude::*;

    // ============================================================================
    // join_normalized property tests
    // ============================================================================

    proptest! {
        /// Property: the result never contains empty, `.` or `..` segments
        #[test]
        fn join_normalized_has_no_dot_segments(
            dir in "[a-zA-Z./]{0,20}",
            rel in "[a-zA-Z./]{0,20}",
        ) {
            let result = join_normalized(&dir, &rel);
            if rel.starts_with('/') {
                return Ok(());
            }
            for segment in result.split('/') {
                prop_assert!(
                    result.is_empty() || (segment != "" && segment != "." && segment != ".."),
                    "join_normalized({:?}, {:?}) produced segment {:?}",
                    dir,
                    rel,
                    segment
                );
            }
        }

        /// Property: normalisation is idempotent
        #[test]
        fn join_normalized_is_idempotent(
            dir in "[a-zA-Z./]{0,20}",
            rel in "[a-zA-Z./]{0,20}",
        ) {
            let once = join_normalized(&dir, &rel);
            if rel.starts_with('/') {
                return Ok(());
            }
            let twice = join_normalized("", &once);
            prop_assert_eq!(once, twice);
        }

        /// Property: plain names under a plain directory are simply concatenated
        #[test]
        fn join_normalized_plain_segments(
            dir in "[a-zA-Z]{1,8}(/[a-zA-Z]{1,8}){0,3}",
            name in "[a-zA-Z]{1,8}\\.h",
        ) {
            prop_assert_eq!(join_normalized(&dir, &name), format!("{}/{}", dir, name));
        }
    }

    // ============================================================================
    // parent_dir / file_name property tests
    // ============================================================================

    proptest! {
        /// Property: parent_dir and file_name split a path back into itself
        #[test]
        fn parent_and_file_name_recompose(path in "[a-zA-Z]{1,6}(/[a-zA-Z]{1,6}){1,4}") {
            let recomposed = format!("{}/{}", parent_dir(&path), file_name(&path));
            prop_assert_eq!(recomposed, path);
        }

        /// Property: every path under Libraries/<name>/ is owned by <name>
        #[test]
        fn library_of_reads_second_segment(
            lib in "[A-Z][a-zA-Z]{0,10}",
            rest in "[a-zA-Z]{1,6}(/[a-zA-Z]{1,6}){0,3}",
        ) {
            let path = format!("Libraries/{}/{}", lib, rest);
            prop_assert_eq!(library_of(&path), Some(lib.as_str()));
        }
    }

    // ============================================================================
    // glob_match property tests
    // ============================================================================

    proptest! {
        /// Property: "*" matches any library name
        #[test]
        fn glob_star_matches_any_library(name in "[a-zA-Z0-9_]+") {
            let result = glob_match("*", &name);
            prop_assert!(result.is_ok());
            prop_assert!(result.unwrap(), "Pattern '*' should match '{}'", name);
        }

        /// Property: a literal name matches itself
        #[test]
        fn glob_literal_matches_self(name in "[a-zA-Z0-9_]+") {
            prop_assert!(glob_match(&name, &name).unwrap());
        }
    }
}
