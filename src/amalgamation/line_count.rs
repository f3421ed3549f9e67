//! Code/comment line statistics for the artifact banner

use std::fmt;

/// Line statistics of an inlined section
///
/// `comments` is signed: the trailing-terminator compensation can take it
/// below zero for text that does not end with a line break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub code: usize,
    pub comments: isize,
}

impl fmt::Display for LineCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code) + {} (comments)", self.code, self.comments)
    }
}

/// Classifies every line of `text` as code or comment.
///
/// Blank lines count as comments. Lines inside a block comment, lines
/// starting with `//`, and lines opening a `/*` count as comments. Anything
/// else is code, even when it carries a trailing comment.
///
/// Splitting keeps the empty element after a final line break, so the
/// comment tally is decremented once per call to compensate.
pub fn count_lines(text: &str) -> LineCounts {
    let mut code = 0usize;
    let mut comments = 0isize;
    let mut in_block = false;

    for line in text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            comments += 1;
            continue;
        }
        if in_block {
            comments += 1;
            if stripped.contains("*/") {
                in_block = false;
            }
            continue;
        }
        if stripped.starts_with("//") {
            comments += 1;
            continue;
        }
        if stripped.starts_with("/*") {
            comments += 1;
            if !stripped.contains("*/") {
                in_block = true;
            }
            continue;
        }
        code += 1;
    }
    comments -= 1;

    LineCounts { code, comments }
}
