//! Version discovery through the system `git` command

use std::path::Path;
use std::process::Command;

use crate::error::Error;
use log::debug;

/// Version string used when the repository has no usable tag or commit.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Run `git <args>` inside `dir` and return its trimmed stdout.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String, Error> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: args.join(" "),
            dir: dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            dir: dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Latest tag reachable from HEAD
pub fn latest_tag(dir: &Path) -> Result<String, Error> {
    run_git(dir, &["describe", "--tags", "--abbrev=0"])
}

/// Abbreviated hash of HEAD
pub fn short_head(dir: &Path) -> Result<String, Error> {
    run_git(dir, &["rev-parse", "--short", "HEAD"])
}

/// `<latest tag> (<short hash>)` for the checkout at `dir`, or `unknown`
/// when either part cannot be determined.
pub fn describe_version(dir: &Path) -> String {
    match (latest_tag(dir), short_head(dir)) {
        (Ok(tag), Ok(hash)) => format!("{} ({})", tag, hash),
        (Err(e), _) | (_, Err(e)) => {
            debug!("Falling back to '{}' version: {}", UNKNOWN_VERSION, e);
            UNKNOWN_VERSION.to_string()
        }
    }
}
