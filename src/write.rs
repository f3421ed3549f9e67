//! Writing artifacts to disk
//!
//! ## Process
//!
//! 1.  **Create Directory**: The output directory is created recursively if
//!     it does not exist.
//!
//! 2.  **Write Content**: Each artifact is written as `SaneCpp<Library>.h`,
//!     replacing any previous build.
//!
//! Optionally, a smoke-test translation unit per library can be written next
//! to (or apart from) the artifacts. Compiling it checks that the artifact is
//! self-contained with its implementation section enabled.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::amalgamation::Artifact;
use crate::error::{Error, Result};

/// File name of the smoke test for `library`
pub fn smoke_test_name(library: &str) -> String {
    format!("Test_SaneCpp{}.cpp", library)
}

/// Smoke-test translation unit for `library`
pub fn smoke_test_source(library: &str) -> String {
    format!(
        "#define SANE_CPP_IMPLEMENTATION\n#include \"SaneCpp{}.h\"\n\nint main()\n{{\n    return 0;\n}}\n",
        library
    )
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::Filesystem {
        message: format!("Failed to create directory '{}': {}", dir.display(), e),
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })?;
    debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Writes every artifact into `out_dir`, returning the written paths in
/// artifact order.
pub fn write_artifacts(artifacts: &[Artifact], out_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir(out_dir)?;
    artifacts
        .iter()
        .map(|artifact| {
            let path = out_dir.join(&artifact.file_name);
            write_file(&path, &artifact.content)?;
            Ok(path)
        })
        .collect()
}

/// Writes one smoke test per artifact into `tests_dir`
pub fn write_smoke_tests(artifacts: &[Artifact], tests_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir(tests_dir)?;
    artifacts
        .iter()
        .map(|artifact| {
            let path = tests_dir.join(smoke_test_name(&artifact.library));
            write_file(&path, &smoke_test_source(&artifact.library))?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amalgamation::build_library;
    use crate::config::BuildConfig;
    use crate::filesystem::MemoryRepository;
    use tempfile::TempDir;

    fn artifacts() -> Vec<Artifact> {
        let repo = MemoryRepository::new()
            .with_file("Libraries/Foo/Foo.h", "int foo;\n")
            .with_file("Libraries/Bar/Bar.h", "int bar;\n");
        let config = BuildConfig::default();
        vec![
            build_library("Foo", &repo, &config).unwrap(),
            build_library("Bar", &repo, &config).unwrap(),
        ]
    }

    #[test]
    fn test_write_artifacts_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("_Build").join("_SingleFileLibraries");
        let artifacts = artifacts();

        let written = write_artifacts(&artifacts, &out).unwrap();

        assert_eq!(written, vec![out.join("SaneCppFoo.h"), out.join("SaneCppBar.h")]);
        let content = fs::read_to_string(out.join("SaneCppFoo.h")).unwrap();
        assert_eq!(content, artifacts[0].content);
    }

    #[test]
    fn test_write_artifacts_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("SaneCppFoo.h"), "stale").unwrap();

        write_artifacts(&artifacts(), temp_dir.path()).unwrap();

        let content = fs::read_to_string(temp_dir.path().join("SaneCppFoo.h")).unwrap();
        assert!(content.contains("int foo;"));
    }

    #[test]
    fn test_write_smoke_tests() {
        let temp_dir = TempDir::new().unwrap();
        let written = write_smoke_tests(&artifacts(), temp_dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        let content = fs::read_to_string(temp_dir.path().join("Test_SaneCppFoo.cpp")).unwrap();
        assert_eq!(
            content,
            "#define SANE_CPP_IMPLEMENTATION\n#include \"SaneCppFoo.h\"\n\nint main()\n{\n    return 0;\n}\n"
        );
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_artifacts(&artifacts(), &blocker).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
