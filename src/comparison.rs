//! # File Comparison
//!
//! [`ComparisonFiles`] pairs a golden file with the file a test generated.
//! [`compare_files`] checks that both hold exactly the same text.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{PowerpackError, Result};

/// A pair of expected and generated files to be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFiles {
    pub expect_file: PathBuf,
    pub build_file: PathBuf,
}

impl ComparisonFiles {
    pub fn new(expect_file: impl Into<PathBuf>, build_file: impl Into<PathBuf>) -> Self {
        Self {
            expect_file: expect_file.into(),
            build_file: build_file.into(),
        }
    }

    pub fn expect_file(&self) -> &Path {
        &self.expect_file
    }

    pub fn build_file(&self) -> &Path {
        &self.build_file
    }

    /// Writes the generated artifact, creating missing parent folders.
    pub fn write_build(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        if let Some(parent) = self.build_file.parent() {
            fs::create_dir_all(parent).map_err(|source| PowerpackError::BuildDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.build_file, contents)?;
        Ok(())
    }
}

/// Compares the generated file against the expected one.
///
/// Both files are read in full as UTF-8; invalid UTF-8 and missing files
/// surface as the underlying `std::io::Error`. The comparison is exact,
/// whitespace and line endings included.
pub fn compare_files(comparison_files: &ComparisonFiles) -> Result<()> {
    debug!(
        "Comparing: {} <-> {}",
        comparison_files.expect_file.display(),
        comparison_files.build_file.display()
    );

    let expected = fs::read_to_string(&comparison_files.expect_file)?;
    let actual = fs::read_to_string(&comparison_files.build_file)?;

    if expected == actual {
        return Ok(());
    }
    Err(PowerpackError::Mismatch {
        expect_file: comparison_files.expect_file.clone(),
        build_file: comparison_files.build_file.clone(),
        expected,
        actual,
    })
}

/// Panicking form of [`compare_files`], for tests that do not return a
/// `Result`.
#[track_caller]
pub fn assert_files_match(comparison_files: &ComparisonFiles) {
    if let Err(error) = compare_files(comparison_files) {
        panic!("{error}");
    }
}
