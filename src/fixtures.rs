//! # Comparison Fixtures
//!
//! Path resolution for golden-file tests. Every path is derived from the
//! request's source file:
//!
//! ```text
//! <test dir>/<expect_folder>/<module>/<filename>   golden file, must exist
//! <test dir>/<build_folder>/<module>/<filename>    generated file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::comparison::ComparisonFiles;
use crate::errors::{PowerpackError, Result};
use crate::marker::{compare_filename, COMPARE_FILE_MARKER};
use crate::request::TestRequest;

impl TestRequest {
    /// Folder from which to get expected files. Must already exist.
    pub fn expect_path(&self) -> Result<PathBuf> {
        let (testcase_folder, module) = self.testcase_info()?;
        let expect_path = testcase_folder
            .join(&self.config().expect_folder)
            .join(module);

        if !expect_path.is_dir() {
            return Err(PowerpackError::MissingExpectDir { path: expect_path });
        }
        trace!(path = %expect_path.display(), "resolved expect path");
        Ok(expect_path)
    }

    /// Folder in which to place generated files. Created if it does not exist.
    pub fn build_path(&self) -> Result<PathBuf> {
        let (testcase_folder, module) = self.testcase_info()?;
        let build_path = testcase_folder
            .join(&self.config().build_folder)
            .join(module);

        fs::create_dir_all(&build_path).map_err(|source| PowerpackError::BuildDir {
            path: build_path.clone(),
            source,
        })?;
        trace!(path = %build_path.display(), "resolved build path");
        Ok(build_path)
    }

    /// Filename from the closest `powerpack_compare_file` marker.
    pub fn compare_file(&self) -> Result<&str> {
        compare_filename(self.get_closest_marker(COMPARE_FILE_MARKER))
    }

    /// Expected file named by the compare-file marker.
    pub fn expect_file(&self) -> Result<PathBuf> {
        let filename = self.compare_file()?;
        Ok(self.expect_path()?.join(filename))
    }

    /// File the test should generate, named by the compare-file marker.
    pub fn build_file(&self) -> Result<PathBuf> {
        let filename = self.compare_file()?;
        Ok(self.build_path()?.join(filename))
    }

    pub fn comparison_files(&self) -> Result<ComparisonFiles> {
        Ok(ComparisonFiles::new(self.expect_file()?, self.build_file()?))
    }

    /// Every golden file below the expect path, relative to it and sorted.
    pub fn expected_files(&self) -> Result<Vec<PathBuf>> {
        walk_golden_files(&self.expect_path()?)
    }

    /// One [`ComparisonFiles`] per golden file in the module's expect folder.
    pub fn comparison_pairs(&self) -> Result<Vec<ComparisonFiles>> {
        let expect_path = self.expect_path()?;
        let build_path = self.build_path()?;
        let pairs: Vec<_> = walk_golden_files(&expect_path)?
            .into_iter()
            .map(|relative| {
                ComparisonFiles::new(expect_path.join(&relative), build_path.join(relative))
            })
            .collect();
        debug!(
            count = pairs.len(),
            module_dir = %expect_path.display(),
            "collected comparison pairs"
        );
        Ok(pairs)
    }
}

fn walk_golden_files(expect_path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(expect_path) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(expect_path) {
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
