//! # Test Requests
//!
//! A [`TestRequest`] is the identity of the running test: its source file, the
//! markers declared alongside it and the configuration in effect. The fixtures
//! in [`crate::fixtures`] resolve every path from it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::config::PowerpackConfig;
use crate::errors::{PowerpackError, Result};
use crate::marker::{Marker, MarkerTable};

#[derive(Debug, Clone)]
pub struct TestRequest {
    config: PowerpackConfig,
    source_file: PathBuf,
    markers: Vec<Marker>,
}

impl TestRequest {
    pub fn new(config: PowerpackConfig, source_file: impl Into<PathBuf>) -> Self {
        Self {
            config,
            source_file: source_file.into(),
            markers: Vec::new(),
        }
    }

    /// Builds a request for a source path as reported by `file!()`.
    ///
    /// `file!()` is relative to the package root for a standalone crate but to
    /// the workspace root inside a workspace, so the path is tried against
    /// `manifest_dir` and then each of its ancestors.
    pub fn from_source(
        config: PowerpackConfig,
        manifest_dir: impl AsRef<Path>,
        file: impl AsRef<Path>,
    ) -> Result<Self> {
        let source_file = locate_source_file(manifest_dir.as_ref(), file.as_ref())?;
        Ok(Self::new(config, source_file))
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Appends every marker `table` registers for `test`.
    pub fn with_table_markers(mut self, table: &MarkerTable, test: &str) -> Self {
        self.markers.extend(table.markers_for(test).iter().cloned());
        self
    }

    pub fn config(&self) -> &PowerpackConfig {
        &self.config
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// First marker with the given name. Markers attached directly come before
    /// markers from a table, so a test-level declaration wins.
    pub fn get_closest_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.name == name)
    }

    /// The folder holding the test source file and the module name (the file
    /// stem). The source file must exist.
    pub fn testcase_info(&self) -> Result<(PathBuf, OsString)> {
        let source_missing = || PowerpackError::SourceFile {
            path: self.source_file.clone(),
        };

        if !self.source_file.is_file() {
            return Err(source_missing());
        }
        let folder = self.source_file.parent().ok_or_else(source_missing)?;
        let module = self
            .source_file
            .file_stem()
            .map(|stem| stem.to_os_string())
            .ok_or_else(source_missing)?;

        Ok((folder.to_path_buf(), module))
    }
}

fn locate_source_file(manifest_dir: &Path, file: &Path) -> Result<PathBuf> {
    if file.is_absolute() {
        return Ok(file.to_path_buf());
    }
    for base in manifest_dir.ancestors() {
        let candidate = base.join(file);
        if candidate.is_file() {
            trace!(path = %candidate.display(), "located test source file");
            return Ok(candidate);
        }
    }
    Err(PowerpackError::SourceFile {
        path: manifest_dir.join(file),
    })
}

/// Builds a [`TestRequest`] for the calling test file.
///
/// ```rust,ignore
/// let request = powerpack_request!(config, "test.txt")?;
/// ```
///
/// The second form attaches `Marker::compare_file(filename)`.
#[macro_export]
macro_rules! powerpack_request {
    ($config:expr) => {
        $crate::TestRequest::from_source($config, env!("CARGO_MANIFEST_DIR"), file!())
    };
    ($config:expr, $filename:expr) => {
        $crate::powerpack_request!($config)
            .map(|request| request.with_marker($crate::Marker::compare_file($filename)))
    };
}
