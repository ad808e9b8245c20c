//! # Test Markers
//!
//! Per-test metadata that parametrizes the fixtures. A marker has a name and a
//! list of loosely typed positional arguments; the comparison fixtures read the
//! filename from the `powerpack_compare_file` marker.
//!
//! Markers are attached to a [`TestRequest`](crate::TestRequest) directly, or
//! registered in a [`MarkerTable`] loaded from YAML:
//!
//! ```yaml
//! test_hello:
//!   - name: powerpack_compare_file
//!     args: ["test.txt"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::errors::{PowerpackError, Result};

/// Name of the marker carrying the compared filename.
pub const COMPARE_FILE_MARKER: &str = "powerpack_compare_file";

/// A positional marker argument.
pub type MarkerArg = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    #[serde(default)]
    pub args: Vec<MarkerArg>,
}

impl Marker {
    pub fn new(name: impl Into<String>, args: Vec<MarkerArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// `powerpack_compare_file(filename)`
    pub fn compare_file(filename: impl Into<String>) -> Self {
        Self::new(COMPARE_FILE_MARKER, vec![MarkerArg::String(filename.into())])
    }
}

/// Extracts the compared filename from the closest `powerpack_compare_file`
/// marker. Absence, a wrong argument count, a non-string argument and a name
/// that would leave the expect or build folder all produce the same
/// [`PowerpackError::InvalidMarker`].
pub fn compare_filename(marker: Option<&Marker>) -> Result<&str> {
    let marker = marker.ok_or(PowerpackError::InvalidMarker)?;
    match marker.args.as_slice() {
        [MarkerArg::String(filename)] if stays_inside(filename) => Ok(filename.as_str()),
        _ => Err(PowerpackError::InvalidMarker),
    }
}

fn stays_inside(filename: &str) -> bool {
    let path = Path::new(filename);
    path.file_name().is_some()
        && !path.has_root()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Registration table mapping test names to their markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerTable {
    tests: BTreeMap<String, Vec<Marker>>,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source)
            .map_err(|source| PowerpackError::MarkerTableParse { path: None, source })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PowerpackError::MarkerTableRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&source).map_err(|source| PowerpackError::MarkerTableParse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Registers a marker for `test`. Markers registered first are closest.
    pub fn register(&mut self, test: impl Into<String>, marker: Marker) -> &mut Self {
        self.tests.entry(test.into()).or_default().push(marker);
        self
    }

    pub fn markers_for(&self, test: &str) -> &[Marker] {
        self.tests.get(test).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}
