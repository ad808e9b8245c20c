//! Powerpack error handling.
//!
//! Every failure the fixtures can produce is a variant of [`PowerpackError`].
//! The enum derives both `thiserror::Error` and `miette::Diagnostic`, so test
//! bodies can return `miette::Result<()>` and use `?` directly.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Message shared by every malformed or missing compare-file marker.
pub const INVALID_MARKER_MESSAGE: &str = "Exactly one powerpack_compare_file marker argument must be provided to use the comparison file fixtures";

pub type Result<T> = std::result::Result<T, PowerpackError>;

#[derive(Error, Diagnostic, Debug)]
pub enum PowerpackError {
    // Configuration errors
    #[error("{}", INVALID_MARKER_MESSAGE)]
    #[diagnostic(
        code(powerpack::config::marker),
        help("attach `Marker::compare_file(\"<filename>\")` to the request")
    )]
    InvalidMarker,

    #[error("Failed to read configuration file '{}'", path.display())]
    #[diagnostic(code(powerpack::config::read))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    #[diagnostic(
        code(powerpack::config::parse),
        help("expected keys are `expect_folder` and `build_folder`")
    )]
    ConfigParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("No {file_name} found in '{}' or any parent directory", start.display())]
    #[diagnostic(code(powerpack::config::not_found))]
    ConfigNotFound { start: PathBuf, file_name: String },

    #[error("Invalid configuration option '{option}': {reason}")]
    #[diagnostic(code(powerpack::config::invalid))]
    InvalidConfig { option: String, reason: String },

    #[error("Failed to read marker table '{}'", path.display())]
    #[diagnostic(code(powerpack::markers::read))]
    MarkerTableRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse marker table: {source}")]
    #[diagnostic(code(powerpack::markers::parse))]
    MarkerTableParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    // Precondition errors
    #[error("Folder containing expected files for comparison does not exist: {}", path.display())]
    #[diagnostic(
        code(powerpack::precondition::expect_dir),
        help("create the folder and record the golden files for this test module")
    )]
    MissingExpectDir { path: PathBuf },

    #[error("Test source file does not exist: {}", path.display())]
    #[diagnostic(code(powerpack::precondition::source_file))]
    SourceFile { path: PathBuf },

    #[error("Failed to create build folder '{}'", path.display())]
    #[diagnostic(code(powerpack::io::build_dir))]
    BuildDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Comparison
    #[error(
        "Generated file '{}' does not match expected file '{}'\n  expected: {expected:?}\n  actual:   {actual:?}",
        build_file.display(),
        expect_file.display()
    )]
    #[diagnostic(code(powerpack::compare::mismatch))]
    Mismatch {
        expect_file: PathBuf,
        build_file: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    #[diagnostic(code(powerpack::io))]
    Io(#[from] io::Error),
}

impl PowerpackError {
    /// Returns true for errors caused by a missing or malformed
    /// `powerpack_compare_file` marker.
    pub fn is_marker_error(&self) -> bool {
        matches!(self, PowerpackError::InvalidMarker)
    }

    /// Returns true when the underlying failure is a file that does not exist,
    /// the usual outcome of comparing before a golden file was recorded.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PowerpackError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
