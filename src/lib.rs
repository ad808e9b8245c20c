//! Golden-file comparison fixtures.
//!
//! A test writes an artifact into a build folder and compares it against a
//! recorded file in an expect folder, both keyed by the test module name and
//! the filename declared with the `powerpack_compare_file` marker.
//!
//! ```rust,ignore
//! use powerpack::{compare_files, powerpack_request, PowerpackConfig};
//!
//! #[test]
//! fn test_hello() -> miette::Result<()> {
//!     let config = PowerpackConfig::new("expected", "build")?;
//!     let files = powerpack_request!(config, "test.txt")?.comparison_files()?;
//!     files.write_build("Hello, world!")?;
//!     compare_files(&files)?;
//!     Ok(())
//! }
//! ```

pub use crate::comparison::{assert_files_match, compare_files, ComparisonFiles};
pub use crate::config::{PowerpackConfig, CONFIG_FILE_NAME};
pub use crate::errors::{PowerpackError, Result, INVALID_MARKER_MESSAGE};
pub use crate::marker::{Marker, MarkerArg, MarkerTable, COMPARE_FILE_MARKER};
pub use crate::request::TestRequest;

pub mod comparison;
pub mod config;
pub mod errors;
pub mod fixtures;
pub mod marker;
pub mod request;
