//! # Powerpack Configuration
//!
//! The two folder names every comparison fixture needs. A configuration is an
//! explicit value threaded into each [`TestRequest`](crate::TestRequest); it
//! can be built in code or loaded from a `powerpack.yaml` file:
//!
//! ```yaml
//! expect_folder: expected
//! build_folder: build
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PowerpackError, Result};

/// File name searched for by [`PowerpackConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "powerpack.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PowerpackConfig {
    /// Subfolder, relative to each test file's directory, holding golden files.
    pub expect_folder: String,
    /// Subfolder, relative to each test file's directory, receiving generated files.
    pub build_folder: String,
}

impl PowerpackConfig {
    /// Builds and validates a configuration from the two folder names.
    pub fn new(expect_folder: impl Into<String>, build_folder: impl Into<String>) -> Result<Self> {
        let config = Self {
            expect_folder: expect_folder.into(),
            build_folder: build_folder.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)
            .map_err(|source| PowerpackError::ConfigParse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PowerpackError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&source).map_err(|source| PowerpackError::ConfigParse {
                path: Some(path.to_path_buf()),
                source,
            })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded powerpack configuration");
        Ok(config)
    }

    /// Looks for `powerpack.yaml` in `start` and then in each of its ancestors,
    /// loading the first one found.
    pub fn discover<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();
        match Self::find_config_file(start) {
            Some(path) => Self::load(path),
            None => Err(PowerpackError::ConfigNotFound {
                start: start.to_path_buf(),
                file_name: CONFIG_FILE_NAME.to_string(),
            }),
        }
    }

    fn find_config_file(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Both folders must be non-empty relative paths that stay below the test
    /// file's directory.
    pub fn validate(&self) -> Result<()> {
        validate_folder("expect_folder", &self.expect_folder)?;
        validate_folder("build_folder", &self.build_folder)
    }
}

fn validate_folder(option: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| PowerpackError::InvalidConfig {
        option: option.to_string(),
        reason: reason.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid("folder name must not be empty"));
    }
    let path = Path::new(value);
    if path.has_root() || path.is_absolute() {
        return Err(invalid("folder must be relative to the test file's directory"));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid("folder must not contain '..'"));
    }
    Ok(())
}
