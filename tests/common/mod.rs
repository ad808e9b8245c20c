//! Shared helpers for the powerpack integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use powerpack::{PowerpackConfig, TestRequest};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the libtest writer. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A scratch test folder `T` holding one test source file, laid out the way a
/// real test suite would be.
pub struct TestTree {
    root: TempDir,
    source_file: PathBuf,
}

impl TestTree {
    pub fn new(source_name: &str) -> Self {
        init_tracing();
        let root = tempfile::tempdir().expect("create temp dir");
        let source_file = root.path().join(source_name);
        fs::write(&source_file, "").expect("write test source");
        Self { root, source_file }
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Records a golden file at `T/<expect_folder>/<module>/<filename>`.
    pub fn golden(&self, expect_folder: &str, module: &str, filename: &str, contents: &str) -> PathBuf {
        let path = self.dir().join(expect_folder).join(module).join(filename);
        fs::create_dir_all(path.parent().expect("golden file has a parent"))
            .expect("create expect dir");
        fs::write(&path, contents).expect("write golden file");
        path
    }

    pub fn request(&self, config: &PowerpackConfig) -> TestRequest {
        TestRequest::new(config.clone(), &self.source_file)
    }
}

pub fn default_config() -> PowerpackConfig {
    PowerpackConfig::new("expected", "build").expect("valid config")
}
