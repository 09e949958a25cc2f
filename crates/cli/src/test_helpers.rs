//! Test helpers for unit tests
//!
//! This module provides shared utilities for unit tests within the CLI crate.
//! For integration tests, see `tests/integration_test_helpers.rs`.

#[cfg(test)]
use std::fs;
#[cfg(test)]
use std::path::{Path, PathBuf};

/// Guard for changing the current working directory in tests.
/// Restores the original directory when dropped, even if the test panics.
///
/// Tests using it must be `#[serial]`: the working directory is process-wide.
#[cfg(test)]
pub struct DirGuard {
    original_dir: PathBuf,
}

#[cfg(test)]
impl DirGuard {
    /// Create the directory if needed and change into it.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

#[cfg(test)]
impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// A valid single-flag wire document
#[cfg(test)]
pub const SAMPLE_WIRE: &str = r#"{
  "new-welcome-banner": {
    "state": "ENABLED",
    "variants": {"on": true, "off": false},
    "defaultVariant": "off",
    "targeting": {
      "if": [{"ends_with": [{"var": "email"}, "@example.com"]}, "on", "off"]
    }
  }
}"#;
