//! Plan, manifest and store files in a temporary directory.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use wsconf_model::PLAN_FILENAME;

/// A temporary directory holding wsconf input files.
///
/// The directory is removed when the value is dropped.
pub struct TestFiles {
    dir: TempDir,
}

impl TestFiles {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = tempfile::tempdir()
            .unwrap_or_else(|e| panic!("TestFiles::new: failed to create temp dir: {e}"));
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return its path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap_or_else(|e| {
            panic!("TestFiles::write: failed to write {}: {e}", path.display())
        });
        path
    }

    /// Write a plan file under the default plan file name.
    pub fn plan(&self, content: &str) -> PathBuf {
        self.write(PLAN_FILENAME, content)
    }

    /// Write the fixture topology as a snapshot store document.
    pub fn store(&self) -> PathBuf {
        self.write("store.json", &crate::topology::topology_json())
    }
}

impl Default for TestFiles {
    fn default() -> Self {
        Self::new()
    }
}
