use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

mod sanitize;

pub use sanitize::*;

/// A throwaway project directory with a few test files in it.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create `path` with `contents`, including missing parent directories.
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        let path = self.dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn with_dir(self, path: &str) -> Self {
        fs::create_dir_all(self.dir.path().join(path)).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The canonical form of a project file, the way resolved locators spell it.
    pub fn real(&self, path: &str) -> String {
        self.canonical_root()
            .join(path)
            .to_string_lossy()
            .into_owned()
    }

    pub fn canonical_root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).unwrap()
    }
}
