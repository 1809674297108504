//! Run-scoped ownership of the output directory.
//!
//! A generation run claims its output root once, up front: any previous
//! contents are removed before the first file is written, and every write
//! goes through the claimed root. Two runs racing on the same path are
//! unguarded; callers wanting that must serialize externally.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

#[derive(Debug)]
pub struct OutputRoot {
    root: PathBuf,
}

impl OutputRoot {
    /// Claims `root` for this run, clearing whatever a previous run left.
    pub fn prepare(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        if root.exists() {
            debug!(path = %root.display(), "removing existing output directory");
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates (if needed) and returns a package directory under the root.
    pub fn package_dir(&self, relative: &str) -> Result<PathBuf, Error> {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn write_file(&self, dir: &Path, name: &str, contents: &str) -> Result<(), Error> {
        let path = dir.join(name);
        debug!(path = %path.display(), "writing file");
        fs::write(path, contents)?;
        Ok(())
    }
}
