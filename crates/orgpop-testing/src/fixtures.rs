//! Fixtures for building throwaway org trees.
//!
//! Provides utilities to:
//! - Create a temp root directory of outline files
//! - Write `.agenda-files` manifests
//! - Keep everything alive for the duration of a test

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary org root directory.
pub struct OrgTree {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl OrgTree {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("org");
        fs::create_dir_all(&root)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an outline file under the root and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the `.agenda-files` manifest, one entry per line.
    pub fn write_manifest(&self, entries: &[&str]) -> Result<PathBuf> {
        let path = self.root.join(".agenda-files");
        let mut content = entries.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// A sibling directory usable as `XDG_RUNTIME_DIR` for socket isolation.
    pub fn runtime_dir(&self) -> Result<PathBuf> {
        let dir = self._temp_dir.path().join("runtime");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
