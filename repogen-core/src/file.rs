//! Writing generated files.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Create a directory (and its parents) if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)
        .wrap_err_with(|| format!("failed to create directory {}", path.display()))?;
    Ok(true)
}

/// Whether an existing path carries a write bit and the current user may
/// write to it. Missing paths never are.
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly()) && has_write_access(path)
}

#[cfg(unix)]
fn has_write_access(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn has_write_access(_path: &Path) -> bool {
    true
}

/// What [`File::write`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Created,
    Overwritten,
    /// The file existed and the policy said to keep it
    Skipped,
}

impl WriteResult {
    pub fn is_written(&self) -> bool {
        *self != WriteResult::Skipped
    }
}

/// Policy for a path that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Always,
    /// Keep whatever is there (stubs, base classes, the aggregator)
    IfMissing,
}

/// Content bound for one path, written with [`File::write`].
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// A file that replaces whatever exists at `path`.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    pub fn overwrite(self, overwrite: Overwrite) -> Self {
        Self { overwrite, ..self }
    }

    /// Write the content, creating missing parent directories.
    pub fn write(&self) -> Result<WriteResult> {
        let result = match (self.path.exists(), self.overwrite) {
            (true, Overwrite::IfMissing) => return Ok(WriteResult::Skipped),
            (true, Overwrite::Always) => WriteResult::Overwritten,
            (false, _) => WriteResult::Created,
        };

        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&self.path, &self.content)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))?;
        Ok(result)
    }
}
