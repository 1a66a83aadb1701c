//! Directory scans: entity discovery and existing artifacts.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use repogen_core::is_identifier;
use tracing::{debug, warn};

use crate::{Diagnostic, Error, Result, Stage};

/// Entities found in the model directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Entity names, sorted
    pub entities: Vec<String>,
    /// Files that carried the extension but could not name a class
    pub diagnostics: Vec<Diagnostic>,
}

/// Find one entity per regular file in `dir` with the given extension.
///
/// A missing directory yields no entities.
pub fn discover_entities(dir: &Path, extension: &str) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    for path in files_with_extension(dir, extension)? {
        let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };
        if !is_identifier(stem) {
            warn!(path = %path.display(), "skipping model file, name is not a valid class name");
            discovery.diagnostics.push(
                Diagnostic::warning(
                    Stage::Discover,
                    format!("'{stem}' is not a valid class name, model skipped"),
                )
                .at(path.display().to_string()),
            );
            continue;
        }
        discovery.entities.push(stem.to_string());
    }

    discovery.entities.sort();
    debug!(dir = %dir.display(), entities = ?discovery.entities, "discovered entities");
    Ok(discovery)
}

/// Sorted files in `dir` with the given extension, except `base_file`.
///
/// The base file is shared by every artifact of its kind and is never
/// offered for overwrite.
pub fn existing_artifacts(dir: &Path, extension: &str, base_file: &Path) -> Result<Vec<PathBuf>> {
    let mut files = files_with_extension(dir, extension)?;
    files.retain(|path| path != base_file);
    files.sort();
    Ok(files)
}

fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| Error::read(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::read(dir, e))?.path();
        if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
            files.push(path);
        }
    }
    Ok(files)
}
