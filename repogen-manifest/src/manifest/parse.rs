//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{CONFIG_FILE_NAME, Manifest, validate::validate_manifest};
use crate::error::ConfigSource;
use crate::{Error, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, CONFIG_FILE_NAME)
    }
}

impl Manifest {
    /// Parse a repogen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }
}

/// Parse a manifest from content with the given filename for error reporting.
fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let src = ConfigSource::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| src.parse_error(e))?;
    validate_manifest(&manifest, &src)?;
    Ok(manifest)
}
