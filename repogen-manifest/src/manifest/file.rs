use std::path::{Path, PathBuf};

use super::{Manifest, ProjectLayout};
use crate::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "repogen.toml";

/// Content written by `repogen init`. Every value equals the built-in default.
const DEFAULT_CONTENT: &str = r#"# repogen configuration. Paths are relative to this file.

[paths]
models = "app/Models"
implementations = "app/Repositories/Eloquent"
contracts = "app/Repositories/Interfaces"
providers = "app/Providers"
# stubs = "stubs/repogen"

[namespaces]
models = 'App\Models'
implementations = 'App\Repositories\Eloquent'
contracts = 'App\Repositories\Interfaces'
providers = 'App\Providers'

[naming]
implementation_suffix = "Repository"
contract_suffix = "RepositoryInterface"
model_extension = "php"
output_extension = "php"

[base]
implementation = "Repository"
contract = "RepositoryInterface"

[aggregator]
name = "RepositoryServiceProvider"
declaration_keyword = "class"
registration_method = "register"

[query]
active_column = "active"
"#;

/// A repogen.toml on disk together with its parsed manifest.
pub struct RepogenToml {
    path: PathBuf,
    manifest: Manifest,
}

impl RepogenToml {
    /// Open and parse a repogen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let manifest = Manifest::from_file(&path)?;
        Ok(Self { path, manifest })
    }

    /// Write the default configuration into `dir` unless a file already exists.
    ///
    /// Returns the path of the configuration file and whether it was created.
    pub fn write_default(dir: &Path) -> Result<(PathBuf, bool)> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Ok((path, false));
        }
        let io_err = |e: std::io::Error| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;
        std::fs::write(&path, DEFAULT_CONTENT).map_err(io_err)?;
        Ok((path, true))
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory the configured paths are relative to.
    pub fn root(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Resolve the project layout against the configuration's directory.
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::resolve(&self.manifest, self.root())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_content_matches_defaults() {
        let parsed = Manifest::from_str(DEFAULT_CONTENT).unwrap();
        let defaults = Manifest::default();

        assert_eq!(parsed.paths.models, defaults.paths.models);
        assert_eq!(parsed.namespaces.contracts, defaults.namespaces.contracts);
        assert_eq!(parsed.namespaces.providers, defaults.namespaces.providers);
        assert_eq!(parsed.naming.contract_suffix, defaults.naming.contract_suffix);
        assert_eq!(parsed.base.implementation, defaults.base.implementation);
        assert_eq!(parsed.aggregator.name, defaults.aggregator.name);
    }

    #[test]
    fn test_write_default_does_not_clobber() {
        let temp = TempDir::new().unwrap();

        let (path, created) = RepogenToml::write_default(temp.path()).unwrap();
        assert!(created);
        std::fs::write(&path, "[query]\nactive_column = \"enabled\"\n").unwrap();

        let (_, created) = RepogenToml::write_default(temp.path()).unwrap();
        assert!(!created);

        let toml = RepogenToml::open(&path).unwrap();
        assert_eq!(toml.manifest().query.active_column, "enabled");
        assert_eq!(toml.root(), temp.path());
        assert_eq!(toml.layout().models_dir, temp.path().join("app/Models"));
    }

    #[test]
    fn test_root_of_bare_file_name() {
        let temp = TempDir::new().unwrap();
        let (path, _) = RepogenToml::write_default(temp.path()).unwrap();
        let toml = RepogenToml::open(&path).unwrap();
        assert_eq!(toml.path(), path);

        let bare = RepogenToml {
            path: PathBuf::from(CONFIG_FILE_NAME),
            manifest: Manifest::default(),
        };
        assert_eq!(bare.root(), Path::new("."));
    }
}
