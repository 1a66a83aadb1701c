//! Filesystem layout resolved against the project root.

use std::path::{Path, PathBuf};

use super::Manifest;

/// Absolute locations of every directory and file a generate run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub models_dir: PathBuf,
    pub implementations_dir: PathBuf,
    pub contracts_dir: PathBuf,
    pub providers_dir: PathBuf,
    pub stubs_dir: Option<PathBuf>,
}

impl ProjectLayout {
    /// Resolve the manifest's relative paths against `root`.
    pub fn resolve(manifest: &Manifest, root: &Path) -> Self {
        let paths = &manifest.paths;
        Self {
            root: root.to_path_buf(),
            models_dir: root.join(&paths.models),
            implementations_dir: root.join(&paths.implementations),
            contracts_dir: root.join(&paths.contracts),
            providers_dir: root.join(&paths.providers),
            stubs_dir: paths.stubs.as_ref().map(|dir| root.join(dir)),
        }
    }

    /// Path of the aggregator file.
    pub fn aggregator_path(&self, manifest: &Manifest) -> PathBuf {
        self.providers_dir.join(format!(
            "{}.{}",
            manifest.aggregator.name, manifest.naming.output_extension
        ))
    }

    /// Path of the base implementation file.
    pub fn base_implementation_path(&self, manifest: &Manifest) -> PathBuf {
        self.implementations_dir.join(format!(
            "{}.{}",
            manifest.base.implementation, manifest.naming.output_extension
        ))
    }

    /// Path of the base contract file.
    pub fn base_contract_path(&self, manifest: &Manifest) -> PathBuf {
        self.contracts_dir.join(format!(
            "{}.{}",
            manifest.base.contract, manifest.naming.output_extension
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_layout() {
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, Path::new("/project"));

        assert_eq!(layout.models_dir, Path::new("/project/app/Models"));
        assert_eq!(
            layout.implementations_dir,
            Path::new("/project/app/Repositories/Eloquent")
        );
        assert_eq!(layout.stubs_dir, None);
        assert_eq!(
            layout.aggregator_path(&manifest),
            Path::new("/project/app/Providers/RepositoryServiceProvider.php")
        );
        assert_eq!(
            layout.base_contract_path(&manifest),
            Path::new("/project/app/Repositories/Interfaces/RepositoryInterface.php")
        );
    }
}
