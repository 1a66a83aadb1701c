//! First-run setup: the aggregator file and the shared base classes.

use std::path::PathBuf;

use repogen_core::{File, Overwrite, WriteResult};
use repogen_manifest::{Manifest, ProjectLayout};
use tracing::info;

use crate::stub::{StubSet, Substitutions};
use crate::{Error, Result};

/// State of the aggregator after bootstrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorStatus {
    pub path: PathBuf,
    /// Fully qualified class name
    pub fqn: String,
    /// Whether this run created the file
    pub created: bool,
}

impl AggregatorStatus {
    /// What the user has to add to the host application after creation.
    pub fn registration_instruction(&self) -> String {
        format!(
            "you must register the service provider in config/app.php:\n\n    'providers' => [\n        {}::class,\n    ],",
            self.fqn
        )
    }
}

/// Write the aggregator from its stub unless it already exists.
pub fn ensure_aggregator(
    manifest: &Manifest,
    layout: &ProjectLayout,
    stubs: &StubSet,
) -> Result<AggregatorStatus> {
    let path = layout.aggregator_path(manifest);
    let content = stubs.service_provider.render(
        &Substitutions::new()
            .set("__SERVICE_PROVIDER_NAMESPACE__", manifest.namespaces.providers.as_str())
            .set("__SERVICE_PROVIDER_NAME__", manifest.aggregator.name.as_str()),
    );

    let created = write_if_missing(&path, content)?;
    if created {
        info!(path = %path.display(), "created aggregator");
    }

    Ok(AggregatorStatus {
        path,
        fqn: manifest.aggregator_fqn(),
        created,
    })
}

/// Write the base implementation and base contract when missing.
///
/// Returns the paths created by this call.
pub fn ensure_base_classes(
    manifest: &Manifest,
    layout: &ProjectLayout,
    stubs: &StubSet,
) -> Result<Vec<PathBuf>> {
    let implementation = stubs.base_repository.render(
        &Substitutions::new()
            .set("__BASE_NAMESPACE__", manifest.base_implementation_namespace())
            .set("__BASE_CLASS__", manifest.base.implementation.as_str())
            .set("__BASE_INTERFACE_NAME__", manifest.base.contract.as_str())
            .set("__BASE_INTERFACE__", manifest.base_contract_fqn())
            .set("__ACTIVE_COLUMN__", manifest.query.active_column.as_str()),
    );
    let contract = stubs.base_interface.render(
        &Substitutions::new()
            .set("__BASE_NAMESPACE__", manifest.base_contract_namespace())
            .set("__BASE_CLASS__", manifest.base.contract.as_str()),
    );

    let mut created = Vec::new();
    for (path, content) in [
        (layout.base_implementation_path(manifest), implementation),
        (layout.base_contract_path(manifest), contract),
    ] {
        if write_if_missing(&path, content)? {
            info!(path = %path.display(), "created base class");
            created.push(path);
        }
    }
    Ok(created)
}

fn write_if_missing(path: &std::path::Path, content: String) -> Result<bool> {
    let result = File::new(path, content)
        .overwrite(Overwrite::IfMissing)
        .write()
        .map_err(|e| Error::write(path, e))?;
    Ok(result == WriteResult::Created)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::stub::StubSource;

    fn setup() -> (TempDir, Manifest, ProjectLayout, StubSet) {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, temp.path());
        let stubs = StubSet::load(&StubSource::Embedded).unwrap();
        (temp, manifest, layout, stubs)
    }

    #[test]
    fn test_aggregator_created_once() {
        let (_temp, manifest, layout, stubs) = setup();

        let first = ensure_aggregator(&manifest, &layout, &stubs).unwrap();
        assert!(first.created);
        assert_eq!(first.fqn, "App\\Providers\\RepositoryServiceProvider");
        let content = std::fs::read_to_string(&first.path).unwrap();
        assert!(content.contains("namespace App\\Providers;"));
        assert!(content.contains("class RepositoryServiceProvider extends ServiceProvider"));

        std::fs::write(&first.path, "custom").unwrap();
        let second = ensure_aggregator(&manifest, &layout, &stubs).unwrap();
        assert!(!second.created);
        assert_eq!(std::fs::read_to_string(&second.path).unwrap(), "custom");
    }

    #[test]
    fn test_registration_instruction_names_provider() {
        let status = AggregatorStatus {
            path: PathBuf::from("RepositoryServiceProvider.php"),
            fqn: "App\\Providers\\RepositoryServiceProvider".to_string(),
            created: true,
        };
        insta::assert_snapshot!(status.registration_instruction(), @r"
        you must register the service provider in config/app.php:

            'providers' => [
                App\Providers\RepositoryServiceProvider::class,
            ],
        ");
    }

    #[test]
    fn test_base_classes() {
        let (temp, mut manifest, _, stubs) = setup();
        manifest.query.active_column = "is_active".to_string();
        let layout = ProjectLayout::resolve(&manifest, temp.path());

        let created = ensure_base_classes(&manifest, &layout, &stubs).unwrap();
        assert_eq!(created.len(), 2);

        let base = std::fs::read_to_string(&created[0]).unwrap();
        assert!(base.contains("namespace App\\Repositories\\Eloquent;"));
        assert!(base.contains("use App\\Repositories\\Interfaces\\RepositoryInterface;"));
        assert!(base.contains("abstract class Repository implements RepositoryInterface"));
        assert!(base.contains("'is_active'"));
        assert!(!base.contains("__BASE_"));
        assert!(!base.contains("__ACTIVE_COLUMN__"));

        let contract = std::fs::read_to_string(&created[1]).unwrap();
        assert!(contract.contains("interface RepositoryInterface"));

        assert!(ensure_base_classes(&manifest, &layout, &stubs).unwrap().is_empty());
    }
}
