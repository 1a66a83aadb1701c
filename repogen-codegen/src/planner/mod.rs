//! Decide what each entity's artifacts look like and whether to write them.

mod decision;
mod discover;

use std::path::PathBuf;

pub use decision::{ExistingArtifacts, OverrideDecisions};
pub use discover::{Discovery, discover_entities, existing_artifacts};
use repogen_core::{namespace_of, qualify, suffix};
use repogen_manifest::{Manifest, ProjectLayout};

use crate::patcher::Binding;
use crate::stub::{StubSet, Substitutions};
use crate::Result;

/// The two artifacts generated per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Concrete data-access class
    Implementation,
    /// Abstract contract the implementation fulfils
    Contract,
}

impl ArtifactKind {
    /// Prompt order.
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Implementation, ArtifactKind::Contract];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Implementation => "implementation",
            ArtifactKind::Contract => "contract",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to one artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Overwrite,
    Skip,
    /// The target is the shared base class file, which is never replaced
    KeepBase,
}

impl Action {
    pub fn decide(exists: bool, overwrite: bool) -> Self {
        match (exists, overwrite) {
            (false, _) => Action::Create,
            (true, true) => Action::Overwrite,
            (true, false) => Action::Skip,
        }
    }

    pub fn writes(&self) -> bool {
        matches!(self, Action::Create | Action::Overwrite)
    }
}

/// One rendered artifact ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub kind: ArtifactKind,
    pub class_name: String,
    pub namespace: String,
    pub path: PathBuf,
    pub content: String,
}

impl ArtifactSpec {
    pub fn fqn(&self) -> String {
        qualify(&self.namespace, &self.class_name)
    }
}

/// An artifact together with the action decided for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub spec: ArtifactSpec,
    pub action: Action,
}

/// Both artifacts of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPlan {
    pub entity: String,
    pub implementation: PlannedArtifact,
    pub contract: PlannedArtifact,
}

impl EntityPlan {
    /// Binding between this entity's contract and implementation.
    pub fn binding(&self) -> Binding {
        Binding::new(
            self.contract.spec.fqn(),
            self.implementation.spec.fqn(),
        )
    }
}

/// Computes names, paths and rendered content from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    manifest: &'a Manifest,
    layout: &'a ProjectLayout,
}

impl<'a> Planner<'a> {
    pub fn new(manifest: &'a Manifest, layout: &'a ProjectLayout) -> Self {
        Self { manifest, layout }
    }

    pub fn class_name(&self, kind: ArtifactKind, entity: &str) -> String {
        let naming = &self.manifest.naming;
        match kind {
            ArtifactKind::Implementation => suffix(entity, &naming.implementation_suffix),
            ArtifactKind::Contract => suffix(entity, &naming.contract_suffix),
        }
    }

    pub fn namespace(&self, kind: ArtifactKind) -> &'a str {
        match kind {
            ArtifactKind::Implementation => &self.manifest.namespaces.implementations,
            ArtifactKind::Contract => &self.manifest.namespaces.contracts,
        }
    }

    pub fn path(&self, kind: ArtifactKind, entity: &str) -> PathBuf {
        let dir = match kind {
            ArtifactKind::Implementation => &self.layout.implementations_dir,
            ArtifactKind::Contract => &self.layout.contracts_dir,
        };
        dir.join(format!(
            "{}.{}",
            self.class_name(kind, entity),
            self.manifest.naming.output_extension
        ))
    }

    /// Path of the shared base file of `kind`.
    pub fn base_path(&self, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::Implementation => self.layout.base_implementation_path(self.manifest),
            ArtifactKind::Contract => self.layout.base_contract_path(self.manifest),
        }
    }

    /// Files of each kind already on disk, base files excluded.
    pub fn existing(&self) -> Result<ExistingArtifacts> {
        let extension = &self.manifest.naming.output_extension;
        Ok(ExistingArtifacts {
            implementations: existing_artifacts(
                &self.layout.implementations_dir,
                extension,
                &self.base_path(ArtifactKind::Implementation),
            )?,
            contracts: existing_artifacts(
                &self.layout.contracts_dir,
                extension,
                &self.base_path(ArtifactKind::Contract),
            )?,
        })
    }

    /// `use` line for the base class, empty when it shares the namespace.
    ///
    /// The implementation stub follows it with more imports; the contract
    /// stub goes straight to the declaration, so that line gets a blank
    /// line of its own.
    fn base_import(&self, kind: ArtifactKind) -> String {
        let base_fqn = match kind {
            ArtifactKind::Implementation => self.manifest.base_implementation_fqn(),
            ArtifactKind::Contract => self.manifest.base_contract_fqn(),
        };
        let own = self.namespace(kind).trim_matches('\\');
        if namespace_of(&base_fqn) == own {
            return String::new();
        }
        match kind {
            ArtifactKind::Implementation => format!("\nuse {};", base_fqn),
            ArtifactKind::Contract => format!("\nuse {};\n", base_fqn),
        }
    }

    /// Render one artifact of `entity`.
    pub fn artifact(&self, kind: ArtifactKind, entity: &str, stubs: &StubSet) -> ArtifactSpec {
        let namespaces = &self.manifest.namespaces;
        let base = &self.manifest.base;
        let class_name = self.class_name(kind, entity);
        let contract = self.class_name(ArtifactKind::Contract, entity);

        let content = match kind {
            ArtifactKind::Implementation => stubs.repository.render(
                &Substitutions::new()
                    .set("__USE_STATEMENT_FOR_REPOSITORY__", self.base_import(kind))
                    .set("__REPOSITORY_NAMESPACE__", namespaces.implementations.as_str())
                    .set("__MAIN_REPOSITORY__", base.implementation.as_str())
                    .set("__REPOSITORY__", class_name.as_str())
                    .set("__MODEL_NAMESPACE__", namespaces.models.as_str())
                    .set("__MODEL__", entity)
                    .set("__INTERFACE_NAMESPACE__", namespaces.contracts.as_str())
                    .set("__INTERFACE__", contract.as_str()),
            ),
            ArtifactKind::Contract => stubs.interface.render(
                &Substitutions::new()
                    .set("__USE_STATEMENT_FOR_INTERFACE__", self.base_import(kind))
                    .set("__INTERFACE_NAMESPACE__", namespaces.contracts.as_str())
                    .set("__MAIN_INTERFACE__", base.contract.as_str())
                    .set("__INTERFACE__", contract.as_str()),
            ),
        };

        ArtifactSpec {
            kind,
            namespace: self.namespace(kind).to_string(),
            path: self.path(kind, entity),
            class_name,
            content,
        }
    }

    /// Render both artifacts of `entity` and decide what to do with them.
    pub fn plan(&self, entity: &str, stubs: &StubSet, decisions: &OverrideDecisions) -> EntityPlan {
        let planned = |kind| {
            let spec = self.artifact(kind, entity, stubs);
            let action = if spec.path == self.base_path(kind) {
                Action::KeepBase
            } else {
                Action::decide(spec.path.exists(), decisions.get(kind))
            };
            PlannedArtifact { spec, action }
        };

        EntityPlan {
            entity: entity.to_string(),
            implementation: planned(ArtifactKind::Implementation),
            contract: planned(ArtifactKind::Contract),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;
    use crate::stub::StubSource;

    fn stubs() -> StubSet {
        StubSet::load(&StubSource::Embedded).unwrap()
    }

    #[test]
    fn test_action_decide() {
        assert_eq!(Action::decide(false, false), Action::Create);
        assert_eq!(Action::decide(false, true), Action::Create);
        assert_eq!(Action::decide(true, true), Action::Overwrite);
        assert_eq!(Action::decide(true, false), Action::Skip);
        assert!(!Action::Skip.writes());
        assert!(!Action::KeepBase.writes());
    }

    #[test]
    fn test_names_and_paths() {
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, Path::new("/p"));
        let planner = Planner::new(&manifest, &layout);

        assert_eq!(planner.class_name(ArtifactKind::Implementation, "User"), "UserRepository");
        assert_eq!(planner.class_name(ArtifactKind::Contract, "User"), "UserRepositoryInterface");
        assert_eq!(
            planner.path(ArtifactKind::Contract, "User"),
            Path::new("/p/app/Repositories/Interfaces/UserRepositoryInterface.php")
        );
        assert_eq!(
            planner.base_path(ArtifactKind::Implementation),
            Path::new("/p/app/Repositories/Eloquent/Repository.php")
        );
    }

    #[test]
    fn test_render_implementation() {
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, Path::new("/p"));
        let spec = Planner::new(&manifest, &layout).artifact(
            ArtifactKind::Implementation,
            "User",
            &stubs(),
        );

        assert_eq!(spec.fqn(), "App\\Repositories\\Eloquent\\UserRepository");
        insta::assert_snapshot!(spec.content, @r"
        <?php

        namespace App\Repositories\Eloquent;

        use App\Models\User;
        use App\Repositories\Interfaces\UserRepositoryInterface;

        class UserRepository extends Repository implements UserRepositoryInterface
        {
            /**
             * Create a new repository instance.
             *
             * @param User $model
             */
            public function __construct(User $model)
            {
                parent::__construct($model);
            }
        }
        ");
    }

    #[test]
    fn test_render_contract_with_foreign_base() {
        let mut manifest = Manifest::default();
        manifest.base.contract_namespace = Some("Acme\\Contracts".to_string());
        let layout = ProjectLayout::resolve(&manifest, Path::new("/p"));
        let spec =
            Planner::new(&manifest, &layout).artifact(ArtifactKind::Contract, "Post", &stubs());

        insta::assert_snapshot!(spec.content, @r"
        <?php

        namespace App\Repositories\Interfaces;

        use Acme\Contracts\RepositoryInterface;

        interface PostRepositoryInterface extends RepositoryInterface
        {
            //
        }
        ");
    }

    #[test]
    fn test_plan_respects_decisions() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, temp.path());
        let planner = Planner::new(&manifest, &layout);

        let existing = planner.path(ArtifactKind::Implementation, "User");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, "old").unwrap();

        let plan = planner.plan("User", &stubs(), &OverrideDecisions::new(false, false));
        assert_eq!(plan.implementation.action, Action::Skip);
        assert_eq!(plan.contract.action, Action::Create);

        let plan = planner.plan("User", &stubs(), &OverrideDecisions::new(true, false));
        assert_eq!(plan.implementation.action, Action::Overwrite);
        assert_eq!(
            plan.binding(),
            Binding::new(
                "App\\Repositories\\Interfaces\\UserRepositoryInterface",
                "App\\Repositories\\Eloquent\\UserRepository"
            )
        );

        let found = planner.existing().unwrap();
        assert_eq!(found.implementations, [existing]);
        assert!(found.contracts.is_empty());
    }

    #[test]
    fn test_plan_never_targets_base_file() {
        let manifest =
            Manifest::from_str("[naming]\nimplementation_suffix = \"\"\n").unwrap();
        let layout = ProjectLayout::resolve(&manifest, Path::new("/p"));
        let planner = Planner::new(&manifest, &layout);

        let plan = planner.plan("Repository", &stubs(), &OverrideDecisions::new(true, true));
        assert_eq!(
            plan.implementation.spec.path,
            planner.base_path(ArtifactKind::Implementation)
        );
        assert_eq!(plan.implementation.action, Action::KeepBase);
        assert_eq!(plan.contract.action, Action::Create);
    }
}
