//! Orchestrator for a generate run.
//!
//! A run goes through these steps, in order:
//! 1. discover entities (no entities stops the run before anything else)
//! 2. load every stub
//! 3. check output directory permissions, then create missing directories
//! 4. bootstrap the aggregator and the base classes
//! 5. ask the per-kind overwrite questions
//! 6. per entity: write artifacts, then patch the aggregator when both
//!    artifacts were freshly created

mod inspect;

use std::path::{Path, PathBuf};

pub use inspect::{AggregatorCheck, AnchorCheck, Inspection};
use repogen_core::{File, WriteResult, ensure_dir, is_writable};
use repogen_manifest::{Manifest, ProjectLayout, RepogenToml};
use tracing::{debug, info};

use crate::bootstrap::{AggregatorStatus, ensure_aggregator, ensure_base_classes};
use crate::confirm::Confirm;
use crate::patcher::{PatchOutcome, Patcher};
use crate::planner::{
    Action, ArtifactKind, OverrideDecisions, PlannedArtifact, Planner, discover_entities,
};
use crate::stub::{StubSet, StubSource};
use crate::{Diagnostic, Error, Result, Stage};

/// Knobs for a generate run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Treat a missing aggregator anchor as an error
    pub strict: bool,
}

/// What happened to one artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub fqn: String,
    pub action: Action,
    pub result: WriteResult,
}

impl ArtifactOutcome {
    pub fn created(&self) -> bool {
        self.result == WriteResult::Created
    }
}

/// Outcome of both aggregator passes for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub import: PatchOutcome,
    pub binding: PatchOutcome,
}

/// Everything done for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOutcome {
    pub entity: String,
    pub implementation: ArtifactOutcome,
    pub contract: ArtifactOutcome,
    /// `None` unless both artifacts were created by this run
    pub registration: Option<Registration>,
}

/// Result of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub entities: Vec<EntityOutcome>,
    pub aggregator: AggregatorStatus,
    /// Base class files created by this run
    pub base_files: Vec<PathBuf>,
    pub decisions: OverrideDecisions,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateOutcome {
    /// Artifacts written (created or overwritten) by this run.
    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts().filter(|a| a.result.is_written())
    }

    /// Artifacts left untouched.
    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts().filter(|a| !a.result.is_written())
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.entities
            .iter()
            .flat_map(|e| [&e.implementation, &e.contract])
    }

    /// Number of bindings spliced into the aggregator.
    pub fn bindings_added(&self) -> usize {
        self.entities
            .iter()
            .filter_map(|e| e.registration.as_ref())
            .filter(|r| r.binding.is_inserted())
            .count()
    }
}

/// Runs the generation-and-patch engine for one project.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    manifest: &'a Manifest,
    layout: ProjectLayout,
}

impl<'a> Generator<'a> {
    pub fn new(manifest: &'a Manifest, layout: ProjectLayout) -> Self {
        Self { manifest, layout }
    }

    /// Generator for a loaded `repogen.toml`, rooted at its directory.
    pub fn from_config(config: &'a RepogenToml) -> Self {
        Self::new(config.manifest(), config.layout())
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    fn planner(&self) -> Planner<'_> {
        Planner::new(self.manifest, &self.layout)
    }

    fn stub_source(&self) -> StubSource {
        StubSource::from_dir(self.layout.stubs_dir.as_deref())
    }

    /// Run the generator.
    pub fn generate(
        &self,
        confirm: &mut dyn Confirm,
        options: GenerateOptions,
    ) -> Result<GenerateOutcome> {
        let naming = &self.manifest.naming;
        let discovery = discover_entities(&self.layout.models_dir, &naming.model_extension)?;
        if discovery.entities.is_empty() {
            return Err(Box::new(Error::NoEntities {
                dir: self.layout.models_dir.clone(),
                extension: naming.model_extension.clone(),
            }));
        }
        let mut diagnostics = discovery.diagnostics;

        let stubs = StubSet::load(&self.stub_source())?;

        let output_dirs = [
            &self.layout.implementations_dir,
            &self.layout.contracts_dir,
            &self.layout.providers_dir,
        ];
        for dir in output_dirs {
            check_writable(dir)?;
        }
        for dir in output_dirs {
            if ensure_dir(dir).map_err(|e| Error::write(dir, e))? {
                info!(dir = %dir.display(), "created directory");
            }
        }

        let aggregator = ensure_aggregator(self.manifest, &self.layout, &stubs)?;
        let base_files = ensure_base_classes(self.manifest, &self.layout, &stubs)?;

        let planner = self.planner();
        let decisions = OverrideDecisions::resolve(&planner.existing()?, confirm)?;

        let mut patcher = Patcher::from_manifest(&stubs, self.manifest).strict(options.strict);
        let mut entities = Vec::with_capacity(discovery.entities.len());

        for entity in &discovery.entities {
            let plan = planner.plan(entity, &stubs, &decisions);
            for planned in [&plan.implementation, &plan.contract] {
                if planned.action == Action::KeepBase {
                    diagnostics.push(
                        Diagnostic::warning(
                            Stage::Discover,
                            format!(
                                "{} {} would replace the base class, left untouched",
                                entity, planned.spec.kind
                            ),
                        )
                        .at(planned.spec.path.display().to_string()),
                    );
                }
            }
            let implementation = write_artifact(&plan.implementation)?;
            let contract = write_artifact(&plan.contract)?;

            let registration = if implementation.created() && contract.created() {
                let result = patcher.patch_file(&aggregator.path, &plan.binding())?;
                for outcome in [&result.import, &result.binding] {
                    if let Some(anchor) = outcome.missing_anchor() {
                        diagnostics.push(
                            Diagnostic::warning(
                                Stage::Patch,
                                format!("{anchor} not found, {entity} binding not registered"),
                            )
                            .at(aggregator.path.display().to_string()),
                        );
                    }
                }
                Some(Registration {
                    import: result.import,
                    binding: result.binding,
                })
            } else {
                debug!(entity = %entity, "artifacts not both new, binding left alone");
                None
            };

            entities.push(EntityOutcome {
                entity: entity.clone(),
                implementation,
                contract,
                registration,
            });
        }

        Ok(GenerateOutcome {
            entities,
            aggregator,
            base_files,
            decisions,
            diagnostics,
        })
    }
}

/// An existing directory must be writable; a missing one needs a writable
/// nearest existing ancestor.
fn check_writable(dir: &Path) -> Result<()> {
    let target = dir.ancestors().find(|p| p.exists());
    match target {
        Some(target) if target.is_dir() && is_writable(target) => Ok(()),
        _ => Err(Error::not_writable(dir)),
    }
}

fn write_artifact(planned: &PlannedArtifact) -> Result<ArtifactOutcome> {
    let spec = &planned.spec;
    let result = if planned.action.writes() {
        File::new(&spec.path, spec.content.as_str())
            .write()
            .map_err(|e| Error::write(&spec.path, e))?
    } else {
        WriteResult::Skipped
    };
    info!(kind = %spec.kind, path = %spec.path.display(), action = ?planned.action, "artifact");

    Ok(ArtifactOutcome {
        kind: spec.kind,
        path: spec.path.clone(),
        fqn: spec.fqn(),
        action: planned.action,
        result,
    })
}
