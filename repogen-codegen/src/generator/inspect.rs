//! Read-only inspection of a project, used by `repogen check`.

use std::path::PathBuf;

use super::Generator;
use crate::lexer::tokenize;
use crate::patcher::{Anchor, BlockAfterName, DeclarationAnchor};
use crate::planner::{ExistingArtifacts, discover_entities};
use crate::stub::StubSet;
use crate::{Diagnostic, Error, Result, Stage};

/// Whether one anchor was found in the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorCheck {
    pub description: String,
    /// 1-based line of the anchor token
    pub line: Option<usize>,
}

/// State of the aggregator file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorCheck {
    pub path: PathBuf,
    pub exists: bool,
    /// Empty when the file does not exist yet
    pub anchors: Vec<AnchorCheck>,
}

/// Everything `check` reports, gathered without writing anything.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub entities: Vec<String>,
    pub existing: ExistingArtifacts,
    pub aggregator: AggregatorCheck,
    pub diagnostics: Vec<Diagnostic>,
}

impl Inspection {
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }
}

impl Generator<'_> {
    /// Gather what a generate run would work with.
    ///
    /// Stub loading failures are errors, like in a real run; everything else
    /// (no entities, missing anchors, stubs lacking placeholders) becomes a
    /// diagnostic.
    pub fn inspect(&self) -> Result<Inspection> {
        let manifest = self.manifest;
        let layout = &self.layout;

        let discovery =
            discover_entities(&layout.models_dir, &manifest.naming.model_extension)?;
        let mut diagnostics = discovery.diagnostics;
        if discovery.entities.is_empty() {
            diagnostics.push(
                Diagnostic::warning(
                    Stage::Discover,
                    format!(
                        "no '*.{}' model files, generate would stop",
                        manifest.naming.model_extension
                    ),
                )
                .at(layout.models_dir.display().to_string()),
            );
        }

        let stubs = StubSet::load(&self.stub_source())?;
        for stub in stubs.iter() {
            let missing = stub.missing_placeholders();
            if !missing.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        Stage::Stubs,
                        format!("{} stub never uses {}", stub.name(), missing.join(", ")),
                    )
                    .at(stub.name().file_name()),
                );
            }
        }

        let path = layout.aggregator_path(manifest);
        let exists = path.is_file();
        let mut anchors = Vec::new();
        if exists {
            let source = std::fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
            let stream = tokenize(&source);
            let declaration = DeclarationAnchor::new(&manifest.aggregator.declaration_keyword);
            let registration = BlockAfterName::new(&manifest.aggregator.registration_method);
            for anchor in [&declaration as &dyn Anchor, &registration] {
                let line = anchor.locate(&stream).map(|m| stream.line_of(m.token));
                if line.is_none() {
                    diagnostics.push(
                        Diagnostic::warning(
                            Stage::Patch,
                            format!("{} not found, bindings cannot be registered", anchor.describe()),
                        )
                        .at(path.display().to_string()),
                    );
                }
                anchors.push(AnchorCheck {
                    description: anchor.describe(),
                    line,
                });
            }
        } else {
            diagnostics.push(
                Diagnostic::info(Stage::Bootstrap, "aggregator will be created on the next run")
                    .at(path.display().to_string()),
            );
        }

        Ok(Inspection {
            entities: discovery.entities,
            existing: self.planner().existing()?,
            aggregator: AggregatorCheck {
                path,
                exists,
                anchors,
            },
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use repogen_manifest::{Manifest, ProjectLayout};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_inspect_empty_project() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::default();
        let generator = Generator::new(&manifest, ProjectLayout::resolve(&manifest, temp.path()));

        let inspection = generator.inspect().unwrap();
        assert!(inspection.entities.is_empty());
        assert!(!inspection.aggregator.exists);
        assert!(inspection.has_warnings());
        // Nothing was written.
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_inspect_reports_anchor_lines() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::default();
        let layout = ProjectLayout::resolve(&manifest, temp.path());
        std::fs::create_dir_all(&layout.models_dir).unwrap();
        std::fs::write(layout.models_dir.join("User.php"), "<?php").unwrap();
        std::fs::create_dir_all(&layout.providers_dir).unwrap();
        std::fs::write(
            layout.aggregator_path(&manifest),
            "<?php\n\nclass RepositoryServiceProvider\n{\n}\n",
        )
        .unwrap();

        let inspection = Generator::new(&manifest, layout).inspect().unwrap();
        assert_eq!(inspection.entities, ["User"]);
        assert_eq!(
            inspection.aggregator.anchors,
            [
                AnchorCheck {
                    description: "'class' declaration".to_string(),
                    line: Some(3)
                },
                AnchorCheck {
                    description: "'register' method body".to_string(),
                    line: None
                },
            ]
        );
        assert!(inspection.has_warnings());
    }
}
