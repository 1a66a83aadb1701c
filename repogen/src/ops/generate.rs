//! Generate operation - artifacts and aggregator bindings.

use repogen_codegen::patcher::PatchOutcome;
use repogen_codegen::{Confirm, GenerateOptions, Generator, Result};
use repogen_core::WriteResult;
use repogen_manifest::RepogenToml;
use tracing::debug;

use super::display_path;
use crate::reports::GenerateReport;

/// Execute the generate operation.
pub fn generate(
    config: &RepogenToml,
    confirm: &mut dyn Confirm,
    options: GenerateOptions,
) -> Result<GenerateReport> {
    let generator = Generator::from_config(config);
    let outcome = generator.generate(confirm, options)?;
    let root = &generator.layout().root;
    debug!(
        entities = outcome.entities.len(),
        written = outcome.written().count(),
        "generate finished"
    );

    let mut report = GenerateReport {
        entity_count: outcome.entities.len(),
        base_files: outcome
            .base_files
            .iter()
            .map(|p| display_path(root, p))
            .collect(),
        aggregator: display_path(root, &outcome.aggregator.path),
        aggregator_created: outcome.aggregator.created,
        instruction: outcome
            .aggregator
            .created
            .then(|| outcome.aggregator.registration_instruction()),
        warnings: outcome.diagnostics.iter().map(ToString::to_string).collect(),
        ..Default::default()
    };

    for artifact in outcome.artifacts() {
        let path = display_path(root, &artifact.path);
        match artifact.result {
            WriteResult::Created => report.created.push(path),
            WriteResult::Overwritten => report.overwritten.push(path),
            WriteResult::Skipped => report.skipped.push(path),
        }
    }

    for entity in &outcome.entities {
        match entity.registration.as_ref().map(|r| &r.binding) {
            Some(PatchOutcome::Inserted { .. }) => report.bindings.push(format!(
                "{} → {}",
                entity.contract.fqn, entity.implementation.fqn
            )),
            Some(PatchOutcome::AlreadyPresent) => report.already_bound.push(entity.entity.clone()),
            _ => {}
        }
    }

    Ok(report)
}
