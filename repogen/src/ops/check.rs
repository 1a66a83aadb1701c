//! Check operation - configuration and project inspection.

use repogen_codegen::{Generator, Result, Severity};
use repogen_manifest::RepogenToml;

use super::display_path;
use crate::reports::{AnchorLine, CheckReport};

/// Execute the check operation.
///
/// Inspects the project without writing anything.
pub fn check(config: &RepogenToml) -> Result<CheckReport> {
    let generator = Generator::from_config(config);
    let inspection = generator.inspect()?;
    let root = &generator.layout().root;

    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in &inspection.diagnostics {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        config_path: config.path().to_path_buf(),
        entities: inspection.entities,
        existing_implementations: inspection.existing.implementations.len(),
        existing_contracts: inspection.existing.contracts.len(),
        aggregator: display_path(root, &inspection.aggregator.path),
        aggregator_exists: inspection.aggregator.exists,
        anchors: inspection
            .aggregator
            .anchors
            .into_iter()
            .map(|a| AnchorLine {
                description: a.description,
                line: a.line,
            })
            .collect(),
        warnings,
        infos,
    })
}
