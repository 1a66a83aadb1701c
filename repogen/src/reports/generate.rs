//! Generate command report data structures.

use super::output::{Marker, Output, Report};

/// Report data from a generate run. Paths are relative to the project root.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Number of models processed.
    pub entity_count: usize,
    /// Artifacts written for the first time.
    pub created: Vec<String>,
    /// Artifacts replaced after confirmation.
    pub overwritten: Vec<String>,
    /// Existing artifacts left untouched.
    pub skipped: Vec<String>,
    /// Base classes created by this run.
    pub base_files: Vec<String>,
    /// Aggregator path.
    pub aggregator: String,
    pub aggregator_created: bool,
    /// Registration instruction shown after the aggregator is created.
    pub instruction: Option<String>,
    /// `Contract → Implementation` lines for new bindings.
    pub bindings: Vec<String>,
    /// Entities whose binding was already registered.
    pub already_bound: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if self.aggregator_created || !self.base_files.is_empty() {
            out.heading("Bootstrapped");
            if self.aggregator_created {
                out.item(Marker::Created, &self.aggregator);
            }
            for file in &self.base_files {
                out.item(Marker::Created, file);
            }
            out.blank();
        }

        out.heading(&format!("Repositories ({} models)", self.entity_count));
        for file in &self.created {
            out.item(Marker::Created, file);
        }
        for file in &self.overwritten {
            out.item(Marker::Overwritten, file);
        }
        for file in &self.skipped {
            out.item(Marker::Kept, file);
        }
        out.blank();

        if !self.bindings.is_empty() {
            out.heading(&format!("Bindings added to {}", self.aggregator));
            for binding in &self.bindings {
                out.item(Marker::Created, binding);
            }
            out.blank();
        }
        for entity in &self.already_bound {
            out.item(Marker::Kept, &format!("{} binding already registered", entity));
        }

        out.field(
            "Generated",
            &format!(
                "{} created, {} overwritten, {} kept",
                self.created.len(),
                self.overwritten.len(),
                self.skipped.len()
            ),
        );

        if let Some(instruction) = &self.instruction {
            out.blank();
            out.text(instruction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_render_first_run() {
        let report = GenerateReport {
            entity_count: 1,
            created: vec![
                "app/Repositories/Eloquent/UserRepository.php".into(),
                "app/Repositories/Interfaces/UserRepositoryInterface.php".into(),
            ],
            aggregator: "app/Providers/RepositoryServiceProvider.php".into(),
            aggregator_created: true,
            instruction: Some("register it".into()),
            bindings: vec!["A → B".into()],
            ..Default::default()
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.joined(),
            "Bootstrapped:\n  + app/Providers/RepositoryServiceProvider.php\n\n\
             Repositories (1 models):\n  + app/Repositories/Eloquent/UserRepository.php\n  + app/Repositories/Interfaces/UserRepositoryInterface.php\n\n\
             Bindings added to app/Providers/RepositoryServiceProvider.php:\n  + A → B\n\n\
             Generated: 2 created, 0 overwritten, 0 kept\n\nregister it"
        );
    }

    #[test]
    fn test_render_warnings_first() {
        let report = GenerateReport {
            skipped: vec!["A.php".into()],
            warnings: vec!["something odd".into()],
            ..Default::default()
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "warning: something odd");
        assert!(out.lines.contains(&"  = A.php".to_string()));
    }
}
