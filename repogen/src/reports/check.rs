//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Marker, Output, Report};

/// One aggregator anchor and where it was found.
#[derive(Debug)]
pub struct AnchorLine {
    pub description: String,
    pub line: Option<usize>,
}

/// Report data from project inspection.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Discovered model names.
    pub entities: Vec<String>,
    pub existing_implementations: usize,
    pub existing_contracts: usize,
    /// Aggregator path, relative to the project root.
    pub aggregator: String,
    pub aggregator_exists: bool,
    pub anchors: Vec<AnchorLine>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.text(&format!("info: {}", info));
        }
        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.blank();
        }

        out.text(&format!("✓ {} is valid", self.config_path.display()));
        out.blank();

        out.heading(&format!(
            "{} model{}",
            self.entities.len(),
            if self.entities.len() == 1 { "" } else { "s" }
        ));
        for entity in &self.entities {
            out.item(Marker::Bullet, entity);
        }
        out.blank();

        out.field(
            "Existing",
            &format!(
                "{} implementations, {} contracts",
                self.existing_implementations, self.existing_contracts
            ),
        );

        if !self.aggregator_exists {
            out.field("Service provider", &format!("{} (not created yet)", self.aggregator));
            return;
        }
        out.field("Service provider", &self.aggregator);
        for anchor in &self.anchors {
            match anchor.line {
                Some(line) => out.item(Marker::Bullet, &format!("{}: line {}", anchor.description, line)),
                None => out.item(Marker::Bullet, &format!("{}: missing", anchor.description)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_render_anchor_lines() {
        let report = CheckReport {
            config_path: PathBuf::from("repogen.toml"),
            entities: vec!["User".into()],
            existing_implementations: 1,
            existing_contracts: 0,
            aggregator: "app/Providers/RepositoryServiceProvider.php".into(),
            aggregator_exists: true,
            anchors: vec![
                AnchorLine {
                    description: "'class' declaration".into(),
                    line: Some(7),
                },
                AnchorLine {
                    description: "'register' method body".into(),
                    line: None,
                },
            ],
            warnings: vec![],
            infos: vec![],
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.joined();
        assert!(text.starts_with("✓ repogen.toml is valid"));
        assert!(text.contains("1 model:\n  - User"));
        assert!(text.contains("  - 'class' declaration: line 7"));
        assert!(text.contains("  - 'register' method body: missing"));
    }
}
